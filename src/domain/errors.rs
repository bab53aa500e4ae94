//! # Domain Errors
//!
//! Error types raised by value-object construction and shipping policies.
//!
//! # Examples
//!
//! ```
//! use storefront::domain::errors::DomainError;
//!
//! let err = DomainError::invalid_postal_code("123");
//! assert!(err.is_invalid_input());
//!
//! let err = DomainError::invalid_configuration("breakpoints out of order");
//! assert!(!err.is_invalid_input());
//! ```

use thiserror::Error;

/// Error type for domain rule violations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    /// No postal code was supplied, or it was blank.
    #[error("postal code is required")]
    MissingPostalCode,

    /// The postal code did not normalize to exactly 8 digits.
    #[error("invalid postal code '{input}': expected 8 digits, got {digits}")]
    InvalidPostalCode {
        /// Raw input as received.
        input: String,
        /// Number of digits left after normalization.
        digits: usize,
    },

    /// A distance was negative or not finite.
    #[error("invalid distance: {0} km")]
    InvalidDistance(f64),

    /// A coordinate was not finite or out of range.
    #[error("invalid coordinate ({latitude}, {longitude})")]
    InvalidCoordinate {
        /// Latitude in decimal degrees.
        latitude: f64,
        /// Longitude in decimal degrees.
        longitude: f64,
    },

    /// Tier rules or schedules violate their ordering constraints.
    #[error("invalid shipping configuration: {0}")]
    InvalidConfiguration(String),

    /// A distance-based policy was asked to quote without a distance.
    #[error("policy {0} requires a distance")]
    DistanceRequired(&'static str),
}

impl DomainError {
    /// Creates an invalid postal code error for the given raw input.
    #[must_use]
    pub fn invalid_postal_code(input: impl Into<String>) -> Self {
        let input = input.into();
        let digits = input.chars().filter(char::is_ascii_digit).count();
        Self::InvalidPostalCode { input, digits }
    }

    /// Creates an invalid configuration error.
    #[must_use]
    pub fn invalid_configuration(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration(message.into())
    }

    /// Returns true if this error was caused by caller-supplied input.
    ///
    /// These are surfaced as client errors and never retried.
    #[must_use]
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Self::MissingPostalCode
                | Self::InvalidPostalCode { .. }
                | Self::InvalidDistance(_)
                | Self::InvalidCoordinate { .. }
        )
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
