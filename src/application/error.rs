//! # Application Errors
//!
//! Error types for the application layer.
//!
//! # Error Hierarchy
//!
//! ```text
//! ApplicationError
//! ├── Domain(DomainError)          - Invalid input or rule violations
//! ├── Resolution(ResolutionError)  - Lookups that could not be absorbed
//! ├── Configuration(String)        - Bad startup configuration
//! └── Internal(String)             - Anything else
//! ```
//!
//! # Examples
//!
//! ```
//! use storefront::application::error::ApplicationError;
//! use storefront::domain::errors::DomainError;
//!
//! let err: ApplicationError = DomainError::MissingPostalCode.into();
//! assert!(err.is_invalid_input());
//!
//! let err = ApplicationError::internal("policy misconfigured");
//! assert!(!err.is_invalid_input());
//! ```

use crate::domain::errors::DomainError;
use crate::infrastructure::geocoding::error::ResolutionError;
use thiserror::Error;

/// Application layer error.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain error from validation or business rules.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Lookup error that could not be treated as a miss.
    #[error("resolution error: {0}")]
    Resolution(#[from] ResolutionError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Internal error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Creates a configuration error.
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Returns true if the caller sent bad input.
    #[must_use]
    pub fn is_invalid_input(&self) -> bool {
        match self {
            Self::Domain(e) => e.is_invalid_input(),
            _ => false,
        }
    }
}

/// Result type for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
