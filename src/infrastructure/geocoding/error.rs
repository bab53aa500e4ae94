//! # Resolution Errors
//!
//! Error types for address, coordinate and route lookups.
//!
//! # Examples
//!
//! ```
//! use storefront::infrastructure::geocoding::error::ResolutionError;
//!
//! let error = ResolutionError::timeout("lookup timed out after 4000ms");
//! assert!(error.is_unavailable());
//!
//! let error = ResolutionError::invalid_request("empty query");
//! assert!(!error.is_unavailable());
//! ```

use thiserror::Error;

/// Error type for geocoding adapter operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResolutionError {
    /// Request timed out.
    #[error("lookup timeout: {message}")]
    Timeout {
        /// Error message.
        message: String,
        /// Timeout duration in milliseconds.
        timeout_ms: Option<u64>,
    },

    /// Network or connection error, including upstream 5xx.
    #[error("lookup connection error: {message}")]
    Connection {
        /// Error message.
        message: String,
    },

    /// The provider has no result for the query.
    #[error("lookup found nothing: {message}")]
    NotFound {
        /// Error message.
        message: String,
    },

    /// Rate limit or quota exceeded.
    #[error("lookup rate limit exceeded: {message}")]
    RateLimited {
        /// Error message.
        message: String,
    },

    /// The provider rejected our credentials.
    #[error("lookup authentication error: {message}")]
    Authentication {
        /// Error message.
        message: String,
    },

    /// The request we built was malformed.
    #[error("lookup invalid request: {message}")]
    InvalidRequest {
        /// Error message.
        message: String,
    },

    /// Response could not be parsed or had an unexpected shape.
    #[error("lookup protocol error: {message}")]
    Protocol {
        /// Error message.
        message: String,
    },

    /// Internal adapter error.
    #[error("lookup internal error: {message}")]
    Internal {
        /// Error message.
        message: String,
    },
}

impl ResolutionError {
    /// Creates a timeout error.
    #[must_use]
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
            timeout_ms: None,
        }
    }

    /// Creates a timeout error with duration.
    #[must_use]
    pub fn timeout_with_duration(message: impl Into<String>, timeout_ms: u64) -> Self {
        Self::Timeout {
            message: message.into(),
            timeout_ms: Some(timeout_ms),
        }
    }

    /// Creates a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Creates a not found error.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Creates a rate limited error.
    #[must_use]
    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::RateLimited {
            message: message.into(),
        }
    }

    /// Creates an authentication error.
    #[must_use]
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication {
            message: message.into(),
        }
    }

    /// Creates an invalid request error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    /// Creates a protocol error.
    #[must_use]
    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol {
            message: message.into(),
        }
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns true if the lookup simply could not produce an answer.
    ///
    /// Callers fall back to a coarser estimate on these. Only a malformed
    /// request is a programming error and is not classified as unavailable.
    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        !matches!(self, Self::InvalidRequest { .. })
    }

    /// Returns true if this is a timeout error.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// Returns true if the provider had no result.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns the error message.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Timeout { message, .. }
            | Self::Connection { message }
            | Self::NotFound { message }
            | Self::RateLimited { message }
            | Self::Authentication { message }
            | Self::InvalidRequest { message }
            | Self::Protocol { message }
            | Self::Internal { message } => message,
        }
    }
}

/// Result type for geocoding operations.
pub type ResolutionResult<T> = Result<T, ResolutionError>;
