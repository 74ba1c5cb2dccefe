//! # Common Error Types
//!
//! Consolidated error handling for the dashboard client.
//!
//! This module provides a centralized error type [`AppError`] whose variants are
//! the error taxonomy of the client. Every failure is classified exactly once, at
//! the boundary where it happens (input validation, HTTP response, storage), and
//! callers decide what to do from the variant alone.
//!
//! ## Error Categories
//!
//! | Variant | Source | Retried | Caller reaction |
//! |---|---|---|---|
//! | `Validation` | future date, bad query | no | blocking alert, no state change |
//! | `Authentication` | missing token, HTTP 401 | no | forced logout, back to login |
//! | `Transient` | network, timeout, other HTTP status | yes | error state with manual retry |
//! | `Api` | login / create-user rejected | no | alert with server message |
//! | `Storage` | token file unreadable or unwritable | no | alert |
//! | `Config` | invalid environment | no | abort at startup |
//!
//! ## Usage Pattern
//!
//! ```rust,no_run
//! use dashboard::core::error::AppError;
//!
//! fn check(total: f64) -> Result<f64, AppError> {
//!     if total < 0.0 {
//!         return Err(AppError::Validation("Revenue cannot be negative".to_string()));
//!     }
//!     Ok(total)
//! }
//! ```

use thiserror::Error;

/// Application-wide error type.
///
/// Each variant carries a human-readable message that can be shown to the user
/// as is. The type is `Clone` so results can travel through the event channel.
///
/// # Example
///
/// ```rust
/// use dashboard::core::error::AppError;
///
/// let err = AppError::Transient("HTTP 503: Service Unavailable".to_string());
/// assert!(err.is_retryable());
/// assert_eq!(err.to_string(), "Transient error: HTTP 503: Service Unavailable");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    /// Input rejected before any network call (e.g. a date in the future).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Missing or rejected session token. Terminal for the operation.
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Network failure, timeout, undecodable body or non-401 error status.
    #[error("Transient error: {0}")]
    Transient(String),

    /// Request understood but refused by the API (bad credentials, duplicate user).
    #[error("API error: {0}")]
    Api(String),

    /// Local token storage failure.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Invalid configuration.
    #[error("Config error: {0}")]
    Config(String),
}

impl AppError {
    /// Only transient failures are worth another attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(self, AppError::Transient(_))
    }

    /// Authentication failures tear the session down.
    pub fn requires_logout(&self) -> bool {
        matches!(self, AppError::Authentication(_))
    }

    /// Message without the category prefix, for alerts.
    pub fn user_message(&self) -> &str {
        match self {
            AppError::Validation(m)
            | AppError::Authentication(m)
            | AppError::Transient(m)
            | AppError::Api(m)
            | AppError::Storage(m)
            | AppError::Config(m) => m,
        }
    }
}

/// Convenience type alias for `Result<T, AppError>`.
pub type Result<T> = std::result::Result<T, AppError>;

impl From<lib_utils::envs::Error> for AppError {
    fn from(err: lib_utils::envs::Error) -> Self {
        match err {
            lib_utils::envs::Error::MissingEnv(name) => {
                AppError::Config(format!("{} must be set in environment", name))
            }
            lib_utils::envs::Error::WrongFormat(name) => {
                AppError::Config(format!("{} has an invalid value", name))
            }
        }
    }
}

impl From<lib_utils::time::Error> for AppError {
    fn from(err: lib_utils::time::Error) -> Self {
        match err {
            lib_utils::time::Error::FailToDateParse(value) => {
                AppError::Validation(format!("Invalid date '{}', expected YYYY-MM-DD", value))
            }
            lib_utils::time::Error::OutOfRange(millis) => {
                AppError::Validation(format!("Timestamp {} is out of range", millis))
            }
        }
    }
}
