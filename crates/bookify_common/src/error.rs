// --- File: crates/bookify_common/src/error.rs ---
use std::fmt;
use thiserror::Error;

/// The base error type shared across Bookify crates.
///
/// Crate-specific errors (calendar, datastore, messaging) convert into this
/// taxonomy at the orchestration seam so handlers can map them to HTTP
/// status codes uniformly.
#[derive(Error, Debug)]
pub enum BookifyError {
    /// A required field is missing or a field value is malformed
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// The requested window conflicts with an existing calendar event
    #[error("Conflict: {0}")]
    ConflictError(String),

    /// Error occurred due to missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Error occurred during an external service call
    #[error("External service error: {service_name} - {message}")]
    ExternalServiceError {
        service_name: String,
        message: String,
    },

    /// Any other unhandled failure
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// A trait for converting errors to HTTP status codes.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for BookifyError {
    fn status_code(&self) -> u16 {
        match self {
            BookifyError::ValidationError(_) => 400,
            BookifyError::ConflictError(_) => 409,
            BookifyError::ConfigError(_) => 500,
            BookifyError::ExternalServiceError { .. } => 500,
            BookifyError::InternalError(_) => 500,
        }
    }
}

// Utility constructors for the common cases
pub fn validation_error<T: fmt::Display>(message: T) -> BookifyError {
    BookifyError::ValidationError(message.to_string())
}

pub fn conflict<T: fmt::Display>(message: T) -> BookifyError {
    BookifyError::ConflictError(message.to_string())
}

pub fn config_error<T: fmt::Display>(message: T) -> BookifyError {
    BookifyError::ConfigError(message.to_string())
}

pub fn external_service_error<T: fmt::Display>(service_name: &str, message: T) -> BookifyError {
    BookifyError::ExternalServiceError {
        service_name: service_name.to_string(),
        message: message.to_string(),
    }
}

pub fn internal_error<T: fmt::Display>(message: T) -> BookifyError {
    BookifyError::InternalError(message.to_string())
}
