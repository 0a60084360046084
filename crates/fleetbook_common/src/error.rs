// --- File: crates/fleetbook_common/src/error.rs ---
use std::fmt;
use thiserror::Error;

/// The base error type for all fleetbook errors.
///
/// Each crate keeps its own error enum and implements `From<CrateError> for FleetbookError`
/// so handlers can return one type that knows its HTTP status.
#[derive(Error, Debug)]
pub enum FleetbookError {
    /// Error occurred due to missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Missing or wrong credentials
    #[error("Authentication error: {0}")]
    AuthError(String),

    /// Error occurred during validation
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Error occurred during external service call
    #[error("External service error: {service_name} - {message}")]
    ExternalServiceError {
        service_name: String,
        message: String,
    },

    /// The requested booking collides with an existing one
    #[error("Conflict: {0}")]
    ConflictError(String),

    #[error("Not found: {0}")]
    NotFoundError(String),

    /// The operation exists in the API but is not wired to the store
    #[error("Not implemented: {0}")]
    NotImplemented(String),
}

/// A trait for converting errors to HTTP status codes.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for FleetbookError {
    fn status_code(&self) -> u16 {
        match self {
            FleetbookError::ConfigError(_) => 500,
            FleetbookError::AuthError(_) => 401,
            FleetbookError::ValidationError(_) => 400,
            FleetbookError::ExternalServiceError { .. } => 502,
            FleetbookError::ConflictError(_) => 409,
            FleetbookError::NotFoundError(_) => 404,
            FleetbookError::NotImplemented(_) => 501,
        }
    }
}

// Utility functions for error handling
pub fn config_error<T: fmt::Display>(message: T) -> FleetbookError {
    FleetbookError::ConfigError(message.to_string())
}

pub fn validation_error<T: fmt::Display>(message: T) -> FleetbookError {
    FleetbookError::ValidationError(message.to_string())
}

pub fn not_found<T: fmt::Display>(message: T) -> FleetbookError {
    FleetbookError::NotFoundError(message.to_string())
}

pub fn conflict<T: fmt::Display>(message: T) -> FleetbookError {
    FleetbookError::ConflictError(message.to_string())
}

pub fn external_service_error<T: fmt::Display>(service_name: &str, message: T) -> FleetbookError {
    FleetbookError::ExternalServiceError {
        service_name: service_name.to_string(),
        message: message.to_string(),
    }
}
