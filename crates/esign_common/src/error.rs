use std::fmt;
use thiserror::Error;

/// The base error type shared by every e-signature adapter.
///
/// Provider crates keep their own error enums and implement
/// `From<ProviderError> for EsignError` so that callers of the port see a
/// single taxonomy.
#[derive(Error, Debug)]
pub enum EsignError {
    /// Error occurred during an HTTP request
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Error occurred while parsing data
    #[error("Failed to parse data: {0}")]
    ParseError(String),

    /// Error occurred due to missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Error occurred during authentication or authorization
    #[error("Authentication error: {0}")]
    AuthError(String),

    /// Error occurred during validation
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Error returned by, or while talking to, the signature provider
    #[error("External service error: {service_name} - {message}")]
    ExternalServiceError {
        service_name: String,
        message: String,
    },

    /// Error occurred due to a resource not being found
    #[error("Not found: {0}")]
    NotFoundError(String),

    /// The selected provider does not implement the operation
    #[error("Unsupported operation: {0}")]
    UnsupportedError(String),

    /// Error occurred due to a timeout
    #[error("Timeout: {0}")]
    TimeoutError(String),

    /// Error occurred due to an internal error
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// A trait for converting errors to HTTP status codes.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for EsignError {
    fn status_code(&self) -> u16 {
        match self {
            EsignError::HttpError(_) => 500,
            EsignError::ParseError(_) => 400,
            EsignError::ConfigError(_) => 500,
            EsignError::AuthError(_) => 401,
            EsignError::ValidationError(_) => 400,
            EsignError::ExternalServiceError { .. } => 502,
            EsignError::NotFoundError(_) => 404,
            EsignError::UnsupportedError(_) => 501,
            EsignError::TimeoutError(_) => 504,
            EsignError::InternalError(_) => 500,
        }
    }
}

// Common error conversions
impl From<reqwest::Error> for EsignError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            EsignError::TimeoutError(err.to_string())
        } else {
            EsignError::HttpError(err.to_string())
        }
    }
}

impl From<serde_json::Error> for EsignError {
    fn from(err: serde_json::Error) -> Self {
        EsignError::ParseError(err.to_string())
    }
}

impl From<esign_config::ConfigValidationError> for EsignError {
    fn from(err: esign_config::ConfigValidationError) -> Self {
        EsignError::ConfigError(err.to_string())
    }
}

// Utility functions for error handling
pub fn config_error<T: fmt::Display>(message: T) -> EsignError {
    EsignError::ConfigError(message.to_string())
}

pub fn validation_error<T: fmt::Display>(message: T) -> EsignError {
    EsignError::ValidationError(message.to_string())
}

pub fn not_found<T: fmt::Display>(message: T) -> EsignError {
    EsignError::NotFoundError(message.to_string())
}
