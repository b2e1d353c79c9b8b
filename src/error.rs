//! Error types for the receipt form.
//!
//! This module defines custom error types using `thiserror` for precise error handling.

use crate::domain::ValidationError;
use thiserror::Error;

/// Errors that can occur when talking to the receipt service.
#[derive(Error, Debug)]
pub enum ReceiptApiError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Service returned an error status code
    #[error("API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse JSON response
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Network timeout
    #[error("Request timeout")]
    Timeout,

    /// Receipt not found
    #[error("Receipt not found: {0}")]
    NotFound(String),

    /// Phone number does not match the receipt on record
    #[error("Phone number does not match our records")]
    PhoneMismatch,

    /// Request rejected before it was sent
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// No receipt service URL configured
    #[error("Receipt service is not configured")]
    NotConfigured,

    /// Writing a downloaded receipt failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ValidationError> for ReceiptApiError {
    fn from(err: ValidationError) -> Self {
        ReceiptApiError::InvalidRequest(err.to_string())
    }
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },

    /// A .env file exists but could not be read or parsed
    #[error("Failed to load .env file: {0}")]
    DotenvError(String),
}

/// Rejections raised by the verification form.
///
/// None of these are fatal: the form stays usable and the user may correct
/// the input and try again.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    /// Submitted phone does not carry 7 to 15 digits
    #[error("Please enter a valid phone number")]
    InvalidPhoneFormat,

    /// Clipboard write failed
    #[error("Clipboard unavailable: {0}")]
    Clipboard(String),
}

/// Errors from the currency and date display helpers.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormatError {
    /// Date string is in none of the accepted layouts
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Amount is NaN, infinite or too large to format to the cent
    #[error("Invalid amount: {0}")]
    InvalidAmount(f64),
}

/// Convenience type alias for Results with ReceiptApiError
pub type ReceiptApiResult<T> = Result<T, ReceiptApiError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Convenience type alias for Results with FormError
pub type FormResult<T> = Result<T, FormError>;

/// Convenience type alias for Results with FormatError
pub type FormatResult<T> = Result<T, FormatError>;
