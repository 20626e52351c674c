//! Type Conversions for FetchError
//!
//! This module contains From trait implementations for converting
//! common error types into FetchError.

use super::types::FetchError;

// From implementations
impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            return Self::ConfigurationError(err.to_string());
        }
        Self::NetworkError(err.to_string())
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        Self::ParseError {
            line: err.line(),
            column: err.column(),
            message: err.to_string(),
        }
    }
}

impl From<std::str::Utf8Error> for FetchError {
    fn from(err: std::str::Utf8Error) -> Self {
        Self::DecodeError {
            valid_up_to: err.valid_up_to(),
            error_len: err.error_len(),
        }
    }
}
