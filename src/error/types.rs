//! Core error types.

use std::borrow::Cow;

/// Coarse classification of a [`FetchError`], useful for presentation and
/// for deciding who has to fix the problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The request could not be built (bad URL, header or client config).
    Configuration,
    /// The transport failed before a complete response arrived.
    Network,
    /// The server answered with a 4xx status.
    Client,
    /// The server answered with a 5xx status.
    Server,
    /// The server answered with some other non-success status.
    Http,
    /// The response body is not valid UTF-8.
    Decode,
    /// The response text is not valid JSON (or not the requested shape).
    Parse,
}

/// Errors returned by the fetch operations.
///
/// Every stage of a fetch fails with its own variant; none of them is
/// retried or replaced with a fallback value.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The URL is not an absolute `http`/`https` URI.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A caller-supplied header name or value cannot be sent.
    #[error("Invalid header '{name}': {reason}")]
    InvalidHeader { name: String, reason: String },

    /// Client construction or runtime misuse.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Connection could not be established or was interrupted.
    #[error("Network error: {0}")]
    NetworkError(String),

    /// The server returned a non-success status code.
    #[error("HTTP status error {status}{}", .reason.as_deref().map(|r| format!(" {r}")).unwrap_or_default())]
    HttpStatusError {
        status: u16,
        reason: Option<String>,
        /// Raw response body, exactly as received.
        body: Vec<u8>,
    },

    /// The body is not valid UTF-8.
    #[error("Decode error: invalid UTF-8 at byte offset {valid_up_to}")]
    DecodeError {
        /// Number of leading bytes that were valid UTF-8.
        valid_up_to: usize,
        /// Length of the invalid sequence, `None` when the input ended mid-sequence.
        error_len: Option<usize>,
    },

    /// The decoded text is not valid JSON.
    #[error("Parse error at line {line}, column {column}: {message}")]
    ParseError {
        line: usize,
        column: usize,
        message: String,
    },
}

impl FetchError {
    /// Build an [`FetchError::HttpStatusError`].
    pub fn http_status(status: u16, reason: Option<&str>, body: Vec<u8>) -> Self {
        Self::HttpStatusError {
            status,
            reason: reason.map(str::to_string),
            body,
        }
    }

    /// Build an [`FetchError::InvalidHeader`].
    pub fn invalid_header(name: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::InvalidHeader {
            name: name.into(),
            reason: reason.to_string(),
        }
    }

    /// HTTP status code, if the server answered.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::HttpStatusError { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidUrl(_) | Self::InvalidHeader { .. } | Self::ConfigurationError(_) => {
                ErrorCategory::Configuration
            }
            Self::NetworkError(_) => ErrorCategory::Network,
            Self::HttpStatusError { status, .. } => match status {
                400..=499 => ErrorCategory::Client,
                500..=599 => ErrorCategory::Server,
                _ => ErrorCategory::Http,
            },
            Self::DecodeError { .. } => ErrorCategory::Decode,
            Self::ParseError { .. } => ErrorCategory::Parse,
        }
    }

    pub fn is_client_error(&self) -> bool {
        self.category() == ErrorCategory::Client
    }

    pub fn is_server_error(&self) -> bool {
        self.category() == ErrorCategory::Server
    }

    /// Raw error body of an [`FetchError::HttpStatusError`], decoded lossily.
    pub fn body_text(&self) -> Option<Cow<'_, str>> {
        match self {
            Self::HttpStatusError { body, .. } => Some(String::from_utf8_lossy(body)),
            _ => None,
        }
    }

    /// Error body parsed as JSON, when the server sent one.
    ///
    /// REST APIs usually describe failures in a JSON document such as
    /// `{"message": "Not Found"}`; this is best-effort and returns `None`
    /// for anything else.
    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            Self::HttpStatusError { body, .. } => serde_json::from_slice(body).ok(),
            _ => None,
        }
    }
}
