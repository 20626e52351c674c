//! Error Handling Module
//!
//! This module provides the error types returned by every fetch operation:
//! - Core error type (`FetchError`) and its coarse `ErrorCategory`
//! - Type conversions from `reqwest`, `serde_json` and UTF-8 errors
//!
//! # Example
//!
//! ```rust,ignore
//! use json_fetch::error::{ErrorCategory, FetchError};
//!
//! let error = FetchError::http_status(404, Some("Not Found"), b"{}".to_vec());
//! assert_eq!(error.category(), ErrorCategory::Client);
//! assert_eq!(error.status_code(), Some(404));
//! ```

// Module declarations
mod conversions;
pub mod types;

// Re-exports for public API
pub use types::*;
