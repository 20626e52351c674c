//! HTTP Utilities
//!
//! This module contains HTTP-related utilities:
//! - HTTP client configuration
//! - Header management
//! - HTTP interceptors

pub mod client;
pub mod headers;
pub mod interceptor;

// Re-export main types
pub use client::*;
pub use headers::*;
pub use interceptor::*;
