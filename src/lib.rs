//! # json-fetch - Fetch REST Resources as JSON
//!
//! json-fetch issues an HTTP GET against a REST endpoint, optionally carrying
//! static headers such as an access token, reads the full body, decodes it as
//! UTF-8 and parses it as JSON.
//!
#![deny(unsafe_code)]

//! ## Stages
//!
//! Every fetch runs the same stages, each of which either completes or fails
//! the whole call with its own [`FetchError`] variant:
//!
//! 1. connect and send (`NetworkError`)
//! 2. receive the status and full body (`HttpStatusError` for non-2xx)
//! 3. decode UTF-8 (`DecodeError`)
//! 4. parse JSON (`ParseError`)
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use json_fetch::prelude::*;
//! use std::collections::HashMap;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), FetchError> {
//!     let headers = HashMap::from([(
//!         "Authorization".to_string(),
//!         format!("token {}", std::env::var("GITHUB_TOKEN").unwrap_or_default()),
//!     )]);
//!     let profile = json_fetch::fetch_json(
//!         "https://api.github.com/repos/rust-lang/rust/community/profile",
//!         &headers,
//!     )
//!     .await?;
//!     println!("health: {}", profile["health_percentage"]);
//!     Ok(())
//! }
//! ```
//!
//! Synchronous callers use [`blocking::fetch_json`] instead.

pub mod blocking;
pub mod client;
pub mod defaults;
pub mod error;
pub mod execution;
pub mod observability;
pub mod types;

pub use client::{JsonFetcher, JsonFetcherBuilder, TokenScheme};
pub use error::{ErrorCategory, FetchError};
pub use types::{FetchRequest, FetchResponse, HttpConfig, JsonValue};

use serde::de::DeserializeOwned;
use std::collections::HashMap;

/// Fetch `url` with default settings and parse the body as JSON.
///
/// `headers` are applied to the request verbatim.
pub async fn fetch_json(
    url: &str,
    headers: &HashMap<String, String>,
) -> Result<JsonValue, FetchError> {
    JsonFetcher::new()?.fetch_json(url, headers).await
}

/// Fetch `url` with default settings and return the raw response.
pub async fn fetch(url: &str, headers: &HashMap<String, String>) -> Result<FetchResponse, FetchError> {
    JsonFetcher::new()?.fetch(url, headers).await
}

/// Fetch `url` with default settings and deserialize the body into `T`.
pub async fn fetch_json_as<T: DeserializeOwned>(
    url: &str,
    headers: &HashMap<String, String>,
) -> Result<T, FetchError> {
    JsonFetcher::new()?.fetch_json_as(url, headers).await
}

/// Common imports.
pub mod prelude {
    pub use crate::client::{JsonFetcher, JsonFetcherBuilder, TokenScheme};
    pub use crate::error::{ErrorCategory, FetchError};
    pub use crate::execution::http::interceptor::{
        HttpInterceptor, HttpRequestContext, LoggingInterceptor,
    };
    pub use crate::types::{FetchRequest, FetchResponse, HttpConfig, JsonValue};
}
