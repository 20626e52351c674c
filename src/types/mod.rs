//! Core data types: requests, responses and HTTP configuration.

pub mod fetch;
pub mod http;

pub use fetch::{FetchRequest, FetchResponse, JsonValue, parse_url};
pub use http::{HttpConfig, HttpConfigBuilder};
