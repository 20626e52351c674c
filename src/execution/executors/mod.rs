//! Executors
//!
//! Stable entry points for fetching a resource and decoding its body.

pub mod body;
pub mod get;

pub use body::{decode_body, deserialize_body, parse_json_body, parse_json_text};
pub use get::{execute_get_json, execute_get_json_as, execute_get_request};

use crate::execution::http::interceptor::HttpInterceptor;
use crate::observability::tracing::format_headers_for_logging;
use reqwest::header::HeaderMap;
use std::sync::Arc;

/// Everything an executor needs to send a request.
#[derive(Clone)]
pub struct HttpExecutionConfig {
    pub http_client: reqwest::Client,
    /// Headers applied to every request (e.g. authorization); per-request
    /// headers of the same name replace them.
    pub base_headers: HeaderMap,
    pub interceptors: Vec<Arc<dyn HttpInterceptor>>,
}

impl std::fmt::Debug for HttpExecutionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpExecutionConfig")
            .field(
                "base_headers",
                &format_headers_for_logging(&self.base_headers),
            )
            .field("interceptors", &self.interceptors.len())
            .finish_non_exhaustive()
    }
}
