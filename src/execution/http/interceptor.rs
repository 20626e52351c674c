//! HTTP Interceptor interfaces
//!
//! Interceptors can observe and tweak request builders before send, observe
//! responses, and be notified of errors at any stage of a fetch. The hooks
//! are best-effort and should avoid expensive work.

use crate::error::FetchError;
use reqwest::header::HeaderMap;

/// Context passed to interceptors describing the request.
#[derive(Clone, Debug)]
pub struct HttpRequestContext {
    /// Unique id for correlating the hooks of a single fetch.
    pub request_id: String,
    pub url: String,
}

impl HttpRequestContext {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            request_id: generate_request_id(),
            url: url.into(),
        }
    }
}

/// Generate a fresh request id.
pub fn generate_request_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// HTTP interceptor trait
pub trait HttpInterceptor: Send + Sync {
    /// Called before sending a request. Interceptors may add headers or modify
    /// attributes on the request builder. Return the (possibly modified)
    /// builder or an error to short-circuit the request.
    fn on_before_send(
        &self,
        _ctx: &HttpRequestContext,
        builder: reqwest::RequestBuilder,
        _headers: &HeaderMap,
    ) -> Result<reqwest::RequestBuilder, FetchError> {
        Ok(builder)
    }

    /// Called after a response is received (only for successful responses).
    fn on_response(
        &self,
        _ctx: &HttpRequestContext,
        _response: &reqwest::Response,
    ) -> Result<(), FetchError> {
        Ok(())
    }

    /// Called when any stage of the fetch fails.
    fn on_error(&self, _ctx: &HttpRequestContext, _error: &FetchError) {}
}

/// A simple logging interceptor backed by `tracing` (no sensitive data).
#[derive(Clone, Default)]
pub struct LoggingInterceptor;

impl HttpInterceptor for LoggingInterceptor {
    fn on_before_send(
        &self,
        ctx: &HttpRequestContext,
        builder: reqwest::RequestBuilder,
        _headers: &HeaderMap,
    ) -> Result<reqwest::RequestBuilder, FetchError> {
        tracing::debug!(target: "json_fetch::http", request_id=%ctx.request_id, url=%ctx.url, "sending request");
        Ok(builder)
    }

    fn on_response(
        &self,
        ctx: &HttpRequestContext,
        response: &reqwest::Response,
    ) -> Result<(), FetchError> {
        tracing::debug!(target: "json_fetch::http", request_id=%ctx.request_id, url=%ctx.url, status=%response.status().as_u16(), "response received");
        Ok(())
    }

    fn on_error(&self, ctx: &HttpRequestContext, error: &FetchError) {
        tracing::warn!(target: "json_fetch::http", request_id=%ctx.request_id, url=%ctx.url, err=%error, "request error");
    }
}
