//! Tracing - Logging and Debugging Instrumentation
//!
//! Subscriber setup for applications (`TracingConfig`, `init_tracing`), the
//! per-request tracer used by the executors, and helpers that keep secrets
//! such as access tokens out of the logs.

use crate::error::FetchError;
use reqwest::header::HeaderMap;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Compact,
    Pretty,
    Json,
}

/// Subscriber configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TracingConfig {
    /// Filter directives used when `RUST_LOG` is not set, e.g. `"json_fetch=debug"`.
    pub filter: String,
    pub format: OutputFormat,
    pub ansi: bool,
    pub include_target: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            filter: "json_fetch=info".to_string(),
            format: OutputFormat::Compact,
            ansi: true,
            include_target: true,
        }
    }
}

impl TracingConfig {
    /// Verbose, human readable output for local development.
    pub fn development() -> Self {
        Self {
            filter: "json_fetch=debug".to_string(),
            format: OutputFormat::Pretty,
            ..Default::default()
        }
    }

    /// Warnings only.
    pub fn minimal() -> Self {
        Self {
            filter: "json_fetch=warn".to_string(),
            ..Default::default()
        }
    }

    /// Machine readable JSON lines.
    pub fn json_production() -> Self {
        Self {
            format: OutputFormat::Json,
            ansi: false,
            ..Default::default()
        }
    }

    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = filter.into();
        self
    }
}

/// Install a global `tracing` subscriber.
///
/// `RUST_LOG` takes precedence over [`TracingConfig::filter`]. Fails with
/// [`FetchError::ConfigurationError`] if a global subscriber is already set.
pub fn init_tracing(config: &TracingConfig) -> Result<(), FetchError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.filter).map_err(|e| {
            FetchError::ConfigurationError(format!("Invalid tracing filter '{}': {e}", config.filter))
        })?,
    };
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(config.ansi)
        .with_target(config.include_target);
    let result = match config.format {
        OutputFormat::Compact => builder.compact().try_init(),
        OutputFormat::Pretty => builder.pretty().try_init(),
        OutputFormat::Json => builder.json().try_init(),
    };
    result.map_err(|e| {
        FetchError::ConfigurationError(format!("Failed to install tracing subscriber: {e}"))
    })
}

/// Secrets at or below this many characters are hidden completely.
const MIN_PARTIALLY_SHOWN_SECRET: usize = 16;

/// Mask a credential, keeping the scheme and, for long secrets, a few
/// characters at each end for recognition.
pub fn mask_sensitive_value(value: &str) -> String {
    let (scheme, secret) = match value.split_once(' ') {
        Some((scheme, secret)) => (Some(scheme), secret),
        None => (None, value),
    };
    let masked = if secret.chars().count() > MIN_PARTIALLY_SHOWN_SECRET {
        let head: String = secret.chars().take(4).collect();
        let tail: String = secret
            .chars()
            .rev()
            .take(4)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();
        format!("{head}...{tail}")
    } else {
        "***".to_string()
    };
    match scheme {
        Some(scheme) => format!("{scheme} {masked}"),
        None => masked,
    }
}

pub(crate) fn is_sensitive_header(name: &str) -> bool {
    let name = name.to_ascii_lowercase();
    name.contains("authorization") || name.contains("token") || name.contains("key")
}

/// Value of header `name` as it may appear in logs and `Debug` output.
pub fn mask_header_value(name: &str, value: &str) -> String {
    if is_sensitive_header(name) {
        mask_sensitive_value(value)
    } else {
        value.to_string()
    }
}

/// Render headers as a JSON object with credentials masked.
pub fn format_headers_for_logging(headers: &HeaderMap) -> String {
    let map: std::collections::BTreeMap<&str, String> = headers
        .iter()
        .map(|(k, v)| {
            let value = v.to_str().unwrap_or("<invalid>");
            let shown = if v.is_sensitive() {
                mask_sensitive_value(value)
            } else {
                mask_header_value(k.as_str(), value)
            };
            (k.as_str(), shown)
        })
        .collect();
    serde_json::to_string(&map).unwrap_or_else(|_| format!("{map:?}"))
}

pub fn format_duration(duration: Duration) -> String {
    if duration.as_secs() > 0 {
        format!("{:.2}s", duration.as_secs_f64())
    } else if duration.as_millis() > 0 {
        format!("{}ms", duration.as_millis())
    } else {
        format!("{}μs", duration.as_micros())
    }
}

/// Per-request tracing helper used by the executors.
pub struct RequestTracer {
    request_id: String,
}

impl RequestTracer {
    pub fn new(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
        }
    }

    pub fn trace_request_start(&self, method: &str, url: &str) {
        info!(target: "json_fetch::http", request_id=%self.request_id, method=%method, url=%url, "Request started");
    }

    pub fn trace_request_headers(&self, headers: &HeaderMap) {
        debug!(target: "json_fetch::http", request_id=%self.request_id, request_headers=%format_headers_for_logging(headers), "Request headers");
    }

    pub fn trace_request_complete(&self, status_code: u16, start: Instant, response_length: usize) {
        debug!(
            target: "json_fetch::http",
            request_id=%self.request_id,
            status_code=status_code,
            duration=%format_duration(start.elapsed()),
            response_length=response_length,
            "Request completed"
        );
    }

    pub fn trace_request_failed(&self, error: &FetchError, start: Instant) {
        warn!(
            target: "json_fetch::http",
            request_id=%self.request_id,
            status_code=?error.status_code(),
            duration=%format_duration(start.elapsed()),
            err=%error,
            "Request failed"
        );
    }
}
