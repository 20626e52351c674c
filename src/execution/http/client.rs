//! HTTP client builder utilities
//!
//! Turns an [`HttpConfig`] into a configured `reqwest::Client`.

use crate::error::FetchError;
use crate::types::HttpConfig;
use reqwest::header::{ACCEPT, HeaderValue};

/// Build an HTTP client from HttpConfig
///
/// # Arguments
/// * `config` - HTTP configuration containing timeout, proxy, headers, etc.
///
/// # Returns
/// * `Ok(reqwest::Client)` - Configured HTTP client
/// * `Err(FetchError)` - Configuration or build error
///
/// # Example
/// ```rust,no_run
/// use json_fetch::types::HttpConfig;
/// use json_fetch::execution::http::client::build_http_client_from_config;
///
/// let config = HttpConfig::default();
/// let client = build_http_client_from_config(&config)?;
/// # Ok::<(), json_fetch::FetchError>(())
/// ```
pub fn build_http_client_from_config(config: &HttpConfig) -> Result<reqwest::Client, FetchError> {
    let mut builder = reqwest::Client::builder();

    // Apply timeout settings
    if let Some(timeout) = config.timeout {
        builder = builder.timeout(timeout);
    }

    if let Some(connect_timeout) = config.connect_timeout {
        builder = builder.connect_timeout(connect_timeout);
    }

    // Apply proxy settings
    if let Some(proxy_url) = &config.proxy {
        let proxy = reqwest::Proxy::all(proxy_url)
            .map_err(|e| FetchError::ConfigurationError(format!("Invalid proxy URL: {e}")))?;
        builder = builder.proxy(proxy);
    }

    // Apply user agent
    if let Some(user_agent) = &config.user_agent {
        builder = builder.user_agent(user_agent);
    }

    // Default headers; request-level headers of the same name take precedence.
    let mut headers = crate::execution::http::headers::headermap_from_hashmap(&config.headers)?;
    if !headers.contains_key(ACCEPT) {
        headers.insert(
            ACCEPT,
            HeaderValue::from_static(crate::defaults::http::ACCEPT),
        );
    }
    builder = builder.default_headers(headers);

    // Build the client
    builder
        .build()
        .map_err(|e| FetchError::ConfigurationError(format!("Failed to create HTTP client: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_build_http_client_default() {
        let config = HttpConfig::default();
        let result = build_http_client_from_config(&config);
        assert!(result.is_ok());
    }

    #[test]
    fn test_build_http_client_with_timeout() {
        let config = HttpConfig {
            timeout: Some(Duration::from_secs(30)),
            connect_timeout: Some(Duration::from_secs(10)),
            ..Default::default()
        };

        let result = build_http_client_from_config(&config);
        assert!(result.is_ok());
    }

    #[test]
    fn test_build_http_client_with_headers() {
        let mut config = HttpConfig::default();
        config
            .headers
            .insert("X-Custom-Header".to_string(), "custom-value".to_string());

        let result = build_http_client_from_config(&config);
        assert!(result.is_ok());
    }

    #[test]
    fn test_build_http_client_with_invalid_header_name() {
        let mut config = HttpConfig::default();
        config
            .headers
            .insert("Invalid Header Name".to_string(), "value".to_string());

        let result = build_http_client_from_config(&config);
        assert!(matches!(result, Err(FetchError::InvalidHeader { .. })));
    }

    #[test]
    fn test_build_http_client_with_invalid_proxy() {
        let config = HttpConfig {
            proxy: Some("not a proxy url".to_string()),
            ..Default::default()
        };

        let result = build_http_client_from_config(&config);
        assert!(matches!(result, Err(FetchError::ConfigurationError(_))));
    }
}
