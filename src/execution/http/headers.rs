//! HTTP Headers Utility
//!
//! Converts caller-supplied header maps into `reqwest` headers. Names and
//! values are applied verbatim; anything that cannot be sent on the wire is
//! reported as [`FetchError::InvalidHeader`] instead of being dropped.

use crate::error::FetchError;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};
use std::collections::HashMap;

/// HTTP header builder for API requests
pub struct HttpHeaderBuilder {
    headers: HeaderMap,
}

impl HttpHeaderBuilder {
    /// Create a new header builder
    pub fn new() -> Self {
        Self {
            headers: HeaderMap::new(),
        }
    }

    /// Add Bearer token authorization
    pub fn with_bearer_auth(self, token: &str) -> Result<Self, FetchError> {
        self.with_authorization(&format!("Bearer {token}"))
    }

    /// Add `token <value>` authorization, the scheme GitHub personal access
    /// tokens use.
    pub fn with_token_auth(self, token: &str) -> Result<Self, FetchError> {
        self.with_authorization(&format!("token {token}"))
    }

    fn with_authorization(mut self, value: &str) -> Result<Self, FetchError> {
        let mut value = HeaderValue::from_str(value)
            .map_err(|e| FetchError::invalid_header(AUTHORIZATION.as_str(), e))?;
        value.set_sensitive(true);
        self.headers.insert(AUTHORIZATION, value);
        Ok(self)
    }

    /// Add a custom header
    pub fn with_header(mut self, name: &str, value: &str) -> Result<Self, FetchError> {
        let (name, value) = parse_header(name, value)?;
        self.headers.insert(name, value);
        Ok(self)
    }

    /// Add multiple custom headers from a HashMap
    pub fn with_custom_headers(
        mut self,
        custom_headers: &HashMap<String, String>,
    ) -> Result<Self, FetchError> {
        apply_extra_headers(&mut self.headers, custom_headers)?;
        Ok(self)
    }

    /// Build the final HeaderMap
    pub fn build(self) -> HeaderMap {
        self.headers
    }
}

impl Default for HttpHeaderBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_header(name: &str, value: &str) -> Result<(HeaderName, HeaderValue), FetchError> {
    let header_name =
        HeaderName::from_bytes(name.as_bytes()).map_err(|e| FetchError::invalid_header(name, e))?;
    let mut header_value =
        HeaderValue::from_str(value).map_err(|e| FetchError::invalid_header(name, e))?;
    if header_name == AUTHORIZATION {
        header_value.set_sensitive(true);
    }
    Ok((header_name, header_value))
}

/// Convert a `HashMap<String, String>` into a `HeaderMap`.
pub fn headermap_from_hashmap(headers: &HashMap<String, String>) -> Result<HeaderMap, FetchError> {
    let mut map = HeaderMap::with_capacity(headers.len());
    apply_extra_headers(&mut map, headers)?;
    Ok(map)
}

/// Apply extra headers to a mutable HeaderMap.
///
/// Extra headers override base headers if they have the same name
/// (names compare case-insensitively).
pub fn apply_extra_headers(
    base: &mut HeaderMap,
    extra: &HashMap<String, String>,
) -> Result<(), FetchError> {
    for (k, v) in extra {
        let (name, value) = parse_header(k, v)?;
        base.insert(name, value);
    }
    Ok(())
}

/// Merge extra headers into base headers, returning the merged map.
pub fn merge_headers(
    mut base: HeaderMap,
    extra: &HashMap<String, String>,
) -> Result<HeaderMap, FetchError> {
    apply_extra_headers(&mut base, extra)?;
    Ok(base)
}
