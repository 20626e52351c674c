//! Request and response types for a single fetch.

use crate::error::FetchError;
use crate::execution::executors::body;
use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;
use std::collections::HashMap;

/// Parsed JSON document returned by the fetch operations.
pub type JsonValue = serde_json::Value;

/// A GET request: target URL plus headers applied verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchRequest {
    pub url: String,
    pub headers: HashMap<String, String>,
}

impl FetchRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: HashMap::new(),
        }
    }

    pub fn header<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    pub fn headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers.extend(headers);
        self
    }

    /// Parse the URL, requiring an absolute `http` or `https` URI.
    pub fn parsed_url(&self) -> Result<reqwest::Url, FetchError> {
        parse_url(&self.url)
    }
}

/// Parse `url`, requiring an absolute `http` or `https` URI.
pub fn parse_url(url: &str) -> Result<reqwest::Url, FetchError> {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return Err(FetchError::InvalidUrl("URL is empty".to_string()));
    }
    let parsed = reqwest::Url::parse(trimmed)
        .map_err(|e| FetchError::InvalidUrl(format!("'{trimmed}': {e}")))?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(FetchError::InvalidUrl(format!(
            "'{trimmed}': unsupported scheme '{other}', expected http or https"
        ))),
    }
}

/// A fully buffered HTTP response.
///
/// The body is kept as raw bytes; [`FetchResponse::text`] and
/// [`FetchResponse::json`] run the decode and parse stages on demand.
#[derive(Debug, Clone)]
pub struct FetchResponse {
    /// Final URL of the response (after redirects, if any).
    pub url: reqwest::Url,
    /// Numeric HTTP status code (e.g., `200`, `404`).
    pub status: u16,
    /// Response headers as a case-insensitive map.
    pub headers: HeaderMap,
    /// Raw response body bytes.
    pub body: Vec<u8>,
    /// Timestamp when the response was received.
    pub received_at: chrono::DateTime<chrono::Utc>,
}

impl FetchResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body decoded as UTF-8.
    pub fn text(&self) -> Result<&str, FetchError> {
        body::decode_body(&self.body)
    }

    /// Body decoded as UTF-8 and parsed as JSON.
    pub fn json(&self) -> Result<JsonValue, FetchError> {
        body::parse_json_body(&self.body)
    }

    /// Body decoded, parsed, and deserialized into `T`.
    pub fn json_as<T: DeserializeOwned>(&self) -> Result<T, FetchError> {
        body::deserialize_body(&self.body)
    }

    /// Content type of the response, if the server sent one.
    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(body: &[u8]) -> FetchResponse {
        FetchResponse {
            url: reqwest::Url::parse("https://api.example.com/x").unwrap(),
            status: 200,
            headers: HeaderMap::new(),
            body: body.to_vec(),
            received_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn parse_url_accepts_http_and_https() {
        assert!(parse_url("http://localhost:8080/a").is_ok());
        assert!(parse_url("https://api.github.com/repos/o/r/community/profile").is_ok());
    }

    #[test]
    fn parse_url_rejects_bad_input() {
        for url in ["", "   ", "/relative/path", "ftp://example.com/file", "not a url"] {
            assert!(
                matches!(parse_url(url), Err(FetchError::InvalidUrl(_))),
                "expected InvalidUrl for {url:?}"
            );
        }
    }

    #[test]
    fn request_builder_collects_headers() {
        let req = FetchRequest::new("https://example.com")
            .header("Authorization", "token X")
            .header("Accept", "application/json");
        assert_eq!(req.headers.len(), 2);
        assert_eq!(req.headers["Authorization"], "token X");
        assert!(req.parsed_url().is_ok());
    }

    #[test]
    fn response_text_and_json() {
        let resp = response(br#"{"health_percentage":100}"#);
        assert!(resp.is_success());
        assert_eq!(resp.text().unwrap(), r#"{"health_percentage":100}"#);
        assert_eq!(resp.json().unwrap()["health_percentage"], 100);
    }

    #[test]
    fn response_json_as_typed() {
        #[derive(serde::Deserialize)]
        struct Profile {
            health_percentage: u8,
        }
        let resp = response(br#"{"health_percentage":87,"files":{}}"#);
        let profile: Profile = resp.json_as().unwrap();
        assert_eq!(profile.health_percentage, 87);
    }

    #[test]
    fn response_text_rejects_invalid_utf8() {
        let resp = response(&[0xc3, 0x28]);
        assert!(matches!(resp.text(), Err(FetchError::DecodeError { .. })));
    }
}
