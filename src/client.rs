//! JSON fetch client
//!
//! [`JsonFetcher`] bundles a configured `reqwest` client, an optional access
//! token and interceptors. It is cheap to clone; clones share the connection
//! pool and nothing else.
//!
//! ```rust,no_run
//! use json_fetch::prelude::*;
//! use std::collections::HashMap;
//!
//! # async fn run() -> Result<(), FetchError> {
//! let fetcher = JsonFetcher::builder()
//!     .token_auth(std::env::var("GITHUB_TOKEN").unwrap_or_default())
//!     .build()?;
//! let profile = fetcher
//!     .fetch_json(
//!         "https://api.github.com/repos/rust-lang/rust/community/profile",
//!         &HashMap::new(),
//!     )
//!     .await?;
//! println!("{}", profile["health_percentage"]);
//! # Ok(())
//! # }
//! ```

use crate::error::FetchError;
use crate::execution::executors::{self, HttpExecutionConfig};
use crate::execution::http::client::build_http_client_from_config;
use crate::execution::http::headers::HttpHeaderBuilder;
use crate::execution::http::interceptor::{HttpInterceptor, LoggingInterceptor};
use crate::types::{FetchRequest, FetchResponse, HttpConfig, JsonValue};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// How an access token is presented in the `Authorization` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenScheme {
    /// `Authorization: Bearer <token>`
    Bearer,
    /// `Authorization: token <token>` (GitHub personal access tokens)
    Token,
}

struct AccessToken {
    scheme: TokenScheme,
    secret: SecretString,
}

/// Reusable client for fetching JSON resources.
#[derive(Clone)]
pub struct JsonFetcher {
    http_config: HttpConfig,
    execution: HttpExecutionConfig,
}

impl std::fmt::Debug for JsonFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonFetcher")
            .field("http_config", &self.http_config)
            .field("execution", &self.execution)
            .finish()
    }
}

impl JsonFetcher {
    /// Client with default configuration.
    pub fn new() -> Result<Self, FetchError> {
        Self::builder().build()
    }

    pub fn builder() -> JsonFetcherBuilder {
        JsonFetcherBuilder::new()
    }

    pub fn http_config(&self) -> &HttpConfig {
        &self.http_config
    }

    /// Fetch `url` and return the raw response.
    ///
    /// Non-success statuses fail with [`FetchError::HttpStatusError`]; the
    /// body of a successful response is left for the caller to decode with
    /// [`FetchResponse::text`] or [`FetchResponse::json`].
    pub async fn fetch(
        &self,
        url: &str,
        headers: &HashMap<String, String>,
    ) -> Result<FetchResponse, FetchError> {
        executors::execute_get_request(&self.execution, url, Some(headers)).await
    }

    /// Fetch `url` and parse the body as JSON.
    pub async fn fetch_json(
        &self,
        url: &str,
        headers: &HashMap<String, String>,
    ) -> Result<JsonValue, FetchError> {
        executors::execute_get_json(&self.execution, url, Some(headers)).await
    }

    /// Fetch `url` and deserialize the JSON body into `T`.
    pub async fn fetch_json_as<T: DeserializeOwned>(
        &self,
        url: &str,
        headers: &HashMap<String, String>,
    ) -> Result<T, FetchError> {
        executors::execute_get_json_as(&self.execution, url, Some(headers)).await
    }

    /// Execute a prepared [`FetchRequest`], parsing the body as JSON.
    pub async fn execute(&self, request: &FetchRequest) -> Result<JsonValue, FetchError> {
        self.fetch_json(&request.url, &request.headers).await
    }
}

/// Builder for [`JsonFetcher`].
#[derive(Default)]
pub struct JsonFetcherBuilder {
    http_config: HttpConfig,
    http_client: Option<reqwest::Client>,
    access_token: Option<AccessToken>,
    interceptors: Vec<Arc<dyn HttpInterceptor>>,
    http_debug: bool,
}

impl JsonFetcherBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole HTTP configuration.
    pub fn http_config(mut self, config: HttpConfig) -> Self {
        self.http_config = config;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.http_config.timeout = Some(timeout);
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.http_config.connect_timeout = Some(timeout);
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.http_config.user_agent = Some(user_agent.into());
        self
    }

    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.http_config.proxy = Some(proxy.into());
        self
    }

    /// Header sent with every request.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.http_config.headers.insert(key.into(), value.into());
        self
    }

    pub fn headers(mut self, headers: HashMap<String, String>) -> Self {
        self.http_config.headers.extend(headers);
        self
    }

    /// Send `Authorization: Bearer <token>` with every request.
    pub fn bearer_auth(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(AccessToken {
            scheme: TokenScheme::Bearer,
            secret: SecretString::from(token.into()),
        });
        self
    }

    /// Send `Authorization: token <token>` with every request.
    pub fn token_auth(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(AccessToken {
            scheme: TokenScheme::Token,
            secret: SecretString::from(token.into()),
        });
        self
    }

    /// Use a caller-provided `reqwest::Client`. Timeouts, proxy and user
    /// agent from the HTTP configuration are then ignored.
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    pub fn with_interceptor(mut self, interceptor: Arc<dyn HttpInterceptor>) -> Self {
        self.interceptors.push(interceptor);
        self
    }

    /// Install a [`LoggingInterceptor`] in front of the configured ones.
    pub fn http_debug(mut self, enabled: bool) -> Self {
        self.http_debug = enabled;
        self
    }

    pub fn build(self) -> Result<JsonFetcher, FetchError> {
        let external_client = self.http_client.is_some();
        let http_client = match self.http_client {
            Some(client) => client,
            None => build_http_client_from_config(&self.http_config)?,
        };

        // A caller-provided client does not carry the configured headers.
        let mut header_builder = HttpHeaderBuilder::new();
        if external_client {
            header_builder = header_builder.with_custom_headers(&self.http_config.headers)?;
        }
        // The access token wins over a configured `Authorization` header.
        if let Some(token) = &self.access_token {
            let secret = token.secret.expose_secret();
            header_builder = match token.scheme {
                TokenScheme::Bearer => header_builder.with_bearer_auth(secret)?,
                TokenScheme::Token => header_builder.with_token_auth(secret)?,
            };
        }

        let mut interceptors: Vec<Arc<dyn HttpInterceptor>> = Vec::new();
        if self.http_debug {
            interceptors.push(Arc::new(LoggingInterceptor));
        }
        interceptors.extend(self.interceptors);

        Ok(JsonFetcher {
            http_config: self.http_config,
            execution: HttpExecutionConfig {
                http_client,
                base_headers: header_builder.build(),
                interceptors,
            },
        })
    }
}
