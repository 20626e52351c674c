//! Blocking API
//!
//! Synchronous wrappers that drive the async client on a private
//! current-thread tokio runtime. They must not be called from inside an
//! async runtime; doing so fails with [`FetchError::ConfigurationError`].
//! A client may still be dropped anywhere, including inside async code.

use crate::client::JsonFetcherBuilder;
use crate::error::FetchError;
use crate::types::{FetchResponse, JsonValue};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::future::Future;

/// Blocking counterpart of [`crate::client::JsonFetcher`].
#[derive(Debug)]
pub struct JsonFetcher {
    inner: crate::client::JsonFetcher,
    // Always `Some` until dropped.
    runtime: Option<tokio::runtime::Runtime>,
}

impl JsonFetcher {
    /// Client with default configuration.
    pub fn new() -> Result<Self, FetchError> {
        Self::from_builder(crate::client::JsonFetcher::builder())
    }

    /// Build from a configured async builder.
    pub fn from_builder(builder: JsonFetcherBuilder) -> Result<Self, FetchError> {
        ensure_outside_runtime()?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| FetchError::ConfigurationError(format!("Failed to start runtime: {e}")))?;
        // Build inside the runtime context.
        let inner = {
            let _guard = runtime.enter();
            builder.build()?
        };
        Ok(Self {
            inner,
            runtime: Some(runtime),
        })
    }

    pub fn fetch(
        &self,
        url: &str,
        headers: &HashMap<String, String>,
    ) -> Result<FetchResponse, FetchError> {
        self.block_on(self.inner.fetch(url, headers))
    }

    pub fn fetch_json(
        &self,
        url: &str,
        headers: &HashMap<String, String>,
    ) -> Result<JsonValue, FetchError> {
        self.block_on(self.inner.fetch_json(url, headers))
    }

    pub fn fetch_json_as<T: DeserializeOwned>(
        &self,
        url: &str,
        headers: &HashMap<String, String>,
    ) -> Result<T, FetchError> {
        self.block_on(self.inner.fetch_json_as(url, headers))
    }

    fn block_on<F, T>(&self, future: F) -> Result<T, FetchError>
    where
        F: Future<Output = Result<T, FetchError>>,
    {
        ensure_outside_runtime()?;
        let runtime = self.runtime.as_ref().ok_or_else(|| {
            FetchError::ConfigurationError("blocking runtime already shut down".to_string())
        })?;
        runtime.block_on(future)
    }
}

impl Drop for JsonFetcher {
    fn drop(&mut self) {
        // Dropping a runtime blocks, which tokio forbids inside async code.
        if let Some(runtime) = self.runtime.take() {
            runtime.shutdown_background();
        }
    }
}

fn ensure_outside_runtime() -> Result<(), FetchError> {
    if tokio::runtime::Handle::try_current().is_ok() {
        return Err(FetchError::ConfigurationError(
            "blocking fetch called from within an async runtime; use the async API instead"
                .to_string(),
        ));
    }
    Ok(())
}

/// Fetch `url` with default settings and return the raw response.
pub fn fetch(url: &str, headers: &HashMap<String, String>) -> Result<FetchResponse, FetchError> {
    JsonFetcher::new()?.fetch(url, headers)
}

/// Fetch `url` with default settings and parse the body as JSON.
pub fn fetch_json(url: &str, headers: &HashMap<String, String>) -> Result<JsonValue, FetchError> {
    JsonFetcher::new()?.fetch_json(url, headers)
}

/// Fetch `url` with default settings and deserialize the body into `T`.
pub fn fetch_json_as<T: DeserializeOwned>(
    url: &str,
    headers: &HashMap<String, String>,
) -> Result<T, FetchError> {
    JsonFetcher::new()?.fetch_json_as(url, headers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn refuses_to_run_inside_async_runtime() {
        let res = fetch_json("http://127.0.0.1:9/", &HashMap::new());
        assert!(matches!(res, Err(FetchError::ConfigurationError(_))));
    }

    #[test]
    fn client_can_be_dropped_inside_async_code() {
        let fetcher = JsonFetcher::new().unwrap();
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async move { drop(fetcher) });
    }

    #[tokio::test]
    async fn client_built_outside_can_be_dropped_in_async_test() {
        let fetcher = std::thread::spawn(JsonFetcher::new)
            .join()
            .unwrap()
            .unwrap();
        drop(fetcher);
    }

    #[test]
    fn invalid_url_is_reported_synchronously() {
        let res = fetch_json("ftp://example.com/data.json", &HashMap::new());
        assert!(matches!(res, Err(FetchError::InvalidUrl(_))));
    }
}
