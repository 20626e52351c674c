//! GET executor.
//!
//! Runs a fetch through its stages: validate, send, receive, and (for the
//! JSON entry points) decode and parse. Each stage either completes or fails
//! the whole call; interceptors are notified of every failure.

use super::HttpExecutionConfig;
use super::body;
use crate::error::FetchError;
use crate::execution::http::headers::merge_headers;
use crate::execution::http::interceptor::HttpRequestContext;
use crate::observability::tracing::RequestTracer;
use crate::types::{FetchResponse, JsonValue, parse_url};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::time::Instant;

/// GET request returning the fully buffered response.
///
/// Non-success statuses are turned into [`FetchError::HttpStatusError`]; the
/// body of a successful response is returned undecoded.
pub async fn execute_get_request(
    config: &HttpExecutionConfig,
    url: &str,
    per_request_headers: Option<&HashMap<String, String>>,
) -> Result<FetchResponse, FetchError> {
    let ctx = HttpRequestContext::new(url);
    execute_get_request_with_ctx(config, &ctx, url, per_request_headers).await
}

/// GET request whose body is decoded as UTF-8 and parsed as JSON.
pub async fn execute_get_json(
    config: &HttpExecutionConfig,
    url: &str,
    per_request_headers: Option<&HashMap<String, String>>,
) -> Result<JsonValue, FetchError> {
    let ctx = HttpRequestContext::new(url);
    let resp = execute_get_request_with_ctx(config, &ctx, url, per_request_headers).await?;
    notify_on_err(config, &ctx, body::parse_json_body(&resp.body))
}

/// GET request whose JSON body is deserialized into `T`.
pub async fn execute_get_json_as<T: DeserializeOwned>(
    config: &HttpExecutionConfig,
    url: &str,
    per_request_headers: Option<&HashMap<String, String>>,
) -> Result<T, FetchError> {
    let ctx = HttpRequestContext::new(url);
    let resp = execute_get_request_with_ctx(config, &ctx, url, per_request_headers).await?;
    notify_on_err(config, &ctx, body::deserialize_body(&resp.body))
}

async fn execute_get_request_with_ctx(
    config: &HttpExecutionConfig,
    ctx: &HttpRequestContext,
    url: &str,
    per_request_headers: Option<&HashMap<String, String>>,
) -> Result<FetchResponse, FetchError> {
    // 1. Validate URL and headers
    let parsed_url = notify_on_err(config, ctx, parse_url(url))?;
    let effective_headers = match per_request_headers {
        Some(req_headers) => notify_on_err(
            config,
            ctx,
            merge_headers(config.base_headers.clone(), req_headers),
        )?,
        None => config.base_headers.clone(),
    };

    // 2. Build request
    let mut rb = config
        .http_client
        .get(parsed_url)
        .headers(effective_headers.clone());

    // 3. Apply interceptors
    for interceptor in &config.interceptors {
        rb = notify_on_err(
            config,
            ctx,
            interceptor.on_before_send(ctx, rb, &effective_headers),
        )?;
    }

    let tracer = RequestTracer::new(&ctx.request_id);
    tracer.trace_request_start("GET", &ctx.url);
    tracer.trace_request_headers(&effective_headers);
    let start = Instant::now();

    // 4. Send
    let resp = match rb.send().await {
        Ok(resp) => resp,
        Err(e) => {
            let error = FetchError::from(e);
            tracer.trace_request_failed(&error, start);
            return notify_on_err(config, ctx, Err(error));
        }
    };

    // 5. Non-success statuses carry the raw body back to the caller
    let status = resp.status();
    if !status.is_success() {
        let body = resp
            .bytes()
            .await
            .map(|b| b.to_vec())
            .unwrap_or_default();
        let error = FetchError::http_status(status.as_u16(), status.canonical_reason(), body);
        tracer.trace_request_failed(&error, start);
        return notify_on_err(config, ctx, Err(error));
    }

    for interceptor in &config.interceptors {
        notify_on_err(config, ctx, interceptor.on_response(ctx, &resp))?;
    }

    // 6. Read the full body
    let final_url = resp.url().clone();
    let headers = resp.headers().clone();
    let body = match resp.bytes().await {
        Ok(bytes) => bytes.to_vec(),
        Err(e) => {
            let error = FetchError::NetworkError(format!("Failed to read response body: {e}"));
            tracer.trace_request_failed(&error, start);
            return notify_on_err(config, ctx, Err(error));
        }
    };
    tracer.trace_request_complete(status.as_u16(), start, body.len());

    Ok(FetchResponse {
        url: final_url,
        status: status.as_u16(),
        headers,
        body,
        received_at: chrono::Utc::now(),
    })
}

fn notify_on_err<T>(
    config: &HttpExecutionConfig,
    ctx: &HttpRequestContext,
    result: Result<T, FetchError>,
) -> Result<T, FetchError> {
    if let Err(error) = &result {
        for interceptor in &config.interceptors {
            interceptor.on_error(ctx, error);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::execution::http::interceptor::HttpInterceptor;
    use reqwest::header::HeaderMap;
    use std::sync::{Arc, Mutex};

    struct FlagInterceptor(Arc<Mutex<bool>>);

    impl HttpInterceptor for FlagInterceptor {
        fn on_error(&self, _ctx: &HttpRequestContext, _error: &FetchError) {
            *self.0.lock().unwrap() = true;
        }
    }

    struct RequestSourceInterceptor;

    impl HttpInterceptor for RequestSourceInterceptor {
        fn on_before_send(
            &self,
            _ctx: &HttpRequestContext,
            builder: reqwest::RequestBuilder,
            _headers: &HeaderMap,
        ) -> Result<reqwest::RequestBuilder, FetchError> {
            Ok(builder.header("x-request-source", "interceptor"))
        }
    }

    fn test_config(interceptors: Vec<Arc<dyn HttpInterceptor>>) -> HttpExecutionConfig {
        HttpExecutionConfig {
            http_client: reqwest::Client::new(),
            base_headers: HeaderMap::new(),
            interceptors,
        }
    }

    #[tokio::test]
    async fn status_error_triggers_interceptor() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/err")
            .with_status(400)
            .with_body("bad request")
            .create_async()
            .await;

        let flag = Arc::new(Mutex::new(false));
        let config = test_config(vec![Arc::new(FlagInterceptor(flag.clone()))]);
        let url = format!("{}/err", server.url());

        match execute_get_request(&config, &url, None).await {
            Err(FetchError::HttpStatusError { status, body, .. }) => {
                assert_eq!(status, 400);
                assert_eq!(body, b"bad request");
            }
            other => panic!("expected HttpStatusError, got {other:?}"),
        }
        assert!(*flag.lock().unwrap(), "interceptor not triggered");
    }

    #[tokio::test]
    async fn parse_error_triggers_interceptor() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/broken")
            .with_status(200)
            .with_body("{\"a\":")
            .create_async()
            .await;

        let flag = Arc::new(Mutex::new(false));
        let config = test_config(vec![Arc::new(FlagInterceptor(flag.clone()))]);
        let url = format!("{}/broken", server.url());

        let res = execute_get_json(&config, &url, None).await;
        assert!(matches!(res, Err(FetchError::ParseError { .. })));
        assert!(*flag.lock().unwrap(), "interceptor not triggered");
    }

    #[tokio::test]
    async fn interceptor_can_add_headers() {
        let mut server = mockito::Server::new_async().await;
        let m = server
            .mock("GET", "/ok")
            .match_header("x-request-source", "interceptor")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("{\"ok\":true}")
            .expect(1)
            .create_async()
            .await;

        let config = test_config(vec![Arc::new(RequestSourceInterceptor)]);
        let url = format!("{}/ok", server.url());

        let value = execute_get_json(&config, &url, None).await.expect("json");
        assert_eq!(value["ok"], true);
        m.assert_async().await;
    }

    #[tokio::test]
    async fn per_request_headers_override_base_headers() {
        let mut server = mockito::Server::new_async().await;
        let m = server
            .mock("GET", "/auth")
            .match_header("authorization", "token per-request")
            .with_status(200)
            .with_body("[]")
            .expect(1)
            .create_async()
            .await;

        let mut config = test_config(vec![]);
        config.base_headers.insert(
            reqwest::header::AUTHORIZATION,
            reqwest::header::HeaderValue::from_static("token base"),
        );
        let headers = HashMap::from([(
            "Authorization".to_string(),
            "token per-request".to_string(),
        )]);
        let url = format!("{}/auth", server.url());

        let value = execute_get_json(&config, &url, Some(&headers))
            .await
            .expect("json");
        assert_eq!(value, serde_json::json!([]));
        m.assert_async().await;
    }

    #[tokio::test]
    async fn invalid_url_fails_before_sending() {
        let flag = Arc::new(Mutex::new(false));
        let config = test_config(vec![Arc::new(FlagInterceptor(flag.clone()))]);
        let res = execute_get_request(&config, "file:///etc/passwd", None).await;
        assert!(matches!(res, Err(FetchError::InvalidUrl(_))));
        assert!(*flag.lock().unwrap());
    }
}
