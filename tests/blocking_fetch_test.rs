use std::collections::HashMap;

use json_fetch::FetchError;
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// The mock server lives on its own runtime; the blocking client brings its own.
fn start_server(mocks: Vec<Mock>) -> (tokio::runtime::Runtime, MockServer) {
    let rt = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()
        .unwrap();
    let server = rt.block_on(async {
        let server = MockServer::start().await;
        for mock in mocks {
            mock.mount(&server).await;
        }
        server
    });
    (rt, server)
}

#[test]
fn blocking_fetch_json_matches_async_behaviour() {
    let (_rt, server) = start_server(vec![
        Mock::given(method("GET"))
            .and(path("/profile"))
            .and(header("authorization", "token X"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"health_percentage": 100, "description": "x"})),
            ),
    ]);

    let headers = HashMap::from([("Authorization".to_string(), "token X".to_string())]);
    let url = format!("{}/profile", server.uri());
    let value = json_fetch::blocking::fetch_json(&url, &headers).expect("profile");
    assert_eq!(value, json!({"health_percentage": 100, "description": "x"}));
}

#[test]
fn blocking_fetch_reports_status_errors() {
    let (_rt, server) = start_server(vec![
        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404).set_body_string(r#"{"message":"Not Found"}"#)),
    ]);

    let url = format!("{}/missing", server.uri());
    let err = json_fetch::blocking::fetch_json(&url, &HashMap::new()).unwrap_err();
    assert!(matches!(err, FetchError::HttpStatusError { status: 404, .. }));
}

#[test]
fn blocking_client_is_reusable() {
    let (_rt, server) = start_server(vec![
        Mock::given(method("GET"))
            .and(path("/items"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([1, 2]))),
    ]);

    let fetcher = json_fetch::blocking::JsonFetcher::new().unwrap();
    let url = format!("{}/items", server.uri());
    for _ in 0..3 {
        let items: Vec<u32> = fetcher.fetch_json_as(&url, &HashMap::new()).unwrap();
        assert_eq!(items, vec![1, 2]);
    }

    let raw = fetcher.fetch(&url, &HashMap::new()).unwrap();
    assert_eq!(raw.status, 200);
}
