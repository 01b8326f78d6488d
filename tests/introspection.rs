//! Built-in `/` and `/mocky/*` endpoints.

use std::io::Write;

use mocky::config::MockyConfig;
use reqwest::StatusCode;
use serde_json::{json, Value};

mod common;

#[tokio::test]
async fn test_root_health_info() {
    let server = common::start_mocky(&common::fixture("openapi.yaml"), MockyConfig::default()).await;
    let client = common::client();

    let body: Value = client.get(server.url("/")).send().await.unwrap().json().await.unwrap();
    assert_eq!(body, json!({ "message": "Are you meant to be here?" }));

    let body: Value = client
        .get(server.url("/mocky/health"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body, json!({ "status": "ok" }));

    let body: Value = client
        .get(server.url("/mocky/info"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["name"], "Mocky");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_routes_listing_in_table_order() {
    let server = common::start_mocky(&common::fixture("openapi.yaml"), MockyConfig::default()).await;
    let client = common::client();

    let routes: Vec<Value> = client
        .get(server.url("/mocky/routes"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let pairs: Vec<(String, String)> = routes
        .iter()
        .map(|r| {
            (
                r["method"].as_str().unwrap().to_string(),
                r["path"].as_str().unwrap().to_string(),
            )
        })
        .collect();
    assert_eq!(
        pairs,
        vec![
            ("GET".to_string(), "/items".to_string()),
            ("POST".to_string(), "/items".to_string()),
            ("GET".to_string(), "/items/{id}".to_string()),
            ("DELETE".to_string(), "/items/{id}".to_string()),
            ("GET".to_string(), "/status".to_string()),
        ]
    );
    assert_eq!(routes[0]["summary"], "List items");
    assert_eq!(routes[2]["responses"], json!(["200", "404"]));
    assert_eq!(routes[4]["summary"], "");
}

#[tokio::test]
async fn test_non_get_on_builtins_is_not_found() {
    let server = common::start_mocky(&common::fixture("openapi.yaml"), MockyConfig::default()).await;
    let client = common::client();

    for (method, path) in [("POST", "/"), ("DELETE", "/mocky/health"), ("PUT", "/mocky/routes")] {
        let res = client
            .request(reqwest::Method::from_bytes(method.as_bytes()).unwrap(), server.url(path))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND, "{method} {path}");
        let body: Value = res.json().await.unwrap();
        assert_eq!(
            body,
            json!({ "error": "Not Found", "method": method, "path": path })
        );
    }
}

#[tokio::test]
async fn test_metrics_not_found_when_disabled() {
    let server = common::start_mocky(&common::fixture("openapi.yaml"), MockyConfig::default()).await;
    let res = common::client()
        .get(server.url("/mocky/metrics"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_spec_root_route_replaces_builtin() {
    let mut spec = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    write!(
        spec,
        "openapi: 3.0.3\npaths:\n  /:\n    get:\n      responses:\n        '200':\n          content:\n            application/json:\n              example: {{ welcome: true }}\n"
    )
    .unwrap();

    let server = common::start_mocky(spec.path(), MockyConfig::default()).await;
    let body: Value = common::client()
        .get(server.url("/"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body, json!({ "welcome": true }));
}

#[tokio::test]
async fn test_custom_info_from_config() {
    let mut config = MockyConfig::default();
    config.info.company = "Example Corp".into();

    let server = common::start_mocky(&common::fixture("openapi.json"), config).await;
    let body: Value = common::client()
        .get(server.url("/mocky/info"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["company"], "Example Corp");
}
