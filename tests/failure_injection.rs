//! Failure injection tests: broken inputs at startup and hostile requests at runtime.

use std::io::Write;
use std::path::Path;

use mocky::config::MockyConfig;
use mocky::lifecycle::{Startup, StartupError};
use mocky::routing::SpecError;
use reqwest::StatusCode;
use serde_json::{json, Value};

mod common;

fn spec_file(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

async fn startup_error(spec: &Path, config: MockyConfig) -> StartupError {
    match Startup::new(spec, config).prepare().await {
        Ok(_) => panic!("startup should fail for {}", spec.display()),
        Err(e) => e,
    }
}

fn local_config() -> MockyConfig {
    let mut config = MockyConfig::default();
    config.listener.host = "127.0.0.1".into();
    config.listener.port = 0;
    config
}

#[tokio::test]
async fn test_missing_spec_file() {
    let err = startup_error(Path::new("/definitely/not/here.yaml"), local_config()).await;
    assert!(matches!(err, StartupError::SpecLoad(_)), "{err}");
}

#[tokio::test]
async fn test_unparseable_spec() {
    let file = spec_file(".yaml", "paths: [unclosed\n");
    let err = startup_error(file.path(), local_config()).await;
    assert!(matches!(err, StartupError::SpecLoad(_)), "{err}");
}

#[tokio::test]
async fn test_swagger_two_rejected() {
    let file = spec_file(".json", r#"{"swagger": "2.0", "paths": {}}"#);
    let err = startup_error(file.path(), local_config()).await;
    assert!(
        matches!(err, StartupError::Spec(SpecError::UnsupportedVersion(_))),
        "{err}"
    );
}

#[tokio::test]
async fn test_malformed_template_rejected() {
    let file = spec_file(
        ".yaml",
        "openapi: 3.0.0\npaths:\n  /items/{id:\n    get:\n      responses: {}\n",
    );
    let err = startup_error(file.path(), local_config()).await;
    assert!(
        matches!(err, StartupError::Spec(SpecError::InvalidTemplate { .. })),
        "{err}"
    );
}

#[tokio::test]
async fn test_invalid_status_key_rejected() {
    let file = spec_file(
        ".yaml",
        "openapi: 3.0.0\npaths:\n  /items:\n    get:\n      responses:\n        '999':\n          description: nope\n",
    );
    let err = startup_error(file.path(), local_config()).await;
    assert!(
        matches!(err, StartupError::Spec(SpecError::InvalidStatus { .. })),
        "{err}"
    );
}

#[tokio::test]
async fn test_port_in_use() {
    let taken = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let mut config = local_config();
    config.listener.port = taken.local_addr().unwrap().port();

    let err = startup_error(&common::fixture("openapi.yaml"), config).await;
    assert!(matches!(err, StartupError::Bind { .. }), "{err}");
}

#[tokio::test]
async fn test_informational_status_is_json_500() {
    let file = spec_file(
        ".yaml",
        "openapi: 3.0.0\npaths:\n  /info1:\n    get:\n      responses:\n        '1XX':\n          content:\n            application/json:\n              example: {a: 1}\n",
    );
    let server = common::start_mocky(file.path(), MockyConfig::default()).await;
    let client = common::client();

    let res = client.get(server.url("/info1")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!({ "error": "Internal Server Error" }));

    let res = client.get(server.url("/info1")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_unusable_status_override_is_ignored() {
    let server = common::start_mocky(&common::fixture("openapi.yaml"), MockyConfig::default()).await;
    let client = common::client();

    for value in ["abc", "503", "   "] {
        let res = client
            .get(server.url("/items/1"))
            .header("x-mocky-status", value)
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK, "override {value:?}");
        let body: Value = res.json().await.unwrap();
        assert_eq!(body, json!({ "id": 1, "name": "Item 1" }));
    }
}

#[tokio::test]
async fn test_oversized_body_rejected_and_server_survives() {
    let mut config = MockyConfig::default();
    config.limits.max_body_bytes = 16;

    let server = common::start_mocky(&common::fixture("openapi.yaml"), config).await;
    let client = common::client();

    let res = client
        .post(server.url("/items"))
        .body(vec![b'x'; 1024])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::PAYLOAD_TOO_LARGE);

    let res = client.get(server.url("/items")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_odd_methods_and_paths_miss_cleanly() {
    let server = common::start_mocky(&common::fixture("openapi.yaml"), MockyConfig::default()).await;
    let client = common::client();

    let res = client
        .request(reqwest::Method::OPTIONS, server.url("/items"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = client
        .request(
            reqwest::Method::from_bytes(b"PURGE").unwrap(),
            server.url("/items"),
        )
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = client
        .get(server.url("/items/%7Bid%7D/deeper/still"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = client.get(server.url("/items")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}
