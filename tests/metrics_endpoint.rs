//! Telemetry enabled end to end. Kept in its own test binary because the
//! Prometheus recorder is process-global.

use mocky::config::MockyConfig;
use reqwest::StatusCode;

mod common;

#[tokio::test]
async fn test_dispatch_metrics_exported() {
    let mut config = MockyConfig::default();
    config.observability.metrics_enabled = true;

    let server = common::start_mocky(&common::fixture("openapi.yaml"), config).await;
    let client = common::client();

    assert_eq!(
        client.get(server.url("/items")).send().await.unwrap().status(),
        StatusCode::OK
    );
    assert_eq!(
        client.get(server.url("/nope")).send().await.unwrap().status(),
        StatusCode::NOT_FOUND
    );

    let res = client.get(server.url("/mocky/metrics")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let text = res.text().await.unwrap();

    assert!(text.contains("mocky_requests_total"), "{text}");
    assert!(text.contains("route=\"/items\""), "{text}");
    assert!(text.contains("route=\"unmatched\""), "{text}");
    assert!(text.contains("mocky_routes_registered_total 5"), "{text}");
}
