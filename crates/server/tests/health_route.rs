//! Endpoint tests for `/healthz`.

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use ratecss_server::config::ServerConfig;
use ratecss_server::routes::router;
use serde_json::Value;
use tower::ServiceExt;

#[tokio::test]
async fn health_reports_ok_with_version_and_uptime() {
    let response = router(ServerConfig::default())
        .oneshot(
            Request::builder()
                .uri("/healthz")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let payload: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(payload["status"], "ok");
    assert_eq!(payload["version"], env!("CARGO_PKG_VERSION"));
    assert!(payload["uptime_secs"].is_u64());
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let response = router(ServerConfig::default())
        .oneshot(
            Request::builder()
                .uri("/ratecss/unknown")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
