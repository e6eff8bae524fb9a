//! Integration tests for health check and metrics endpoints
//!
//! - /health (liveness check)
//! - /health/db (database connectivity)
//! - /metrics (Prometheus exposition)

use actix_web::http::StatusCode;
use actix_web::test::{TestRequest, call_service, read_body};
use serde_json::Value;

// =============================================================================
// LIVENESS TESTS - /health endpoint
// =============================================================================

#[actix_web::test]
async fn test_health_endpoint_returns_200_ok() {
    let (service, _db) = lighter_web::service!();

    let req = TestRequest::get().uri("/health").to_request();
    let resp = call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::OK, "/health should always return 200 OK");

    let body = read_body(resp).await;
    let body: Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(body["status"], "healthy");
    let timestamp = body["timestamp"].as_str().unwrap();
    assert!(timestamp.contains('T'), "Timestamp should be in ISO 8601 format");
}

// =============================================================================
// DATABASE TESTS - /health/db endpoint
// =============================================================================

#[actix_web::test]
async fn test_health_db_reports_connected() {
    let (service, _db) = lighter_web::service!();

    let req = TestRequest::get().uri("/health/db").to_request();
    let resp = call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = read_body(resp).await;
    let body: Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "connected");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[actix_web::test]
async fn test_health_db_reports_unavailable_after_close() {
    let (service, db) = lighter_web::service!();

    db.clone().close().await.unwrap();

    let req = TestRequest::get().uri("/health/db").to_request();
    let resp = call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

    let body = read_body(resp).await;
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["database"], "disconnected");
}

// =============================================================================
// METRICS - /metrics endpoint
// =============================================================================

#[actix_web::test]
async fn test_metrics_reflect_auth_activity() {
    let (service, _db) = lighter_web::service!();

    let req = TestRequest::post()
        .uri("/login")
        .set_form([("email", "nobody@email.com"), ("password", "0123456")])
        .to_request();
    let resp = call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = TestRequest::get().uri("/metrics").to_request();
    let resp = call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = read_body(resp).await;
    let body = std::str::from_utf8(&body).unwrap();

    assert!(body.contains("auth_login_attempts_total{result=\"failure\"}"));
    assert!(body.contains("http_requests_total"));
    assert!(body.contains("path=\"/login\""));
}
