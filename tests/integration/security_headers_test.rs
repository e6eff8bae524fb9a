//! Integration tests for the security headers middleware
//!
//! Headers must be present on rendered pages, redirects and error responses
//! of the wired application, and follow the configuration.

use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest, call_service};
use actix_web::{App, HttpResponse, web};
use lighter_web::config::SecurityHeadersConfig;
use lighter_web::security::SecurityHeadersMiddleware;

const REQUIRED_HEADERS: [&str; 4] = [
    "content-security-policy",
    "x-frame-options",
    "x-content-type-options",
    "referrer-policy",
];

/// Pages, redirects, JSON and 404s of the real application all carry the headers
#[actix_web::test]
async fn test_security_headers_on_application_routes() {
    let (service, _db) = lighter_web::service!();

    let cases = [
        ("/", StatusCode::OK),
        ("/login", StatusCode::OK),
        ("/register", StatusCode::OK),
        ("/dashboard", StatusCode::FOUND),
        ("/health", StatusCode::OK),
        ("/does-not-exist", StatusCode::NOT_FOUND),
    ];

    for (path, status) in cases {
        let req = TestRequest::get().uri(path).to_request();
        let resp = call_service(&service, req).await;

        assert_eq!(resp.status(), status, "unexpected status for {}", path);

        for header in REQUIRED_HEADERS {
            assert!(
                resp.headers().contains_key(header),
                "{} missing on {}",
                header,
                path
            );
        }
    }
}

/// Default configuration values
#[actix_web::test]
async fn test_security_header_values_match_config() {
    let (service, _db) = lighter_web::service!();

    let req = TestRequest::get().uri("/").to_request();
    let resp = call_service(&service, req).await;
    let headers = resp.headers();

    assert_eq!(headers.get("x-frame-options").unwrap(), "DENY");
    assert_eq!(headers.get("x-content-type-options").unwrap(), "nosniff");
    assert_eq!(
        headers.get("referrer-policy").unwrap(),
        "strict-origin-when-cross-origin"
    );
    assert_eq!(
        headers.get("content-security-policy").unwrap(),
        "default-src 'self'; form-action 'self'; frame-ancestors 'none'"
    );
    assert!(!headers.contains_key("strict-transport-security"));
}

/// Session cookie is HttpOnly and SameSite=Lax
#[actix_web::test]
async fn test_session_cookie_attributes() {
    let (service, _db) = lighter_web::service!();

    let req = TestRequest::get().uri("/dashboard").to_request();
    let resp = call_service(&service, req).await;

    let cookie = resp
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie should be set");

    assert_eq!(cookie.http_only(), Some(true));
    assert_eq!(
        cookie.same_site(),
        Some(actix_web::cookie::SameSite::Lax)
    );
    assert!(!cookie.value().contains("_flashes"), "cookie content must be encrypted");
}

#[actix_web::test]
async fn test_custom_hsts_and_frame_options() {
    let config = SecurityHeadersConfig {
        hsts_max_age: 31536000,
        x_frame_options: "SAMEORIGIN".to_string(),
        ..SecurityHeadersConfig::default()
    };

    let app = test::init_service(
        App::new()
            .wrap(SecurityHeadersMiddleware::new(config))
            .route("/test", web::get().to(|| async { HttpResponse::Ok().body("OK") })),
    )
    .await;

    let req = TestRequest::get().uri("/test").to_request();
    let resp = call_service(&app, req).await;

    assert_eq!(
        resp.headers().get("strict-transport-security").unwrap(),
        "max-age=31536000; includeSubDomains"
    );
    assert_eq!(resp.headers().get("x-frame-options").unwrap(), "SAMEORIGIN");
}

/// Handler-set headers survive
#[actix_web::test]
async fn test_security_headers_preserve_existing_headers() {
    let app = test::init_service(
        App::new()
            .wrap(SecurityHeadersMiddleware::new(SecurityHeadersConfig::default()))
            .route(
                "/test",
                web::get().to(|| async {
                    HttpResponse::Ok()
                        .insert_header(("X-Custom-Header", "CustomValue"))
                        .body("OK")
                }),
            ),
    )
    .await;

    let req = TestRequest::get().uri("/test").to_request();
    let resp = call_service(&app, req).await;

    assert_eq!(resp.headers().get("x-custom-header").unwrap(), "CustomValue");
    assert!(resp.headers().contains_key("content-security-policy"));
}

#[actix_web::test]
async fn test_empty_csp_not_added() {
    let config = SecurityHeadersConfig {
        csp: String::new(),
        ..SecurityHeadersConfig::default()
    };

    let app = test::init_service(
        App::new()
            .wrap(SecurityHeadersMiddleware::new(config))
            .route("/test", web::get().to(|| async { HttpResponse::Ok().body("OK") })),
    )
    .await;

    let req = TestRequest::get().uri("/test").to_request();
    let resp = call_service(&app, req).await;

    assert!(!resp.headers().contains_key("content-security-policy"));
    assert!(resp.headers().contains_key("x-frame-options"));
}
