//! XSS prevention in rendered pages
//!
//! User input echoed back into a form, or stored and shown later, must come
//! out HTML-escaped.

use actix_web::http::StatusCode;
use lighter_web::entities::v1::users::Model;
use lighter_web::testing::{Browser, body_text, setup};
use serde_json::json;

#[actix_web::test]
async fn test_xss_in_register_email_is_escaped() {
    let (service, _db) = lighter_web::service!();
    let mut browser = Browser::new(service);

    let payload = "<script>alert('XSS')</script>";
    let resp = browser
        .post(
            "/register",
            &json!({ "email": payload, "password": "0123456", "confirm": "0123456" }),
        )
        .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = body_text(resp).await;
    assert!(!body.contains("<script>"));
    assert!(body.contains("&lt;script&gt;"));
}

#[actix_web::test]
async fn test_xss_attribute_breakout_in_login_email_is_escaped() {
    let (service, _db) = lighter_web::service!();
    let mut browser = Browser::new(service);

    let payload = "\" onfocus=\"alert(1)\" autofocus=\"";
    let resp = browser
        .post("/login", &json!({ "email": payload, "password": "0123456" }))
        .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = body_text(resp).await;
    assert!(!body.contains("onfocus=\"alert(1)\""));
    assert!(body.contains("&quot;"));
}

#[actix_web::test]
async fn test_stored_email_is_escaped_on_dashboard() {
    let (service, db) = lighter_web::service!();
    let hasher = setup::password_hasher().unwrap();
    let mut browser = Browser::new(service);

    // Bypasses registration validation to simulate a hostile stored value.
    let email = "<img src=x onerror=alert(1)>@email.com";
    let hash = hasher.hash("0123456").unwrap();
    Model::new(email, hash).store(&db).await.unwrap();

    let resp = browser
        .post("/login", &json!({ "email": email, "password": "0123456" }))
        .await;
    assert_eq!(resp.status(), StatusCode::FOUND);

    let body = body_text(browser.get("/dashboard").await).await;
    assert!(!body.contains("<img"));
    assert!(body.contains("&lt;img"));
}

#[actix_web::test]
async fn test_xss_in_next_parameter_is_not_reflected() {
    let (service, _db) = lighter_web::service!();
    let mut browser = Browser::new(service);

    let resp = browser
        .get("/login?next=%22%3E%3Cscript%3Ealert(1)%3C%2Fscript%3E")
        .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = body_text(resp).await;
    assert!(!body.contains("<script>"));
    assert!(body.contains("action=\"/login\""));
}
