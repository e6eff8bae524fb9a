//! Integration tests for the login guard
//!
//! Protected pages redirect anonymous clients to `/login?next=<path>` and
//! leave a flash for the login page.

use actix_web::http::StatusCode;
use lighter_web::testing::{Browser, body_text, location, setup};
use serde_json::json;
use uuid::Uuid;

#[actix_web::test]
async fn test_index_links_to_login_and_register() {
    let (service, _db) = lighter_web::service!();
    let mut browser = Browser::new(service);

    let resp = browser.get("/").await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = body_text(resp).await;
    assert!(body.contains("href=\"/login\""));
    assert!(body.contains("href=\"/register\""));
}

#[actix_web::test]
async fn test_auth_pages_status() {
    let (service, _db) = lighter_web::service!();
    let mut browser = Browser::new(service);

    assert_eq!(browser.get("/dashboard").await.status(), StatusCode::FOUND);
    assert_eq!(browser.get("/register").await.status(), StatusCode::OK);
    assert_eq!(browser.get("/login").await.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_deny_dashboard_access() {
    let (service, _db) = lighter_web::service!();
    let mut browser = Browser::new(service);

    let resp = browser.get("/dashboard").await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(
        location(&resp).as_deref(),
        Some("/login?next=%2Fdashboard")
    );

    let body = body_text(browser.get("/login?next=%2Fdashboard").await).await;
    assert!(body.contains("Please log in to access this page."));
    assert!(body.contains("action=\"/login?next=%2Fdashboard\""));
}

#[actix_web::test]
async fn test_deny_flash_survives_plain_login_page() {
    let (service, _db) = lighter_web::service!();
    let mut browser = Browser::new(service);

    let resp = browser.get("/dashboard").await;
    assert_eq!(resp.status(), StatusCode::FOUND);

    // The flash rides in the session cookie, not the query string
    let body = body_text(browser.get("/login").await).await;
    assert!(body.contains("Please log in to access this page."));

    let body = body_text(browser.get("/login").await).await;
    assert!(!body.contains("Please log in to access this page."));
}

#[actix_web::test]
async fn test_deny_logout_when_anonymous() {
    let (service, _db) = lighter_web::service!();
    let mut browser = Browser::new(service);

    let resp = browser.get("/logout").await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp).as_deref(), Some("/login?next=%2Flogout"));
}

#[actix_web::test]
async fn test_deny_keeps_query_in_next() {
    let (service, _db) = lighter_web::service!();
    let mut browser = Browser::new(service);

    let resp = browser.get("/dashboard?tab=1").await;
    assert_eq!(
        location(&resp).as_deref(),
        Some("/login?next=%2Fdashboard%3Ftab%3D1")
    );
}

#[actix_web::test]
async fn test_dashboard_access_when_logged_in() {
    let (service, db) = lighter_web::service!();
    let hasher = setup::password_hasher().unwrap();
    setup::create_test_user(&db, &hasher, "email@email.com", "0123456").await;
    let mut browser = Browser::new(service);

    assert_eq!(browser.get("/login").await.status(), StatusCode::OK);

    let resp = browser
        .post(
            "/login",
            &json!({ "email": "email@email.com", "password": "0123456" }),
        )
        .await;
    assert_eq!(location(&resp).as_deref(), Some("/dashboard"));

    let resp = browser.get("/dashboard").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_text(resp).await.contains("email@email.com"));
}

#[actix_web::test]
async fn test_authenticated_login_and_register_redirect_to_dashboard() {
    let (service, db) = lighter_web::service!();
    let hasher = setup::password_hasher().unwrap();
    setup::create_test_user(&db, &hasher, "email@email.com", "0123456").await;
    let mut browser = Browser::new(service);

    browser
        .post(
            "/login",
            &json!({ "email": "email@email.com", "password": "0123456" }),
        )
        .await;

    let resp = browser.get("/login").await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp).as_deref(), Some("/dashboard"));

    let resp = browser.get("/register").await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp).as_deref(), Some("/dashboard"));
}

#[actix_web::test]
async fn test_session_for_deleted_user_is_rejected() {
    use lighter_web::entities::v1::users;
    use sea_orm::EntityTrait;

    let (service, db) = lighter_web::service!();
    let hasher = setup::password_hasher().unwrap();
    let user = setup::create_test_user(&db, &hasher, "email@email.com", "0123456").await;
    let mut browser = Browser::new(service);

    browser
        .post(
            "/login",
            &json!({ "email": "email@email.com", "password": "0123456" }),
        )
        .await;

    users::Entity::delete_by_id(user.id).exec(&db).await.unwrap();

    let resp = browser.get("/dashboard").await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(
        location(&resp).as_deref(),
        Some("/login?next=%2Fdashboard")
    );

    let session = browser.session().await;
    assert!(!session.contains_key("_user_id"));
}

#[actix_web::test]
async fn test_forged_cookie_is_anonymous() {
    use actix_web::cookie::Cookie;
    use actix_web::test::TestRequest;

    let (service, _db) = lighter_web::service!();
    let mut browser = Browser::new(service);

    let forged = format!("{{\"_user_id\":\"\\\"{}\\\"\"}}", Uuid::new_v4());
    let resp = browser
        .send(
            TestRequest::get()
                .uri("/dashboard")
                .cookie(Cookie::new("session", forged)),
        )
        .await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(
        location(&resp).as_deref(),
        Some("/login?next=%2Fdashboard")
    );
}
