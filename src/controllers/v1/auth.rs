use actix_session::Session;
use actix_web::{HttpResponse, get, post};
use actix_web::web::{Data, Form, Query};
use sea_orm::DatabaseConnection;
use serde_json::json;

use crate::config::AuthConfig;
use crate::error::Error;
use crate::metrics::AppMetrics;
use crate::middlewares::v1::auth::{Auth, is_safe_next};
use crate::requests::Validation;
use crate::requests::v1::auth::{LoginRequest, NextQuery, RegisterRequest};
use crate::security::PasswordHasher;
use crate::services;
use crate::services::v1::auth::login::INVALID_CREDENTIALS_MESSAGE;
use crate::services::v1::auth::{Login, Registration};
use crate::session::{self, Category, flash};
use crate::views::{Layout, Views, redirect};

pub const REGISTERED_MESSAGE: &str = "Congratulations, you are now a registered user!";
pub const ALREADY_REGISTERED_MESSAGE: &str = "Already Registered";
pub const WELCOME_MESSAGE: &str = "Welcome";
pub const LOGGED_OUT_MESSAGE: &str = "You have been logged out.";

const DASHBOARD: &str = "/dashboard";

#[get("/register")]
pub async fn register_form(
    session: Session,
    db: Data<DatabaseConnection>,
    views: Data<Views>,
) -> Result<HttpResponse, Error> {
    if Auth::current(&session, &db).await?.is_some() {
        return Ok(redirect(DASHBOARD));
    }

    register_page(&views, &session, "", &Validation::new())
}

/// Fail if:
/// - email is empty or malformed
/// - password length is outside the configured bounds
/// - password and confirmation differ
#[post("/register")]
pub async fn register(
    session: Session,
    db: Data<DatabaseConnection>,
    views: Data<Views>,
    hasher: Data<PasswordHasher>,
    config: Data<AuthConfig>,
    metrics: Data<AppMetrics>,
    Form(request): Form<RegisterRequest>,
) -> Result<HttpResponse, Error> {
    let email = request.email.clone();

    match services::v1::auth::register(&db, &hasher, &config.password, &metrics, request).await? {
        Registration::Created(_) => {
            flash::push(&session, Category::Success, REGISTERED_MESSAGE)?;
            Ok(redirect("/login"))
        }
        Registration::AlreadyRegistered => {
            flash::push(&session, Category::Warning, ALREADY_REGISTERED_MESSAGE)?;
            Ok(redirect("/login"))
        }
        Registration::Invalid(validation) => register_page(&views, &session, &email, &validation),
    }
}

#[get("/login")]
pub async fn login_form(
    session: Session,
    db: Data<DatabaseConnection>,
    views: Data<Views>,
    Query(query): Query<NextQuery>,
) -> Result<HttpResponse, Error> {
    if Auth::current(&session, &db).await?.is_some() {
        return Ok(redirect(&after_login(query.next.as_deref())));
    }

    login_page(&views, &session, "", &[], query.next.as_deref())
}

/// Fail if:
/// - email is unknown
/// - password is incorrect
#[post("/login")]
pub async fn login(
    session: Session,
    db: Data<DatabaseConnection>,
    views: Data<Views>,
    hasher: Data<PasswordHasher>,
    metrics: Data<AppMetrics>,
    Query(query): Query<NextQuery>,
    Form(request): Form<LoginRequest>,
) -> Result<HttpResponse, Error> {
    let email = request.email.clone();

    match services::v1::auth::login(&db, &hasher, &metrics, request).await? {
        Login::Authenticated(user) => {
            session::login(&session, user.id)?;
            flash::push(&session, Category::Success, WELCOME_MESSAGE)?;

            Ok(redirect(&after_login(query.next.as_deref())))
        }
        Login::InvalidCredentials => login_page(
            &views,
            &session,
            &email,
            &[INVALID_CREDENTIALS_MESSAGE],
            query.next.as_deref(),
        ),
    }
}

#[get("/logout")]
pub async fn logout(
    auth: Auth,
    session: Session,
    metrics: Data<AppMetrics>,
) -> Result<HttpResponse, Error> {
    services::v1::auth::logout(&session, &auth.user, &metrics);
    flash::push(&session, Category::Message, LOGGED_OUT_MESSAGE)?;

    Ok(redirect("/login"))
}

fn after_login(next: Option<&str>) -> String {
    match next {
        Some(next) if is_safe_next(next) => next.to_string(),
        _ => DASHBOARD.to_string(),
    }
}

fn register_page(
    views: &Views,
    session: &Session,
    email: &str,
    validation: &Validation,
) -> Result<HttpResponse, Error> {
    let layout = Layout::new("Register").flashes(flash::take(session));

    views.page(
        "register",
        layout,
        json!({ "email": email, "errors": validation }),
    )
}

fn login_page(
    views: &Views,
    session: &Session,
    email: &str,
    errors: &[&str],
    next: Option<&str>,
) -> Result<HttpResponse, Error> {
    let layout = Layout::new("Login").flashes(flash::take(session));
    let next = next
        .filter(|next| is_safe_next(next))
        .map(|next| urlencoding::encode(next).into_owned());

    views.page(
        "login",
        layout,
        json!({ "email": email, "errors": errors, "next": next }),
    )
}
