use actix_web::web;
use sea_orm::DatabaseConnection;

use crate::entities::v1::users::Model;
use crate::error::Error;
use crate::metrics::AppMetrics;
use crate::requests::v1::auth::LoginRequest;
use crate::security::PasswordHasher;

pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid username or password";

#[derive(Debug)]
pub enum Login {
    Authenticated(Model),
    InvalidCredentials,
}

/// Check credentials. Unknown email and wrong password are indistinguishable
/// to the caller and take about the same time.
#[::tracing::instrument(skip_all, fields(email = %request.email()))]
pub async fn login(
    db: &DatabaseConnection,
    hasher: &PasswordHasher,
    metrics: &AppMetrics,
    request: LoginRequest,
) -> Result<Login, Error> {
    let user = Model::find_by_email(db, request.email()).await?;
    let hasher = hasher.clone();
    let password = request.password;

    let user = web::block(move || match user {
        Some(user) => match hasher.verify(&password, &user.password) {
            Ok(true) => Some(user),
            Ok(false) => None,
            Err(e) => {
                ::tracing::error!(error = %e, user_id = %user.id, "Stored password hash is malformed");
                None
            }
        },
        None => {
            hasher.verify_dummy(&password);
            None
        }
    })
    .await?;

    metrics.record_login_attempt(user.is_some());

    match user {
        Some(user) => {
            ::tracing::info!(user_id = %user.id, "Login succeeded");
            Ok(Login::Authenticated(user))
        }
        None => {
            ::tracing::info!("Login failed");
            Ok(Login::InvalidCredentials)
        }
    }
}
