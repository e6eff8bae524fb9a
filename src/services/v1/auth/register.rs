use actix_web::web;
use sea_orm::{DatabaseConnection, SqlErr};

use crate::config::PasswordPolicy;
use crate::entities::v1::users::Model;
use crate::error::Error;
use crate::metrics::AppMetrics;
use crate::requests::Validation;
use crate::requests::v1::auth::RegisterRequest;
use crate::security::PasswordHasher;

#[derive(Debug)]
pub enum Registration {
    Created(Model),
    AlreadyRegistered,
    Invalid(Validation),
}

#[::tracing::instrument(skip_all, fields(email = %request.email()))]
pub async fn register(
    db: &DatabaseConnection,
    hasher: &PasswordHasher,
    policy: &PasswordPolicy,
    metrics: &AppMetrics,
    request: RegisterRequest,
) -> Result<Registration, Error> {
    let validation = request.validate(policy);

    if !validation.is_empty() {
        ::tracing::debug!(errors = ?validation, "Registration rejected by validation");
        metrics.record_registration("invalid");

        return Ok(Registration::Invalid(validation));
    }

    let email = request.email();

    if Model::email_exists(db, &email).await? {
        ::tracing::info!("Registration for existing email");
        metrics.record_registration("already_registered");

        return Ok(Registration::AlreadyRegistered);
    }

    let hasher = hasher.clone();
    let password = request.password;
    let hash = web::block(move || hasher.hash(&password)).await??;

    let user = match Model::new(email, hash).store(db).await {
        Ok(user) => user,
        // Lost a race with a concurrent registration of the same email.
        Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
            ::tracing::info!("Registration for existing email");
            metrics.record_registration("already_registered");

            return Ok(Registration::AlreadyRegistered);
        }
        Err(e) => {
            ::tracing::error!(error = %e, "Failed to store user");

            return Err(e.into());
        }
    };

    ::tracing::info!(user_id = %user.id, "User registered");
    metrics.record_registration("created");

    Ok(Registration::Created(user))
}
