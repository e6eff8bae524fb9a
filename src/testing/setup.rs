use sea_orm::DatabaseConnection;

use crate::config::{AppConfig, Argon2Config, AuthConfig};
use crate::database;
use crate::entities::v1::users;
use crate::security::PasswordHasher;
use crate::server::AppState;

/// Returns an in-memory SQLite database with all migrations applied
///
/// Every call is a separate, empty database.
///
/// # Panics
/// Panics if the connection or the migrations fail. Tests should fail fast
/// when setup is broken.
pub async fn database() -> DatabaseConnection {
    database::memory()
        .await
        .expect("Failed to open in-memory database")
}

/// Argon2 parameters cheap enough to hash on every test.
///
/// - memory_cost: 19456 KiB (instead of 64 MiB)
/// - time_cost: 1 iteration (instead of 3)
/// - parallelism: 1 lane (instead of 4)
pub fn auth_config() -> AuthConfig {
    AuthConfig {
        argon2: Argon2Config {
            memory_cost: 19456,
            time_cost: 1,
            parallelism: 1,
            hash_length: 32,
        },
        ..AuthConfig::default()
    }
}

pub fn password_hasher() -> Result<PasswordHasher, argon2::password_hash::Error> {
    PasswordHasher::from_config(&auth_config())
}

/// Default configuration with test Argon2 parameters.
pub fn config() -> AppConfig {
    AppConfig {
        auth: auth_config(),
        ..AppConfig::default()
    }
}

pub fn state(db: DatabaseConnection) -> AppState {
    AppState::new(&config(), db).expect("Failed to build application state")
}

/// Insert a user whose password is `password`.
pub async fn create_test_user(
    db: &DatabaseConnection,
    hasher: &PasswordHasher,
    email: &str,
    password: &str,
) -> users::Model {
    let hash = hasher.hash(password).expect("Failed to hash password");

    users::Model::new(email, hash)
        .store(db)
        .await
        .expect("Failed to store test user")
}
