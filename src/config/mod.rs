pub mod app;
pub mod auth;
pub mod security;
pub mod server;

use thiserror::Error;

// Export web-specific configs
pub use app::{AppConfig, AppMetadata};
pub use auth::{Argon2Config, AuthConfig, PasswordPolicy};
pub use security::{SecurityConfig, SecurityHeadersConfig};
pub use server::{DatabaseConfig, LogFormat, ObservabilityConfig, ServerConfig, SessionConfig};

/// Environment variable prefix, e.g. `LIGHTER_WEB__SERVER__PORT=8080`
pub const ENV_PREFIX: &str = "LIGHTER_WEB";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
    #[error("invalid configuration: {0}")]
    ValidationError(String),
}

/// Checks a configuration section for values the application cannot run with.
pub trait Validate {
    fn validate(&self) -> Result<(), ConfigError>;
}

/// Load the application configuration from files and environment variables
pub fn load() -> Result<AppConfig, ConfigError> {
    app::load_config()
}
