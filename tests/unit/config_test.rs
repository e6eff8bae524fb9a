//! Unit tests for configuration loading
//!
//! Environment variables are process-global, so every test here runs
//! `#[serial]` and clears `LIGHTER_WEB*` variables before and after.

use lighter_web::config::*;
use serial_test::serial;

mod utils {
    /// Clean up environment variables with the LIGHTER_WEB prefix
    pub fn clean_env_vars() {
        let keys: Vec<String> = std::env::vars()
            .filter(|(k, _)| k.starts_with("LIGHTER_WEB"))
            .map(|(k, _)| k)
            .collect();

        for key in keys {
            unsafe { std::env::remove_var(&key) };
        }

        unsafe { std::env::remove_var("APP_ENV") };
    }

    pub fn set(key: &str, value: &str) {
        unsafe { std::env::set_var(key, value) };
    }
}

// =============================================================================
// Defaults
// =============================================================================

#[test]
#[serial]
fn test_load_default_config_success() {
    utils::clean_env_vars();

    let config = load().expect("default configuration should load");

    assert_eq!(config.app.name, "lighter-web");
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.session.cookie_name, "session");
    assert_eq!(config.auth.password.min_length, 6);
    assert_eq!(config.auth.password.max_length, 35);
    assert_eq!(config.auth.argon2.memory_cost, 65536);
    assert!(config.security.headers.enabled);
    assert_eq!(config.observability.log_format, LogFormat::Pretty);
}

#[test]
fn test_struct_defaults_match_default_toml() {
    let config = AppConfig::default();

    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.database.max_connections, 10);
    assert!(config.database.auto_migrate);
    assert_eq!(config.security.headers.x_frame_options, "DENY");
    assert_eq!(config.observability.log_level, "info,sqlx=warn");
}

// =============================================================================
// Environment overrides
// =============================================================================

#[test]
#[serial]
fn test_env_var_overrides_file_values() {
    utils::clean_env_vars();
    utils::set("LIGHTER_WEB__SERVER__PORT", "9090");
    utils::set("LIGHTER_WEB__AUTH__PASSWORD__MIN_LENGTH", "8");
    utils::set("LIGHTER_WEB__SESSION__COOKIE_NAME", "lighter");
    utils::set("LIGHTER_WEB__OBSERVABILITY__LOG_FORMAT", "json");

    let result = load();
    utils::clean_env_vars();

    let config = result.expect("configuration with overrides should load");
    assert_eq!(config.server.port, 9090);
    assert_eq!(config.auth.password.min_length, 8);
    assert_eq!(config.session.cookie_name, "lighter");
    assert_eq!(config.observability.log_format, LogFormat::Json);
}

#[test]
#[serial]
fn test_production_profile_hardens_cookies() {
    utils::clean_env_vars();
    utils::set("APP_ENV", "production");
    utils::set("LIGHTER_WEB__SESSION__SECRET", &"s".repeat(64));

    let result = load();
    utils::clean_env_vars();

    let config = result.expect("production configuration should load");
    assert!(config.session.secure);
    assert!(config.security.headers.hsts_max_age > 0);
    assert_eq!(config.observability.log_format, LogFormat::Json);
}

// =============================================================================
// Validation
// =============================================================================

#[test]
#[serial]
fn test_short_session_secret_rejected() {
    utils::clean_env_vars();
    utils::set("LIGHTER_WEB__SESSION__SECRET", "too-short");

    let result = load();
    utils::clean_env_vars();

    match result {
        Err(ConfigError::ValidationError(message)) => {
            assert!(message.contains("session.secret"), "{}", message);
        }
        other => panic!("expected validation error, got {:?}", other.map(|_| ())),
    }
}

#[test]
#[serial]
fn test_inverted_password_bounds_rejected() {
    utils::clean_env_vars();
    utils::set("LIGHTER_WEB__AUTH__PASSWORD__MIN_LENGTH", "40");

    let result = load();
    utils::clean_env_vars();

    assert!(matches!(result, Err(ConfigError::ValidationError(_))));
}

#[test]
#[serial]
fn test_unparsable_port_rejected() {
    utils::clean_env_vars();
    utils::set("LIGHTER_WEB__SERVER__PORT", "not-a-port");

    let result = load();
    utils::clean_env_vars();

    assert!(matches!(result, Err(ConfigError::Load(_))));
}

#[test]
fn test_invalid_frame_options_rejected() {
    let config = SecurityHeadersConfig {
        x_frame_options: "ALLOWALL".to_string(),
        ..SecurityHeadersConfig::default()
    };

    assert!(config.validate().is_err());
}

#[test]
fn test_zero_port_rejected() {
    let config = AppConfig {
        server: ServerConfig {
            port: 0,
            ..ServerConfig::default()
        },
        ..AppConfig::default()
    };

    assert!(config.validate().is_err());
}

#[test]
fn test_default_config_is_valid() {
    assert!(AppConfig::default().validate().is_ok());
}
