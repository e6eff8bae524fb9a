use serde::{Deserialize, Serialize};

use super::{ConfigError, Validate};

/// Security configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SecurityConfig {
    /// Security headers configuration
    #[serde(default = "SecurityHeadersConfig::default")]
    pub headers: SecurityHeadersConfig,
}

/// Security headers configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityHeadersConfig {
    /// Enable security headers
    #[serde(default = "default_headers_enabled")]
    pub enabled: bool,
    /// Content Security Policy
    #[serde(default = "default_headers_csp")]
    pub csp: String,
    /// HSTS max age in seconds, 0 disables the header
    #[serde(default)]
    pub hsts_max_age: u64,
    /// X-Frame-Options
    #[serde(default = "default_headers_x_frame_options")]
    pub x_frame_options: String,
    /// X-Content-Type-Options
    #[serde(default = "default_headers_x_content_type_options")]
    pub x_content_type_options: String,
    /// Referrer-Policy
    #[serde(default = "default_headers_referrer_policy")]
    pub referrer_policy: String,
}

fn default_headers_enabled() -> bool {
    true
}

fn default_headers_csp() -> String {
    "default-src 'self'; form-action 'self'; frame-ancestors 'none'".to_string()
}

fn default_headers_x_frame_options() -> String {
    "DENY".to_string()
}

fn default_headers_x_content_type_options() -> String {
    "nosniff".to_string()
}

fn default_headers_referrer_policy() -> String {
    "strict-origin-when-cross-origin".to_string()
}

impl Default for SecurityHeadersConfig {
    fn default() -> Self {
        Self {
            enabled: default_headers_enabled(),
            csp: default_headers_csp(),
            hsts_max_age: 0,
            x_frame_options: default_headers_x_frame_options(),
            x_content_type_options: default_headers_x_content_type_options(),
            referrer_policy: default_headers_referrer_policy(),
        }
    }
}

impl Validate for SecurityConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        self.headers.validate()
    }
}

impl Validate for SecurityHeadersConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        let valid_frame_options = ["", "DENY", "SAMEORIGIN"];
        if !valid_frame_options.contains(&self.x_frame_options.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "security.headers.x_frame_options must be DENY or SAMEORIGIN, got {}",
                self.x_frame_options
            )));
        }
        Ok(())
    }
}
