use serde::{Deserialize, Serialize};

use crate::config::PasswordPolicy;
use crate::requests::Validation;
use crate::security::Validator;

/// `POST /login` form.
#[derive(Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn email(&self) -> String {
        normalize_email(&self.email)
    }
}

/// `POST /register` form.
#[derive(Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub confirm: String,
}

impl RegisterRequest {
    pub fn email(&self) -> String {
        normalize_email(&self.email)
    }

    pub fn validate(&self, policy: &PasswordPolicy) -> Validation {
        let mut validation = Validation::new();
        let email = self.email();

        if email.is_empty() {
            validation.add("email", "Email is required");
        } else if !Validator::validate_email(&email) {
            validation.add("email", "Invalid email address");
        }

        if let Err(message) = Validator::validate_password(&self.password, policy) {
            validation.add("password", message);
        }

        if self.password != self.confirm {
            validation.add("password", "Passwords must match");
        }

        validation
    }
}

/// `?next=` carried from the guard's redirect through the login form.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct NextQuery {
    pub next: Option<String>,
}

/// Emails are compared trimmed and lower-cased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

impl std::fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}
