use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::PasswordPolicy;

/// Static regex patterns for validation
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    // RFC 5322 compliant email regex (simplified)
    // Requires at least one dot after @ for TLD
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)+$"
    ).expect("email regex is valid")
});

/// Validator struct with static methods for input validation
pub struct Validator;

impl Validator {
    /// Validates email address format
    ///
    /// # Example
    /// ```
    /// use lighter_web::security::Validator;
    ///
    /// assert!(Validator::validate_email("user@example.com"));
    /// assert!(!Validator::validate_email("invalid-email"));
    /// ```
    pub fn validate_email(email: &str) -> bool {
        if email.is_empty() || email.len() > 255 {
            return false;
        }

        // Consecutive dots are never valid
        if email.contains("..") {
            return false;
        }

        EMAIL_REGEX.is_match(email)
    }

    /// Validates password length against the configured policy
    ///
    /// Length is counted in characters, not bytes.
    ///
    /// # Example
    /// ```
    /// use lighter_web::config::PasswordPolicy;
    /// use lighter_web::security::Validator;
    ///
    /// let policy = PasswordPolicy::default();
    /// assert!(Validator::validate_password("0123456", &policy).is_ok());
    /// assert!(Validator::validate_password("abc", &policy).is_err());
    /// ```
    pub fn validate_password(password: &str, policy: &PasswordPolicy) -> Result<(), String> {
        if Self::validate_length(password, policy.min_length, policy.max_length) {
            Ok(())
        } else {
            Err(format!(
                "Password must be between {} and {} characters",
                policy.min_length, policy.max_length
            ))
        }
    }

    /// Validates string length is within bounds (inclusive)
    pub fn validate_length(input: &str, min: usize, max: usize) -> bool {
        let len = input.chars().count();
        len >= min && len <= max
    }
}
