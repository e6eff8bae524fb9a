use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher as Argon2Hasher, PasswordVerifier, SaltString},
};
use rand::rngs::OsRng;

use crate::config::AuthConfig;

/// Argon2id password hasher
///
/// Hashes are stored as PHC strings (`$argon2id$v=19$m=...,t=...,p=...$<salt>$<hash>`),
/// so the salt and parameters travel with the hash and verification needs no
/// extra state.
///
/// Hashing is deliberately slow. Call it through `actix_web::web::block` from
/// request handlers.
///
/// # Example
/// ```no_run
/// use lighter_web::config::AuthConfig;
/// use lighter_web::security::PasswordHasher;
///
/// let hasher = PasswordHasher::from_config(&AuthConfig::default()).unwrap();
/// let hash = hasher.hash("my_secure_password").unwrap();
/// assert!(hasher.verify("my_secure_password", &hash).unwrap());
/// ```
#[derive(Clone)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
    /// Verified against when the email is unknown, so a miss costs as much
    /// as a wrong password.
    dummy_hash: String,
}

impl PasswordHasher {
    /// Create PasswordHasher from AuthConfig
    ///
    /// # Errors
    /// Returns error if Argon2 parameters are invalid (e.g., memory cost too low
    /// for the requested parallelism)
    #[tracing::instrument(skip(config))]
    pub fn from_config(config: &AuthConfig) -> Result<Self, argon2::password_hash::Error> {
        let params = Params::new(
            config.argon2.memory_cost,
            config.argon2.time_cost,
            config.argon2.parallelism,
            Some(config.argon2.hash_length as usize),
        )?;

        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
        let salt = SaltString::generate(&mut OsRng);
        let dummy_hash = argon2
            .hash_password(b"lighter-web-dummy-password", &salt)?
            .to_string();

        Ok(Self { argon2, dummy_hash })
    }

    /// Hash a password with a freshly generated salt
    #[tracing::instrument(skip(self, password))]
    pub fn hash(&self, password: &str) -> Result<String, argon2::password_hash::Error> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self.argon2.hash_password(password.as_bytes(), &salt)?;
        Ok(hash.to_string())
    }

    /// Verify a password against a PHC hash string
    ///
    /// * `Ok(true)` - password matches
    /// * `Ok(false)` - password does not match
    /// * `Err(_)` - the stored hash is malformed
    #[tracing::instrument(skip(self, password, hash))]
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, argon2::password_hash::Error> {
        let parsed_hash = PasswordHash::new(hash)?;
        match self.argon2.verify_password(password.as_bytes(), &parsed_hash) {
            Ok(_) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Burn the same time as a real verification and always fail.
    #[tracing::instrument(skip(self, password))]
    pub fn verify_dummy(&self, password: &str) -> bool {
        let _ = self.verify(password, &self.dummy_hash);
        false
    }
}
