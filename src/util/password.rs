//! Argon2id hashing for admin passwords.

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use tracing::{debug, error};

#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("Failed to hash password: {0}")]
    HashingFailed(String),
    #[error("Failed to verify password: {0}")]
    VerificationFailed(String),
    #[error("Invalid password hash format")]
    InvalidHashFormat,
}

pub trait PasswordUtils {
    fn hash_password(password: &str) -> Result<String, PasswordError>;
    fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError>;
    fn validate_password_strength(password: &str) -> Result<(), Vec<String>>;
}

pub struct PasswordUtilsImpl;

impl PasswordUtils for PasswordUtilsImpl {
    fn hash_password(password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|err| {
                error!("Failed to hash password: {}", err);
                PasswordError::HashingFailed(err.to_string())
            })
    }

    fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
        let parsed_hash = PasswordHash::new(hash).map_err(|err| {
            error!("Invalid password hash format: {}", err);
            PasswordError::InvalidHashFormat
        })?;

        match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => {
                debug!("Password verification failed");
                Ok(false)
            }
            Err(err) => {
                error!("Password verification error: {}", err);
                Err(PasswordError::VerificationFailed(err.to_string()))
            }
        }
    }

    /// At least 8 characters with upper, lower, digit and a symbol.
    fn validate_password_strength(password: &str) -> Result<(), Vec<String>> {
        let checks: [(bool, &str); 5] = [
            (password.chars().count() >= 8, "Password must be at least 8 characters long"),
            (password.chars().any(char::is_uppercase), "Password must contain at least one uppercase letter"),
            (password.chars().any(char::is_lowercase), "Password must contain at least one lowercase letter"),
            (password.chars().any(|c| c.is_ascii_digit()), "Password must contain at least one digit"),
            (
                password.chars().any(|c| "!@#$%^&*()_+-=[]{}|;:,.<>?".contains(c)),
                "Password must contain at least one special character",
            ),
        ];
        let errors: Vec<String> = checks.iter().filter(|(ok, _)| !ok).map(|(_, msg)| msg.to_string()).collect();
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}
