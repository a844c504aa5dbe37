use std::env;
use tracing::{debug, error, info, warn};

use crate::config::ConfigError;

/// JWT configuration for admin session tokens
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Secret key for signing tokens (HS256)
    pub jwt_secret: String,
    /// Access token lifetime in minutes
    pub access_token_expiration: i64,
    /// Refresh token lifetime in minutes
    pub refresh_token_expiration: i64,
    pub jwt_issuer: Option<String>,
    pub jwt_audience: Option<String>,
}

fn minutes_from_env(name: &str, default: i64) -> Result<i64, ConfigError> {
    let value = env::var(name)
        .unwrap_or_else(|_| {
            warn!("{} not set, using default: {} minutes", name, default);
            default.to_string()
        })
        .parse::<i64>()
        .map_err(|e| {
            error!("Invalid {} value: {}", name, e);
            ConfigError::InvalidValue(format!("{}: {}", name, e))
        })?;
    Ok(value)
}

impl JwtConfig {
    /// Load JWT configuration from environment variables
    ///
    /// Expected environment variables:
    /// - JWT_SECRET: Secret key for signing JWT tokens (required, >= 32 chars)
    /// - JWT_ACCESS_TOKEN_EXPIRY: Access token expiration in minutes (defaults to 60)
    /// - JWT_REFRESH_TOKEN_EXPIRY: Refresh token expiration in minutes (defaults to 10080 = 1 week)
    /// - JWT_ISSUER / JWT_AUDIENCE: optional
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_prefixed_env("")
    }

    /// Same as `from_env` but reads `TEST_` prefixed variables
    pub fn from_test_env() -> Result<Self, ConfigError> {
        Self::from_prefixed_env("TEST_")
    }

    fn from_prefixed_env(prefix: &str) -> Result<Self, ConfigError> {
        info!("Loading JWT configuration from {}JWT_* environment variables", prefix);

        let secret_var = format!("{}JWT_SECRET", prefix);
        let jwt_secret = env::var(&secret_var).map_err(|_| {
            error!("{} environment variable not found", secret_var);
            ConfigError::EnvVarNotFound(secret_var.clone())
        })?;
        debug!("JWT secret loaded (length: {} chars)", jwt_secret.len());

        let config = JwtConfig {
            jwt_secret,
            access_token_expiration: minutes_from_env(&format!("{}JWT_ACCESS_TOKEN_EXPIRY", prefix), 60)?,
            refresh_token_expiration: minutes_from_env(&format!("{}JWT_REFRESH_TOKEN_EXPIRY", prefix), 10080)?,
            jwt_issuer: env::var(format!("{}JWT_ISSUER", prefix)).ok(),
            jwt_audience: env::var(format!("{}JWT_AUDIENCE", prefix)).ok(),
        };

        config.validate()?;
        info!("JWT configuration loaded successfully");
        Ok(config)
    }

    /// Validate the JWT configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt_secret.len() < 32 {
            error!("JWT secret is too short (minimum 32 characters required)");
            return Err(ConfigError::ValidationError("JWT secret must be at least 32 characters long".to_string()));
        }

        if self.access_token_expiration <= 0 {
            return Err(ConfigError::ValidationError("Access token expiration must be greater than 0".to_string()));
        }

        if self.refresh_token_expiration <= 0 {
            return Err(ConfigError::ValidationError("Refresh token expiration must be greater than 0".to_string()));
        }

        if self.access_token_expiration >= self.refresh_token_expiration {
            warn!("Access token expiration is greater than or equal to refresh token expiration");
        }

        Ok(())
    }
}

impl Default for JwtConfig {
    fn default() -> Self {
        JwtConfig {
            jwt_secret: "test_secret_key_for_jwt_testing_should_be_long_enough_for_security_purposes".to_string(),
            access_token_expiration: 60,
            refresh_token_expiration: 10080,
            jwt_issuer: Some("harbonline-backend".to_string()),
            jwt_audience: Some("harbonline-admin".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(JwtConfig::default().validate().is_ok());
    }

    #[test]
    fn test_short_secret_rejected() {
        let config = JwtConfig { jwt_secret: "short".to_string(), ..JwtConfig::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_non_positive_expiry_rejected() {
        let config = JwtConfig { access_token_expiration: 0, ..JwtConfig::default() };
        assert!(config.validate().is_err());
    }
}
