use serde::{Deserialize, Serialize};
use std::env;
use tracing::{debug, error, info, warn};

use crate::config::ConfigError;

/// SMTP relay settings. Defaults target Resend's SMTP endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailConfig {
    /// When false no mail leaves the process; messages are only logged
    pub enabled: bool,
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_username: String,
    pub smtp_password: String,
    /// Whether to use TLS encryption
    pub use_tls: bool,
    /// Whether to upgrade with STARTTLS instead of wrapping the connection
    pub use_starttls: bool,
    pub from_email: String,
    /// Display name on outgoing mail
    pub from_name: String,
    pub connection_timeout_secs: u64,
}

fn env_flag(name: &str, default: bool) -> bool {
    match env::var(name) {
        Ok(value) => value.parse::<bool>().unwrap_or(default),
        Err(_) => {
            warn!("{} not set, defaulting to {}", name, default);
            default
        }
    }
}

impl EmailConfig {
    /// Create EmailConfig from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        info!("Loading email configuration from environment variables");

        let enabled = env_flag("EMAIL_ENABLED", true);
        if !enabled {
            info!("Email delivery disabled by EMAIL_ENABLED=false");
            return Ok(EmailConfig { enabled, ..EmailConfig::default() });
        }

        let smtp_host = env::var("SMTP_HOST").unwrap_or_else(|_| {
            warn!("SMTP_HOST not set, defaulting to smtp.resend.com");
            "smtp.resend.com".to_string()
        });
        debug!("SMTP host: {}", smtp_host);

        let smtp_port = env::var("SMTP_PORT")
            .unwrap_or_else(|_| "587".to_string())
            .parse::<u16>()
            .map_err(|_| {
                error!("Invalid SMTP_PORT value");
                ConfigError::InvalidValue("Invalid SMTP_PORT value".to_string())
            })?;
        debug!("SMTP port: {}", smtp_port);

        let smtp_username = env::var("SMTP_USERNAME").unwrap_or_else(|_| "resend".to_string());

        let smtp_password = env::var("SMTP_PASSWORD")
            .map_err(|_| {
                error!("SMTP_PASSWORD environment variable not found");
                ConfigError::EnvVarNotFound("SMTP_PASSWORD".to_string())
            })?;
        debug!("SMTP password: [REDACTED]");

        let use_tls = env_flag("SMTP_USE_TLS", true);
        let use_starttls = env_flag("SMTP_USE_STARTTLS", true);

        let from_email = env::var("SMTP_FROM_EMAIL")
            .map_err(|_| {
                error!("SMTP_FROM_EMAIL environment variable not found");
                ConfigError::EnvVarNotFound("SMTP_FROM_EMAIL".to_string())
            })?;
        debug!("From email: {}", from_email);

        let from_name = env::var("SMTP_FROM_NAME").unwrap_or_else(|_| "Harbonline".to_string());

        let connection_timeout_secs = env::var("SMTP_CONNECTION_TIMEOUT")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(30);

        let config = EmailConfig {
            enabled,
            smtp_host,
            smtp_port,
            smtp_username,
            smtp_password,
            use_tls,
            use_starttls,
            from_email,
            from_name,
            connection_timeout_secs,
        };

        config.validate()?;
        info!("Email configuration loaded successfully");
        Ok(config)
    }

    /// Create EmailConfig for testing (local catcher such as MailHog)
    pub fn from_test_env() -> Self {
        EmailConfig {
            enabled: true,
            smtp_host: "localhost".to_string(),
            smtp_port: 1025,
            smtp_username: "test".to_string(),
            smtp_password: "test".to_string(),
            use_tls: false,
            use_starttls: false,
            from_email: "test@harbonline.test".to_string(),
            from_name: "Harbonline Test".to_string(),
            connection_timeout_secs: 10,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.smtp_host.is_empty() {
            error!("SMTP host is empty");
            return Err(ConfigError::ValidationError("SMTP host cannot be empty".to_string()));
        }

        if self.smtp_port == 0 {
            error!("SMTP port is 0");
            return Err(ConfigError::ValidationError("SMTP port cannot be 0".to_string()));
        }

        if self.from_email.is_empty() || !self.from_email.contains('@') {
            error!("Invalid from email: {:?}", self.from_email);
            return Err(ConfigError::ValidationError("Invalid from email format".to_string()));
        }

        if self.connection_timeout_secs == 0 {
            error!("Connection timeout is 0");
            return Err(ConfigError::ValidationError("Connection timeout cannot be 0".to_string()));
        }

        Ok(())
    }

    pub fn get_smtp_url(&self) -> String {
        format!("{}:{}", self.smtp_host, self.smtp_port)
    }
}

impl Default for EmailConfig {
    fn default() -> Self {
        EmailConfig {
            enabled: false,
            smtp_host: "smtp.resend.com".to_string(),
            smtp_port: 587,
            smtp_username: "resend".to_string(),
            smtp_password: "".to_string(),
            use_tls: true,
            use_starttls: true,
            from_email: "hello@harbonline.co.uk".to_string(),
            from_name: "Harbonline".to_string(),
            connection_timeout_secs: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_targets_resend() {
        let config = EmailConfig::default();
        assert_eq!(config.smtp_host, "smtp.resend.com");
        assert_eq!(config.smtp_username, "resend");
        assert_eq!(config.smtp_port, 587);
        assert!(!config.enabled);
    }

    #[test]
    fn test_validate_valid_config() {
        let config = EmailConfig::from_test_env();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_zero_port() {
        let mut config = EmailConfig::from_test_env();
        config.smtp_port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_invalid_email_format() {
        let mut config = EmailConfig::from_test_env();
        config.from_email = "invalid-email".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_get_smtp_url() {
        let config = EmailConfig::from_test_env();
        assert_eq!(config.get_smtp_url(), "localhost:1025");
    }
}
