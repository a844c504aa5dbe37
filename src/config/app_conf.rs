use std::env;
use tracing::warn;

use crate::config::ConfigError;

/// Where the entity collections live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Mongo,
    Memory,
}

impl std::str::FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mongo" | "mongodb" => Ok(StorageBackend::Mongo),
            "memory" => Ok(StorageBackend::Memory),
            other => Err(ConfigError::InvalidValue(format!("Unknown STORAGE_BACKEND: {}", other))),
        }
    }
}

pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub storage_backend: StorageBackend,
    /// Inbox that receives new quote and callback notifications.
    pub admin_notification_email: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(8080);
        let storage_backend = match env::var("STORAGE_BACKEND") {
            Ok(value) => value.parse()?,
            Err(_) => {
                warn!("STORAGE_BACKEND not set, defaulting to mongo");
                StorageBackend::Mongo
            }
        };
        let admin_notification_email = env::var("ADMIN_NOTIFICATION_EMAIL").ok().filter(|s| !s.is_empty());
        if admin_notification_email.is_none() {
            warn!("ADMIN_NOTIFICATION_EMAIL not set, admin notifications are disabled");
        }
        Ok(AppConfig { host, port, storage_backend, admin_notification_email })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_backend_parse() {
        assert_eq!("mongo".parse::<StorageBackend>().unwrap(), StorageBackend::Mongo);
        assert_eq!("MongoDB".parse::<StorageBackend>().unwrap(), StorageBackend::Mongo);
        assert_eq!(" memory ".parse::<StorageBackend>().unwrap(), StorageBackend::Memory);
        assert!("firestore".parse::<StorageBackend>().is_err());
    }
}
