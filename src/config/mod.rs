pub mod mongo_conf;
pub mod email_conf;
pub mod jwt_conf;
pub mod admin_user_conf;
pub mod company_conf;
pub mod app_conf;


pub use app_conf::{AppConfig, StorageBackend};
pub use mongo_conf::MongoConfig;
pub use email_conf::EmailConfig;
pub use jwt_conf::JwtConfig;
pub use admin_user_conf::AdminUserConfig;
pub use company_conf::CompanyConfig;

/// Common configuration error type
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Environment variable not found: {0}")]
    EnvVarNotFound(String),
    
    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
    
    #[error("Validation error: {0}")]
    ValidationError(String),
    
    #[error("Parse error: {0}")]
    ParseError(String),
}
