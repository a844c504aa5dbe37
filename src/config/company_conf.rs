use serde::{Deserialize, Serialize};
use std::env;
use tracing::{info, warn};

use crate::config::ConfigError;

/// Business details printed on invoices and outgoing emails.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyConfig {
    pub name: String,
    pub address_lines: Vec<String>,
    pub email: String,
    pub phone: String,
    pub website: String,
    pub bank_name: String,
    pub account_name: String,
    pub sort_code: String,
    pub account_number: String,
    /// Days between issue date and due date when an invoice has none
    pub payment_terms_days: i64,
}

fn var_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| {
        warn!("{} not set, using default", name);
        default.to_string()
    })
}

impl CompanyConfig {
    /// Load company details from environment variables
    ///
    /// `COMPANY_ADDRESS` is split on `|` into separate lines.
    pub fn from_env() -> Result<Self, ConfigError> {
        info!("Loading company configuration from environment variables");
        let defaults = CompanyConfig::default();

        let address_lines = match env::var("COMPANY_ADDRESS") {
            Ok(raw) => raw.split('|').map(|s| s.trim().to_string()).filter(|s| !s.is_empty()).collect(),
            Err(_) => defaults.address_lines.clone(),
        };

        let payment_terms_days = match env::var("INVOICE_PAYMENT_TERMS_DAYS") {
            Ok(raw) => raw.parse::<i64>().map_err(|_| {
                ConfigError::InvalidValue("Invalid INVOICE_PAYMENT_TERMS_DAYS value".to_string())
            })?,
            Err(_) => defaults.payment_terms_days,
        };

        let config = CompanyConfig {
            name: var_or("COMPANY_NAME", &defaults.name),
            address_lines,
            email: var_or("COMPANY_EMAIL", &defaults.email),
            phone: var_or("COMPANY_PHONE", &defaults.phone),
            website: var_or("COMPANY_WEBSITE", &defaults.website),
            bank_name: var_or("COMPANY_BANK_NAME", &defaults.bank_name),
            account_name: var_or("COMPANY_ACCOUNT_NAME", &defaults.account_name),
            sort_code: var_or("COMPANY_SORT_CODE", &defaults.sort_code),
            account_number: var_or("COMPANY_ACCOUNT_NUMBER", &defaults.account_number),
            payment_terms_days,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::ValidationError("Company name cannot be empty".to_string()));
        }
        if !(0..=365).contains(&self.payment_terms_days) {
            return Err(ConfigError::ValidationError("Payment terms must be between 0 and 365 days".to_string()));
        }
        Ok(())
    }

    /// Default wording for the payment terms block
    pub fn payment_terms_text(&self) -> String {
        format!("Payment due within {} days of the invoice date.", self.payment_terms_days)
    }
}

impl Default for CompanyConfig {
    fn default() -> Self {
        CompanyConfig {
            name: "Harbonline".to_string(),
            address_lines: vec!["United Kingdom".to_string()],
            email: "hello@harbonline.co.uk".to_string(),
            phone: "".to_string(),
            website: "https://harbonline.co.uk".to_string(),
            bank_name: "".to_string(),
            account_name: "Harbonline".to_string(),
            sort_code: "".to_string(),
            account_number: "".to_string(),
            payment_terms_days: 14,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = CompanyConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.payment_terms_text(), "Payment due within 14 days of the invoice date.");
    }

    #[test]
    fn test_validate_rejects_negative_terms() {
        let config = CompanyConfig { payment_terms_days: -1, ..CompanyConfig::default() };
        assert!(config.validate().is_err());
    }
}
