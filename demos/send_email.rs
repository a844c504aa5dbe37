use dotenv::dotenv;
use tracing::{error, info, warn};

use harbonline_backend::config::EmailConfig;
use harbonline_backend::util::email::{EmailMessage, Mailer, SmtpEmailService};
use harbonline_backend::util::logger::Logger;

// Sends one test message through the configured SMTP relay.
// Usage: cargo run --example send_email -- someone@example.com
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let logger = Logger::new()?;
    let _guards = logger.guards;

    match dotenv() {
        Ok(_) => info!("Loaded .env file"),
        Err(e) => warn!("Failed to load .env file: {} (using system env vars)", e),
    }

    let to = std::env::args().nth(1).ok_or("usage: send_email <recipient>")?;
    let email_config = EmailConfig::from_env()?;
    let email_service = SmtpEmailService::new(email_config)?;

    let message = EmailMessage::new(to.clone(), "Harbonline SMTP test")
        .with_text_body("This is a test message from the Harbonline backend.".to_string())
        .with_html_body("<p>This is a test message from the <strong>Harbonline</strong> backend.</p>".to_string());

    match email_service.send_email(message).await {
        Ok(()) => info!(to = %to, "Test email sent"),
        Err(e) => {
            error!("Failed to send test email: {}", e);
            return Err(e.into());
        }
    }
    Ok(())
}
