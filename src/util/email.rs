use async_trait::async_trait;
use lettre::{
    Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{header::ContentType, Attachment, Mailbox, MultiPart, SinglePart},
    transport::smtp::{
        authentication::Credentials,
        client::{Tls, TlsParameters},
    },
};
use tracing::{error, info, instrument};

use crate::config::{ConfigError, EmailConfig};

#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("SMTP error: {0}")]
    SmtpError(String),

    #[error("Message building error: {0}")]
    MessageError(String),

    #[error("Address error: {0}")]
    AddressError(String),
}

impl From<ConfigError> for EmailError {
    fn from(err: ConfigError) -> Self {
        EmailError::ConfigError(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmailAttachment {
    pub filename: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub reply_to: Option<String>,
    pub text_body: Option<String>,
    pub html_body: Option<String>,
    pub attachments: Vec<EmailAttachment>,
}

impl EmailMessage {
    pub fn new(to: impl Into<String>, subject: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            subject: subject.into(),
            reply_to: None,
            text_body: None,
            html_body: None,
            attachments: Vec::new(),
        }
    }

    pub fn with_text_body(mut self, body: String) -> Self {
        self.text_body = Some(body);
        self
    }

    pub fn with_html_body(mut self, body: String) -> Self {
        self.html_body = Some(body);
        self
    }

    pub fn with_reply_to(mut self, reply_to: impl Into<String>) -> Self {
        self.reply_to = Some(reply_to.into());
        self
    }

    pub fn with_attachment(mut self, attachment: EmailAttachment) -> Self {
        self.attachments.push(attachment);
        self
    }
}

/// Outbound email transport.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send_email(&self, message: EmailMessage) -> Result<(), EmailError>;
}

/// Accepts and drops every message. Selected when `EMAIL_ENABLED=false`.
pub struct NoopMailer;

#[async_trait]
impl Mailer for NoopMailer {
    async fn send_email(&self, message: EmailMessage) -> Result<(), EmailError> {
        validate_email_address(&message.to)?;
        info!(to = %message.to, subject = %message.subject, "Email delivery disabled, message dropped");
        Ok(())
    }
}

pub struct SmtpEmailService {
    pub config: EmailConfig,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpEmailService {
    #[instrument(skip(config), fields(host = %config.smtp_host, port = config.smtp_port))]
    pub fn new(config: EmailConfig) -> Result<Self, EmailError> {
        info!("Initializing SMTP email service");

        config.validate().map_err(EmailError::from)?;

        let mut transport_builder = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.smtp_host)
            .port(config.smtp_port)
            .timeout(Some(std::time::Duration::from_secs(config.connection_timeout_secs)));

        if config.use_tls {
            let tls_parameters = TlsParameters::new(config.smtp_host.clone())
                .map_err(|e| EmailError::ConfigError(format!("TLS configuration error: {}", e)))?;

            transport_builder = if config.use_starttls {
                transport_builder.tls(Tls::Required(tls_parameters))
            } else {
                transport_builder.tls(Tls::Wrapper(tls_parameters))
            };
        } else {
            transport_builder = transport_builder.tls(Tls::None);
        }

        if !config.smtp_username.is_empty() && !config.smtp_password.is_empty() {
            let credentials = Credentials::new(config.smtp_username.clone(), config.smtp_password.clone());
            transport_builder = transport_builder.credentials(credentials);
        }

        let transport = transport_builder.build();

        info!("SMTP email service initialized successfully");
        Ok(Self { config, transport })
    }

    fn from_mailbox(&self) -> Result<Mailbox, EmailError> {
        sender_mailbox(&self.config.from_name, &self.config.from_email)
    }
}

/// Display names may contain commas or quotes, so the mailbox is built from
/// its parts instead of parsed from `Name <address>`.
pub fn sender_mailbox(name: &str, email: &str) -> Result<Mailbox, EmailError> {
    let address: Address = email
        .trim()
        .parse()
        .map_err(|e| EmailError::AddressError(format!("Invalid from address: {}", e)))?;
    let name = Some(name.trim().to_string()).filter(|n| !n.is_empty());
    Ok(Mailbox::new(name, address))
}

#[async_trait]
impl Mailer for SmtpEmailService {
    #[instrument(skip(self, message), fields(to = %message.to, subject = %message.subject))]
    async fn send_email(&self, message: EmailMessage) -> Result<(), EmailError> {
        validate_email_address(&message.to)?;

        let email_message = build_message(self.from_mailbox()?, message)?;

        self.transport.send(email_message).await.map_err(|e| {
            error!("Failed to send email: {}", e);
            EmailError::SmtpError(format!("Failed to send email: {}", e))
        })?;

        info!("Email sent successfully");
        Ok(())
    }
}

fn body_part(text: Option<String>, html: Option<String>) -> Result<MultiPart, EmailError> {
    match (text, html) {
        (Some(text), Some(html)) => Ok(MultiPart::alternative()
            .singlepart(SinglePart::builder().header(ContentType::TEXT_PLAIN).body(text))
            .singlepart(SinglePart::builder().header(ContentType::TEXT_HTML).body(html))),
        (Some(text), None) => Ok(MultiPart::mixed().singlepart(SinglePart::builder().header(ContentType::TEXT_PLAIN).body(text))),
        (None, Some(html)) => Ok(MultiPart::mixed().singlepart(SinglePart::builder().header(ContentType::TEXT_HTML).body(html))),
        (None, None) => Err(EmailError::MessageError("No message body provided".to_string())),
    }
}

/// Builds the lettre message; attachments go into a `multipart/mixed` wrapper.
pub fn build_message(from: Mailbox, email_message: EmailMessage) -> Result<Message, EmailError> {
    let to_mailbox: Mailbox = email_message
        .to
        .parse()
        .map_err(|e| EmailError::AddressError(format!("Invalid to address: {}", e)))?;

    let mut builder = Message::builder().from(from).to(to_mailbox).subject(&email_message.subject);
    if let Some(reply_to) = &email_message.reply_to {
        let mailbox: Mailbox = reply_to
            .parse()
            .map_err(|e| EmailError::AddressError(format!("Invalid reply-to address: {}", e)))?;
        builder = builder.reply_to(mailbox);
    }

    let body = body_part(email_message.text_body, email_message.html_body)?;
    let multipart = if email_message.attachments.is_empty() {
        body
    } else {
        let mut mixed = MultiPart::mixed().multipart(body);
        for attachment in email_message.attachments {
            let content_type = ContentType::parse(&attachment.content_type)
                .map_err(|e| EmailError::MessageError(format!("Invalid attachment content type: {}", e)))?;
            mixed = mixed.singlepart(Attachment::new(attachment.filename).body(attachment.data, content_type));
        }
        mixed
    };

    builder
        .multipart(multipart)
        .map_err(|e| EmailError::MessageError(format!("Failed to build message: {}", e)))
}

pub fn validate_email_address(email: &str) -> Result<(), EmailError> {
    if email.is_empty() {
        return Err(EmailError::AddressError("Email address cannot be empty".to_string()));
    }

    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
        return Err(EmailError::AddressError("Invalid email format".to_string()));
    }

    Ok(())
}
