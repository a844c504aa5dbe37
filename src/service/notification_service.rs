use std::sync::Arc;

use html_escape::encode_text;
use rust_decimal::Decimal;
use tracing::{error, info, instrument};

use crate::config::CompanyConfig;
use crate::model::callback::Callback;
use crate::model::invoice::Invoice;
use crate::model::quote::Quote;
use crate::util::email::{EmailAttachment, EmailError, EmailMessage, Mailer};
use crate::util::invoice_pdf::{format_money, invoice_filename};

/// Builds and sends every outgoing email.
pub struct NotificationService {
	mailer: Arc<dyn Mailer>,
	company: CompanyConfig,
	admin_email: Option<String>,
}

fn wrap_html(company: &CompanyConfig, title: &str, body: &str) -> String {
	format!(
		r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>
        body {{ font-family: Arial, sans-serif; line-height: 1.6; color: #1f2933; max-width: 600px; margin: 0 auto; padding: 20px; }}
        .header {{ background-color: #0b3954; color: #ffffff; padding: 20px; border-radius: 8px 8px 0 0; }}
        .content {{ background-color: #ffffff; padding: 24px; border: 1px solid #d9e2ec; }}
        .footer {{ font-size: 12px; color: #627d98; padding: 12px; text-align: center; }}
        table {{ border-collapse: collapse; width: 100%; }}
        td {{ padding: 4px 8px; vertical-align: top; }}
        td.label {{ font-weight: bold; width: 35%; }}
    </style>
</head>
<body>
    <div class="header"><h2>{title}</h2></div>
    <div class="content">
{body}
    </div>
    <div class="footer">{name} &middot; {website}</div>
</body>
</html>"#,
		title = encode_text(title),
		body = body,
		name = encode_text(&company.name),
		website = encode_text(&company.website),
	)
}

fn html_rows(rows: &[(&str, String)]) -> String {
	let cells: String = rows
		.iter()
		.filter(|(_, v)| !v.is_empty())
		.map(|(k, v)| format!("<tr><td class=\"label\">{}</td><td>{}</td></tr>", encode_text(k), encode_text(v)))
		.collect();
	format!("<table>{}</table>", cells)
}

fn text_rows(rows: &[(&str, String)]) -> String {
	rows.iter()
		.filter(|(_, v)| !v.is_empty())
		.map(|(k, v)| format!("{}: {}", k, v))
		.collect::<Vec<_>>()
		.join("\n")
}

fn quote_rows(quote: &Quote) -> Vec<(&'static str, String)> {
	vec![
		("Name", quote.name.clone()),
		("Email", quote.email.clone()),
		("Phone", quote.phone.clone().unwrap_or_default()),
		("Company", quote.company.clone().unwrap_or_default()),
		("Project type", quote.project_type.label().to_string()),
		("Services", quote.services.selected_labels().join(", ")),
		("Timeline", quote.timeline.label().to_string()),
		("Budget", quote.budget.label().to_string()),
		("Location", quote.location.clone().unwrap_or_default()),
		("Heard about us", quote.referral_source.clone().unwrap_or_default()),
		("Description", quote.description.clone()),
	]
}

impl NotificationService {
	pub fn new(mailer: Arc<dyn Mailer>, company: CompanyConfig, admin_email: Option<String>) -> Self {
		NotificationService { mailer, company, admin_email }
	}

	pub fn company(&self) -> &CompanyConfig {
		&self.company
	}

	pub fn quote_confirmation_email(&self, quote: &Quote) -> EmailMessage {
		let subject = format!("We've received your quote request - {}", self.company.name);
		let rows = quote_rows(quote);
		let text = format!(
			"Hi {name},\n\nThanks for getting in touch with {company}. We've received your project details and will reply within two working days.\n\nHere's what you sent us:\n\n{rows}\n\nBest regards,\n{company}\n{website}",
			name = quote.name,
			company = self.company.name,
			rows = text_rows(&rows),
			website = self.company.website,
		);
		let body = format!(
			"<p>Hi {name},</p>\n<p>Thanks for getting in touch with {company}. We've received your project details and will reply within two working days.</p>\n<p>Here's what you sent us:</p>\n{rows}\n<p>Best regards,<br>{company}</p>",
			name = encode_text(&quote.name),
			company = encode_text(&self.company.name),
			rows = html_rows(&rows),
		);
		EmailMessage::new(quote.email.clone(), subject.clone())
			.with_reply_to(self.company.email.clone())
			.with_text_body(text)
			.with_html_body(wrap_html(&self.company, &subject, &body))
	}

	pub fn new_quote_admin_email(&self, quote: &Quote, admin: &str) -> EmailMessage {
		let subject = format!("New quote request from {}", quote.name);
		let rows = quote_rows(quote);
		let body = format!("<p>A new quote request has arrived.</p>\n{}", html_rows(&rows));
		EmailMessage::new(admin, subject.clone())
			.with_reply_to(quote.email.clone())
			.with_text_body(format!("A new quote request has arrived.\n\n{}", text_rows(&rows)))
			.with_html_body(wrap_html(&self.company, &subject, &body))
	}

	pub fn new_callback_admin_email(&self, callback: &Callback, admin: &str) -> EmailMessage {
		let subject = format!("Callback requested by {}", callback.name);
		let rows = vec![
			("Name", callback.name.clone()),
			("Phone", callback.phone.clone()),
			("Preferred time", callback.preferred_time.clone().unwrap_or_default()),
			("Message", callback.message.clone().unwrap_or_default()),
		];
		let body = format!("<p>Someone has asked for a call back.</p>\n{}", html_rows(&rows));
		EmailMessage::new(admin, subject.clone())
			.with_text_body(format!("Someone has asked for a call back.\n\n{}", text_rows(&rows)))
			.with_html_body(wrap_html(&self.company, &subject, &body))
	}

	pub fn invoice_email(&self, invoice: &Invoice, total: Decimal, to: &str, pdf: Vec<u8>, message: Option<&str>) -> EmailMessage {
		let subject = format!("Invoice {} from {}", invoice.invoice_number, self.company.name);
		let total = format_money(total);
		let due = invoice.due_date.format("%d %B %Y").to_string();
		let note = message.map(str::trim).filter(|m| !m.is_empty());

		let text = format!(
			"Hi {name},\n\n{note}Please find attached invoice {number} for {total}, due on {due}.\n\nBest regards,\n{company}",
			name = invoice.client_name,
			note = note.map(|m| format!("{}\n\n", m)).unwrap_or_default(),
			number = invoice.invoice_number,
			total = total,
			due = due,
			company = self.company.name,
		);
		let body = format!(
			"<p>Hi {name},</p>\n{note}<p>Please find attached invoice <strong>{number}</strong> for <strong>{total}</strong>, due on {due}.</p>\n<p>Best regards,<br>{company}</p>",
			name = encode_text(&invoice.client_name),
			note = note.map(|m| format!("<p>{}</p>\n", encode_text(m))).unwrap_or_default(),
			number = encode_text(&invoice.invoice_number),
			total = encode_text(&total),
			due = encode_text(&due),
			company = encode_text(&self.company.name),
		);

		EmailMessage::new(to, subject.clone())
			.with_reply_to(self.company.email.clone())
			.with_text_body(text)
			.with_html_body(wrap_html(&self.company, &subject, &body))
			.with_attachment(EmailAttachment {
				filename: invoice_filename(&invoice.invoice_number, &invoice.client_name),
				content_type: "application/pdf".to_string(),
				data: pdf,
			})
	}

	#[instrument(skip(self, quote), fields(to = %quote.email))]
	pub async fn send_quote_confirmation(&self, quote: &Quote) -> Result<(), EmailError> {
		self.mailer.send_email(self.quote_confirmation_email(quote)).await
	}

	/// Client confirmation plus admin alert. Failures are logged, never returned.
	#[instrument(skip(self, quote), fields(quote_id = ?quote.id))]
	pub async fn quote_submitted(&self, quote: &Quote) {
		if let Err(e) = self.send_quote_confirmation(quote).await {
			error!("Failed to send quote confirmation: {}", e);
		}
		if let Some(admin) = &self.admin_email {
			match self.mailer.send_email(self.new_quote_admin_email(quote, admin)).await {
				Ok(()) => info!("Admin notified of new quote"),
				Err(e) => error!("Failed to notify admin of new quote: {}", e),
			}
		}
	}

	#[instrument(skip(self, callback), fields(callback_id = ?callback.id))]
	pub async fn callback_requested(&self, callback: &Callback) {
		if let Some(admin) = &self.admin_email {
			match self.mailer.send_email(self.new_callback_admin_email(callback, admin)).await {
				Ok(()) => info!("Admin notified of callback request"),
				Err(e) => error!("Failed to notify admin of callback request: {}", e),
			}
		}
	}

	#[instrument(skip(self, invoice, total, pdf, message), fields(invoice_number = %invoice.invoice_number, to = %to))]
	pub async fn send_invoice(&self, invoice: &Invoice, total: Decimal, to: &str, pdf: Vec<u8>, message: Option<&str>) -> Result<(), EmailError> {
		self.mailer.send_email(self.invoice_email(invoice, total, to, pdf, message)).await
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::quote::{Budget, ProjectType, QuoteStatus, ServiceSelection, Timeline};
	use crate::util::email::NoopMailer;

	fn service() -> NotificationService {
		NotificationService::new(Arc::new(NoopMailer), CompanyConfig::default(), Some("admin@harbonline.test".to_string()))
	}

	fn quote() -> Quote {
		Quote {
			id: None,
			name: "Jo <script>alert(1)</script>".to_string(),
			email: "jo@example.com".to_string(),
			phone: None,
			company: Some("Smith & Sons".to_string()),
			project_type: ProjectType::Ecommerce,
			services: ServiceSelection { ecommerce: true, seo: true, ..Default::default() },
			timeline: Timeline::Flexible,
			budget: Budget::From3kTo5k,
			description: "Sell cakes online".to_string(),
			location: None,
			referral_source: None,
			status: QuoteStatus::New,
			notes: None,
			created_at: None,
			updated_at: None,
		}
	}

	#[test]
	fn test_confirmation_escapes_user_input_in_html() {
		let message = service().quote_confirmation_email(&quote());
		let html = message.html_body.unwrap();
		assert!(!html.contains("<script>"));
		assert!(html.contains("&lt;script&gt;"));
		assert!(html.contains("Smith &amp; Sons"));

		let text = message.text_body.unwrap();
		assert!(text.contains("Services: E-commerce, SEO"));
		assert!(!text.contains("Phone:"));
		assert_eq!(message.to, "jo@example.com");
	}

	#[test]
	fn test_admin_email_replies_to_the_client() {
		let message = service().new_quote_admin_email(&quote(), "admin@harbonline.test");
		assert_eq!(message.to, "admin@harbonline.test");
		assert_eq!(message.reply_to.as_deref(), Some("jo@example.com"));
		assert!(message.subject.starts_with("New quote request from"));
	}
}
