use std::sync::Arc;

use async_trait::async_trait;
use bson::oid::ObjectId;
use chrono::{Datelike, Duration, NaiveDate, Utc};
use tracing::{error, info, instrument, warn};

use crate::dto::invoice_dto::{CreateInvoiceRequest, SendInvoiceRequest, UpdateInvoiceRequest};
use crate::model::invoice::{format_invoice_number, next_invoice_sequence, Invoice, InvoiceStatus};
use crate::model::{timestamp, Status};
use crate::repository::Repository;
use crate::service::notification_service::NotificationService;
use crate::service::{clean_text, ensure_transition};
use crate::util::error::ServiceError;
use crate::util::filter::{ListFilter, Page};
use crate::util::invoice_pdf::{invoice_filename, render_invoice, PdfError};

/// Rendered invoice ready for download or attachment.
#[derive(Debug, Clone)]
pub struct InvoicePdf {
	pub filename: String,
	pub bytes: Vec<u8>,
}

#[async_trait]
pub trait InvoiceService: Send + Sync {
	async fn create_invoice(&self, request: CreateInvoiceRequest) -> Result<Invoice, ServiceError>;
	async fn get_invoice(&self, id: ObjectId) -> Result<Invoice, ServiceError>;
	async fn list_invoices(&self, filter: ListFilter) -> Result<Page<Invoice>, ServiceError>;
	async fn update_invoice(&self, id: ObjectId, update: UpdateInvoiceRequest) -> Result<Invoice, ServiceError>;
	async fn delete_invoice(&self, id: ObjectId) -> Result<(), ServiceError>;
	async fn invoice_pdf(&self, id: ObjectId) -> Result<InvoicePdf, ServiceError>;
	/// Emails the PDF to the client; a draft becomes `sent`.
	async fn send_invoice(&self, id: ObjectId, request: SendInvoiceRequest) -> Result<Invoice, ServiceError>;
}

pub struct InvoiceServiceImpl {
	pub invoice_repo: Arc<dyn Repository<Invoice>>,
	pub notifications: Arc<NotificationService>,
}

fn check_amounts(invoice: &Invoice) -> Result<(), ServiceError> {
	invoice.validate_amounts().map_err(|errors| ServiceError::InvalidInput(errors.join("; ")))
}

impl InvoiceServiceImpl {
	pub fn new(invoice_repo: Arc<dyn Repository<Invoice>>, notifications: Arc<NotificationService>) -> Self {
		Self { invoice_repo, notifications }
	}

	async fn next_number(&self, issue_date: NaiveDate) -> Result<String, ServiceError> {
		let year = issue_date.year();
		let existing = self.invoice_repo.list().await?;
		let sequence = next_invoice_sequence(year, existing.iter().map(|i| i.invoice_number.as_str()));
		Ok(format_invoice_number(year, sequence))
	}

	async fn ensure_number_free(&self, number: &str) -> Result<(), ServiceError> {
		match self.invoice_repo.find_by_field("invoice_number", number).await? {
			Some(_) => Err(ServiceError::Conflict(format!("Invoice number '{}' is already in use", number))),
			None => Ok(()),
		}
	}

	fn render(&self, invoice: &Invoice) -> Result<InvoicePdf, ServiceError> {
		let bytes = render_invoice(invoice, self.notifications.company()).map_err(|e| match e {
			PdfError::Amounts(overflow) => ServiceError::from(overflow),
			PdfError::Render(msg) => {
				error!("Failed to render invoice PDF: {}", msg);
				ServiceError::InternalError(msg)
			}
		})?;
		Ok(InvoicePdf { filename: invoice_filename(&invoice.invoice_number, &invoice.client_name), bytes })
	}
}

#[async_trait]
impl InvoiceService for InvoiceServiceImpl {
	#[instrument(skip(self, request), fields(client = %request.client_name))]
	async fn create_invoice(&self, request: CreateInvoiceRequest) -> Result<Invoice, ServiceError> {
		let issue_date = request.issue_date.unwrap_or_else(|| Utc::now().date_naive());
		let due_date = request
			.due_date
			.unwrap_or_else(|| issue_date + Duration::days(self.notifications.company().payment_terms_days));

		let mut invoice = Invoice {
			id: None,
			invoice_number: String::new(),
			client_name: request.client_name.trim().to_string(),
			client_email: request.client_email.trim().to_string(),
			client_company: clean_text(request.client_company),
			client_address: clean_text(request.client_address),
			issue_date,
			due_date,
			line_items: request.line_items,
			discount: request.discount,
			tax_rate: request.tax_rate,
			notes: clean_text(request.notes),
			payment_terms: clean_text(request.payment_terms),
			status: InvoiceStatus::Draft,
			sent_at: None,
			paid_at: None,
			created_at: None,
			updated_at: None,
		};
		check_amounts(&invoice)?;

		invoice.invoice_number = match clean_text(request.invoice_number) {
			Some(number) => {
				self.ensure_number_free(&number).await?;
				number
			}
			None => self.next_number(issue_date).await?,
		};
		let created = self.invoice_repo.create(invoice).await.map_err(|e| {
			error!("Failed to store invoice: {}", e);
			ServiceError::from(e)
		})?;
		info!(invoice_number = %created.invoice_number, "Invoice created");
		Ok(created)
	}

	#[instrument(skip(self), fields(id = %id))]
	async fn get_invoice(&self, id: ObjectId) -> Result<Invoice, ServiceError> {
		Ok(self.invoice_repo.get_by_id(id).await?)
	}

	#[instrument(skip(self))]
	async fn list_invoices(&self, filter: ListFilter) -> Result<Page<Invoice>, ServiceError> {
		Ok(filter.apply(self.invoice_repo.list().await?))
	}

	#[instrument(skip(self, update), fields(id = %id, status = ?update.status))]
	async fn update_invoice(&self, id: ObjectId, update: UpdateInvoiceRequest) -> Result<Invoice, ServiceError> {
		let mut invoice = self.invoice_repo.get_by_id(id).await?;

		if !update.is_status_only() {
			if !invoice.is_editable() {
				return Err(ServiceError::InvalidInput(format!(
					"A {} invoice can no longer be edited",
					invoice.status.as_str()
				)));
			}
			if let Some(name) = update.client_name {
				invoice.client_name = name.trim().to_string();
			}
			if let Some(email) = update.client_email {
				invoice.client_email = email.trim().to_string();
			}
			if update.client_company.is_some() {
				invoice.client_company = clean_text(update.client_company);
			}
			if update.client_address.is_some() {
				invoice.client_address = clean_text(update.client_address);
			}
			if let Some(issue_date) = update.issue_date {
				invoice.issue_date = issue_date;
			}
			if let Some(due_date) = update.due_date {
				invoice.due_date = due_date;
			}
			if let Some(items) = update.line_items {
				invoice.line_items = items;
			}
			if update.remove_discount {
				invoice.discount = None;
			} else if update.discount.is_some() {
				invoice.discount = update.discount;
			}
			if let Some(tax_rate) = update.tax_rate {
				invoice.tax_rate = tax_rate;
			}
			if update.notes.is_some() {
				invoice.notes = clean_text(update.notes);
			}
			if update.payment_terms.is_some() {
				invoice.payment_terms = clean_text(update.payment_terms);
			}
			check_amounts(&invoice)?;
		}

		if let Some(status) = update.status {
			ensure_transition(invoice.status, status)?;
			invoice.apply_status(status, &timestamp());
		}

		let updated = self.invoice_repo.update(id, invoice).await?;
		info!("Invoice updated");
		Ok(updated)
	}

	#[instrument(skip(self), fields(id = %id))]
	async fn delete_invoice(&self, id: ObjectId) -> Result<(), ServiceError> {
		self.invoice_repo.delete(id).await?;
		info!("Invoice deleted");
		Ok(())
	}

	#[instrument(skip(self), fields(id = %id))]
	async fn invoice_pdf(&self, id: ObjectId) -> Result<InvoicePdf, ServiceError> {
		let invoice = self.invoice_repo.get_by_id(id).await?;
		self.render(&invoice)
	}

	#[instrument(skip(self, request), fields(id = %id))]
	async fn send_invoice(&self, id: ObjectId, request: SendInvoiceRequest) -> Result<Invoice, ServiceError> {
		let mut invoice = self.invoice_repo.get_by_id(id).await?;
		if invoice.status == InvoiceStatus::Cancelled {
			return Err(ServiceError::InvalidInput("A cancelled invoice cannot be sent".to_string()));
		}

		let total = invoice.totals()?.total;
		let pdf = self.render(&invoice)?;
		let to = request.to.clone().unwrap_or_else(|| invoice.client_email.clone());
		self.notifications
			.send_invoice(&invoice, total, &to, pdf.bytes, request.message.as_deref())
			.await
			.map_err(|e| {
				error!("Failed to email invoice: {}", e);
				ServiceError::InternalError(format!("Failed to send invoice: {}", e))
			})?;

		if invoice.status == InvoiceStatus::Draft {
			invoice.apply_status(InvoiceStatus::Sent, &timestamp());
			invoice = self.invoice_repo.update(id, invoice).await?;
		} else {
			warn!(status = ?invoice.status, "Invoice re-sent without a status change");
		}
		info!(to = %to, "Invoice emailed");
		Ok(invoice)
	}
}
