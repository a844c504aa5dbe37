use std::sync::Arc;

use async_trait::async_trait;
use bson::oid::ObjectId;
use tracing::{error, info, instrument};

use crate::dto::quote_dto::{UpdateQuoteRequest, WizardDirection, WizardStepRequest, WizardStepResponse};
use crate::model::quote::Quote;
use crate::model::quote_wizard::{QuoteDraft, QuoteWizard, WizardError, WizardStep, TOTAL_STEPS};
use crate::repository::Repository;
use crate::service::notification_service::NotificationService;
use crate::service::{clean_text, ensure_transition};
use crate::util::error::ServiceError;
use crate::util::filter::{ListFilter, Page};

#[async_trait]
pub trait QuoteService: Send + Sync {
	/// Validates every wizard step, stores the quote and fires the notifications.
	async fn submit_quote(&self, draft: QuoteDraft) -> Result<Quote, ServiceError>;
	fn wizard_step(&self, request: WizardStepRequest) -> Result<WizardStepResponse, ServiceError>;
	async fn resend_confirmation(&self, id: ObjectId) -> Result<(), ServiceError>;
	async fn get_quote(&self, id: ObjectId) -> Result<Quote, ServiceError>;
	async fn list_quotes(&self, filter: ListFilter) -> Result<Page<Quote>, ServiceError>;
	async fn update_quote(&self, id: ObjectId, update: UpdateQuoteRequest) -> Result<Quote, ServiceError>;
	async fn delete_quote(&self, id: ObjectId) -> Result<(), ServiceError>;
}

pub struct QuoteServiceImpl {
	pub quote_repo: Arc<dyn Repository<Quote>>,
	pub notifications: Arc<NotificationService>,
}

impl QuoteServiceImpl {
	pub fn new(quote_repo: Arc<dyn Repository<Quote>>, notifications: Arc<NotificationService>) -> Self {
		Self { quote_repo, notifications }
	}
}

impl From<WizardError> for ServiceError {
	fn from(err: WizardError) -> Self {
		ServiceError::InvalidInput(err.to_string())
	}
}

#[async_trait]
impl QuoteService for QuoteServiceImpl {
	#[instrument(skip(self, draft))]
	async fn submit_quote(&self, draft: QuoteDraft) -> Result<Quote, ServiceError> {
		let quote = draft.into_quote()?;
		let created = self.quote_repo.create(quote).await.map_err(|e| {
			error!("Failed to store quote: {}", e);
			ServiceError::from(e)
		})?;
		info!(quote_id = ?created.id, "Quote request stored");

		self.notifications.quote_submitted(&created).await;
		Ok(created)
	}

	fn wizard_step(&self, request: WizardStepRequest) -> Result<WizardStepResponse, ServiceError> {
		if WizardStep::from_number(request.step).is_none() {
			return Err(ServiceError::InvalidInput(format!(
				"Unknown wizard step {} (expected 1 to {})",
				request.step, TOTAL_STEPS
			)));
		}

		let mut wizard = QuoteWizard::new(request.step, request.draft);
		let errors = match request.direction {
			WizardDirection::Back => {
				wizard.back();
				Vec::new()
			}
			WizardDirection::Next => match wizard.next() {
				Ok(_) => Vec::new(),
				Err(WizardError::Incomplete { errors, .. }) => errors,
				Err(e) => return Err(e.into()),
			},
			WizardDirection::Validate => wizard.draft.validate_step(wizard.current()).err().unwrap_or_default(),
		};

		let current = wizard.current();
		Ok(WizardStepResponse {
			step: wizard.step,
			total_steps: TOTAL_STEPS,
			title: current.title().to_string(),
			valid: errors.is_empty(),
			errors,
			is_last: wizard.is_last(),
		})
	}

	#[instrument(skip(self), fields(id = %id))]
	async fn resend_confirmation(&self, id: ObjectId) -> Result<(), ServiceError> {
		let quote = self.quote_repo.get_by_id(id).await?;
		self.notifications.send_quote_confirmation(&quote).await.map_err(|e| {
			error!("Failed to resend quote confirmation: {}", e);
			ServiceError::InternalError(format!("Failed to send confirmation: {}", e))
		})?;
		info!("Quote confirmation sent");
		Ok(())
	}

	#[instrument(skip(self), fields(id = %id))]
	async fn get_quote(&self, id: ObjectId) -> Result<Quote, ServiceError> {
		Ok(self.quote_repo.get_by_id(id).await?)
	}

	#[instrument(skip(self))]
	async fn list_quotes(&self, filter: ListFilter) -> Result<Page<Quote>, ServiceError> {
		let quotes = self.quote_repo.list().await?;
		let page = filter.apply(quotes);
		info!(total = page.total, "Listed quotes");
		Ok(page)
	}

	#[instrument(skip(self, update), fields(id = %id, status = ?update.status))]
	async fn update_quote(&self, id: ObjectId, update: UpdateQuoteRequest) -> Result<Quote, ServiceError> {
		let mut quote = self.quote_repo.get_by_id(id).await?;
		if let Some(status) = update.status {
			ensure_transition(quote.status, status)?;
			quote.status = status;
		}
		if update.notes.is_some() {
			quote.notes = clean_text(update.notes);
		}
		let updated = self.quote_repo.update(id, quote).await?;
		info!("Quote updated");
		Ok(updated)
	}

	#[instrument(skip(self), fields(id = %id))]
	async fn delete_quote(&self, id: ObjectId) -> Result<(), ServiceError> {
		self.quote_repo.delete(id).await?;
		info!("Quote deleted");
		Ok(())
	}
}
