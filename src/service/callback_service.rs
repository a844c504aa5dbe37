use std::sync::Arc;

use async_trait::async_trait;
use bson::oid::ObjectId;
use tracing::{info, instrument};

use crate::dto::callback_dto::{CreateCallbackRequest, UpdateCallbackRequest};
use crate::model::callback::{Callback, CallbackStatus};
use crate::model::timestamp;
use crate::repository::Repository;
use crate::service::notification_service::NotificationService;
use crate::service::{clean_text, ensure_transition};
use crate::util::error::ServiceError;
use crate::util::filter::{ListFilter, Page};

#[async_trait]
pub trait CallbackService: Send + Sync {
	async fn request_callback(&self, request: CreateCallbackRequest) -> Result<Callback, ServiceError>;
	async fn list_callbacks(&self, filter: ListFilter) -> Result<Page<Callback>, ServiceError>;
	async fn update_callback(&self, id: ObjectId, update: UpdateCallbackRequest) -> Result<Callback, ServiceError>;
	async fn delete_callback(&self, id: ObjectId) -> Result<(), ServiceError>;
}

pub struct CallbackServiceImpl {
	pub callback_repo: Arc<dyn Repository<Callback>>,
	pub notifications: Arc<NotificationService>,
}

impl CallbackServiceImpl {
	pub fn new(callback_repo: Arc<dyn Repository<Callback>>, notifications: Arc<NotificationService>) -> Self {
		Self { callback_repo, notifications }
	}
}

#[async_trait]
impl CallbackService for CallbackServiceImpl {
	#[instrument(skip(self, request))]
	async fn request_callback(&self, request: CreateCallbackRequest) -> Result<Callback, ServiceError> {
		let callback = Callback {
			id: None,
			name: request.name.trim().to_string(),
			phone: request.phone.trim().to_string(),
			preferred_time: clean_text(request.preferred_time),
			message: clean_text(request.message),
			status: CallbackStatus::Pending,
			notes: None,
			contacted_at: None,
			completed_at: None,
			created_at: None,
			updated_at: None,
		};
		let created = self.callback_repo.create(callback).await?;
		info!(callback_id = ?created.id, "Callback request stored");

		self.notifications.callback_requested(&created).await;
		Ok(created)
	}

	#[instrument(skip(self))]
	async fn list_callbacks(&self, filter: ListFilter) -> Result<Page<Callback>, ServiceError> {
		Ok(filter.apply(self.callback_repo.list().await?))
	}

	#[instrument(skip(self, update), fields(id = %id, status = ?update.status))]
	async fn update_callback(&self, id: ObjectId, update: UpdateCallbackRequest) -> Result<Callback, ServiceError> {
		let mut callback = self.callback_repo.get_by_id(id).await?;
		if let Some(status) = update.status {
			ensure_transition(callback.status, status)?;
			callback.apply_status(status, &timestamp());
		}
		if update.notes.is_some() {
			callback.notes = clean_text(update.notes);
		}
		let updated = self.callback_repo.update(id, callback).await?;
		info!("Callback updated");
		Ok(updated)
	}

	#[instrument(skip(self), fields(id = %id))]
	async fn delete_callback(&self, id: ObjectId) -> Result<(), ServiceError> {
		self.callback_repo.delete(id).await?;
		info!("Callback deleted");
		Ok(())
	}
}
