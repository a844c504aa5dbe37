use std::sync::Arc;

use async_trait::async_trait;
use bson::oid::ObjectId;
use tracing::{info, instrument};

use crate::dto::review_dto::{CreateReviewRequest, SubmitReviewRequest, UpdateReviewRequest};
use crate::model::review::Review;
use crate::repository::Repository;
use crate::service::clean_text;
use crate::util::error::ServiceError;
use crate::util::filter::{ListFilter, Page};

#[async_trait]
pub trait ReviewService: Send + Sync {
	async fn list_published(&self, featured_only: bool) -> Result<Vec<Review>, ServiceError>;
	/// Public testimonial submission; stays hidden until an admin publishes it.
	async fn submit_review(&self, request: SubmitReviewRequest) -> Result<Review, ServiceError>;
	async fn list_reviews(&self, filter: ListFilter) -> Result<Page<Review>, ServiceError>;
	async fn create_review(&self, request: CreateReviewRequest) -> Result<Review, ServiceError>;
	async fn update_review(&self, id: ObjectId, update: UpdateReviewRequest) -> Result<Review, ServiceError>;
	async fn delete_review(&self, id: ObjectId) -> Result<(), ServiceError>;
}

pub struct ReviewServiceImpl {
	pub review_repo: Arc<dyn Repository<Review>>,
}

fn parse_project_id(raw: &str) -> Result<ObjectId, ServiceError> {
	ObjectId::parse_str(raw).map_err(|_| ServiceError::InvalidInput(format!("Invalid project id: {}", raw)))
}

fn new_review(request: SubmitReviewRequest) -> Review {
	Review {
		id: None,
		author_name: request.author_name.trim().to_string(),
		author_role: clean_text(request.author_role),
		company: clean_text(request.company),
		rating: request.rating,
		content: request.content.trim().to_string(),
		project_id: None,
		published: false,
		featured: false,
		created_at: None,
		updated_at: None,
	}
}

impl ReviewServiceImpl {
	pub fn new(review_repo: Arc<dyn Repository<Review>>) -> Self {
		Self { review_repo }
	}
}

#[async_trait]
impl ReviewService for ReviewServiceImpl {
	#[instrument(skip(self))]
	async fn list_published(&self, featured_only: bool) -> Result<Vec<Review>, ServiceError> {
		let reviews = self.review_repo.list().await?;
		Ok(reviews
			.into_iter()
			.filter(|r| r.published && (!featured_only || r.featured))
			.collect())
	}

	#[instrument(skip(self, request), fields(author = %request.author_name))]
	async fn submit_review(&self, request: SubmitReviewRequest) -> Result<Review, ServiceError> {
		let created = self.review_repo.create(new_review(request)).await?;
		info!(review_id = ?created.id, "Review submitted for moderation");
		Ok(created)
	}

	#[instrument(skip(self))]
	async fn list_reviews(&self, filter: ListFilter) -> Result<Page<Review>, ServiceError> {
		Ok(filter.apply(self.review_repo.list().await?))
	}

	#[instrument(skip(self, request))]
	async fn create_review(&self, request: CreateReviewRequest) -> Result<Review, ServiceError> {
		let mut review = new_review(request.review);
		review.project_id = request.project_id.as_deref().map(parse_project_id).transpose()?;
		review.published = request.published;
		review.featured = request.featured;
		let created = self.review_repo.create(review).await?;
		info!(review_id = ?created.id, "Review created");
		Ok(created)
	}

	#[instrument(skip(self, update), fields(id = %id))]
	async fn update_review(&self, id: ObjectId, update: UpdateReviewRequest) -> Result<Review, ServiceError> {
		let mut review = self.review_repo.get_by_id(id).await?;
		if let Some(name) = update.author_name {
			review.author_name = name.trim().to_string();
		}
		if update.author_role.is_some() {
			review.author_role = clean_text(update.author_role);
		}
		if update.company.is_some() {
			review.company = clean_text(update.company);
		}
		if let Some(rating) = update.rating {
			review.rating = rating;
		}
		if let Some(content) = update.content {
			review.content = content.trim().to_string();
		}
		if let Some(project_id) = update.project_id.as_deref() {
			review.project_id = Some(parse_project_id(project_id)?);
		}
		if let Some(published) = update.published {
			review.published = published;
		}
		if let Some(featured) = update.featured {
			review.featured = featured;
		}
		let updated = self.review_repo.update(id, review).await?;
		info!("Review updated");
		Ok(updated)
	}

	#[instrument(skip(self), fields(id = %id))]
	async fn delete_review(&self, id: ObjectId) -> Result<(), ServiceError> {
		self.review_repo.delete(id).await?;
		info!("Review deleted");
		Ok(())
	}
}
