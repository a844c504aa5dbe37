use std::sync::Arc;

use async_trait::async_trait;
use bson::oid::ObjectId;
use tracing::{info, instrument};

use crate::dto::project_dto::{CreateProjectRequest, UpdateProjectRequest};
use crate::model::project::{slugify, Project};
use crate::repository::Repository;
use crate::service::clean_text;
use crate::util::error::ServiceError;
use crate::util::filter::{ListFilter, Page};

#[async_trait]
pub trait ProjectService: Send + Sync {
	/// Published projects, newest first; `featured_only` narrows to the home page picks.
	async fn list_published(&self, featured_only: bool) -> Result<Vec<Project>, ServiceError>;
	async fn get_published_by_slug(&self, slug: &str) -> Result<Project, ServiceError>;
	async fn list_projects(&self, filter: ListFilter) -> Result<Page<Project>, ServiceError>;
	async fn create_project(&self, request: CreateProjectRequest) -> Result<Project, ServiceError>;
	async fn update_project(&self, id: ObjectId, update: UpdateProjectRequest) -> Result<Project, ServiceError>;
	async fn delete_project(&self, id: ObjectId) -> Result<(), ServiceError>;
}

pub struct ProjectServiceImpl {
	pub project_repo: Arc<dyn Repository<Project>>,
}

impl ProjectServiceImpl {
	pub fn new(project_repo: Arc<dyn Repository<Project>>) -> Self {
		Self { project_repo }
	}

	async fn ensure_slug_free(&self, slug: &str, owner: Option<ObjectId>) -> Result<(), ServiceError> {
		if slug.is_empty() {
			return Err(ServiceError::InvalidInput("Slug must contain at least one letter or digit".to_string()));
		}
		match self.project_repo.find_by_field("slug", slug).await? {
			Some(existing) if existing.id != owner => {
				Err(ServiceError::Conflict(format!("A project with slug '{}' already exists", slug)))
			}
			_ => Ok(()),
		}
	}
}

#[async_trait]
impl ProjectService for ProjectServiceImpl {
	#[instrument(skip(self))]
	async fn list_published(&self, featured_only: bool) -> Result<Vec<Project>, ServiceError> {
		let projects = self.project_repo.list().await?;
		Ok(projects
			.into_iter()
			.filter(|p| p.published && (!featured_only || p.featured))
			.collect())
	}

	#[instrument(skip(self))]
	async fn get_published_by_slug(&self, slug: &str) -> Result<Project, ServiceError> {
		match self.project_repo.find_by_field("slug", slug).await? {
			Some(project) if project.published => Ok(project),
			_ => Err(ServiceError::NotFound(format!("Project '{}' not found", slug))),
		}
	}

	#[instrument(skip(self))]
	async fn list_projects(&self, filter: ListFilter) -> Result<Page<Project>, ServiceError> {
		Ok(filter.apply(self.project_repo.list().await?))
	}

	#[instrument(skip(self, request), fields(title = %request.title))]
	async fn create_project(&self, request: CreateProjectRequest) -> Result<Project, ServiceError> {
		let slug = slugify(request.slug.as_deref().unwrap_or(request.title.as_str()));
		self.ensure_slug_free(&slug, None).await?;

		let project = Project {
			id: None,
			title: request.title.trim().to_string(),
			slug,
			client: clean_text(request.client),
			category: clean_text(request.category),
			description: request.description.trim().to_string(),
			technologies: request.technologies.into_iter().filter_map(|t| clean_text(Some(t))).collect(),
			url: clean_text(request.url),
			image_url: clean_text(request.image_url),
			completed_on: clean_text(request.completed_on),
			published: request.published,
			featured: request.featured,
			created_at: None,
			updated_at: None,
		};
		let created = self.project_repo.create(project).await?;
		info!(slug = %created.slug, "Project created");
		Ok(created)
	}

	#[instrument(skip(self, update), fields(id = %id))]
	async fn update_project(&self, id: ObjectId, update: UpdateProjectRequest) -> Result<Project, ServiceError> {
		let mut project = self.project_repo.get_by_id(id).await?;

		if let Some(slug) = update.slug {
			let slug = slugify(&slug);
			self.ensure_slug_free(&slug, Some(id)).await?;
			project.slug = slug;
		}
		if let Some(title) = update.title {
			project.title = title.trim().to_string();
		}
		if update.client.is_some() {
			project.client = clean_text(update.client);
		}
		if update.category.is_some() {
			project.category = clean_text(update.category);
		}
		if let Some(description) = update.description {
			project.description = description.trim().to_string();
		}
		if let Some(technologies) = update.technologies {
			project.technologies = technologies.into_iter().filter_map(|t| clean_text(Some(t))).collect();
		}
		if update.url.is_some() {
			project.url = clean_text(update.url);
		}
		if update.image_url.is_some() {
			project.image_url = clean_text(update.image_url);
		}
		if update.completed_on.is_some() {
			project.completed_on = clean_text(update.completed_on);
		}
		if let Some(published) = update.published {
			project.published = published;
		}
		if let Some(featured) = update.featured {
			project.featured = featured;
		}

		let updated = self.project_repo.update(id, project).await?;
		info!("Project updated");
		Ok(updated)
	}

	#[instrument(skip(self), fields(id = %id))]
	async fn delete_project(&self, id: ObjectId) -> Result<(), ServiceError> {
		self.project_repo.delete(id).await?;
		info!("Project deleted");
		Ok(())
	}
}
