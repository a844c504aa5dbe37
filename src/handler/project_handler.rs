use axum::{extract::{Path, Query, State}, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;
use validator::Validate;

use crate::dto::project_dto::{CreateProjectRequest, UpdateProjectRequest};
use crate::dto::FeaturedQuery;
use crate::handler::parse_object_id;
use crate::service::project_service::{ProjectService, ProjectServiceImpl};
use crate::util::error::HandlerError;
use crate::util::filter::ListFilter;

// Public
pub async fn list_published_projects_handler(
    State(service): State<Arc<ProjectServiceImpl>>,
    Query(query): Query<FeaturedQuery>,
) -> Result<impl IntoResponse, HandlerError> {
    let projects = service.list_published(query.featured.unwrap_or(false)).await?;
    Ok(Json(projects))
}

pub async fn get_project_by_slug_handler(
    State(service): State<Arc<ProjectServiceImpl>>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    Ok(Json(service.get_published_by_slug(&slug).await?))
}

// Admin
pub async fn list_projects_handler(
    State(service): State<Arc<ProjectServiceImpl>>,
    Query(filter): Query<ListFilter>,
) -> Result<impl IntoResponse, HandlerError> {
    Ok(Json(service.list_projects(filter).await?))
}

pub async fn create_project_handler(
    State(service): State<Arc<ProjectServiceImpl>>,
    Json(payload): Json<CreateProjectRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    payload.validate()?;
    let created = service.create_project(payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_project_handler(
    State(service): State<Arc<ProjectServiceImpl>>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateProjectRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let id = parse_object_id(&id, "project")?;
    payload.validate()?;
    Ok(Json(service.update_project(id, payload).await?))
}

pub async fn delete_project_handler(
    State(service): State<Arc<ProjectServiceImpl>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    let id = parse_object_id(&id, "project")?;
    service.delete_project(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
