use axum::{extract::{Path, Query, State}, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;
use validator::Validate;

use crate::dto::review_dto::{CreateReviewRequest, SubmitReviewRequest, UpdateReviewRequest};
use crate::dto::FeaturedQuery;
use crate::handler::parse_object_id;
use crate::service::review_service::{ReviewService, ReviewServiceImpl};
use crate::util::error::HandlerError;
use crate::util::filter::ListFilter;

// Public
pub async fn list_published_reviews_handler(
    State(service): State<Arc<ReviewServiceImpl>>,
    Query(query): Query<FeaturedQuery>,
) -> Result<impl IntoResponse, HandlerError> {
    let reviews = service.list_published(query.featured.unwrap_or(false)).await?;
    Ok(Json(reviews))
}

pub async fn submit_review_handler(
    State(service): State<Arc<ReviewServiceImpl>>,
    Json(payload): Json<SubmitReviewRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    payload.validate()?;
    let created = service.submit_review(payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

// Admin
pub async fn list_reviews_handler(
    State(service): State<Arc<ReviewServiceImpl>>,
    Query(filter): Query<ListFilter>,
) -> Result<impl IntoResponse, HandlerError> {
    Ok(Json(service.list_reviews(filter).await?))
}

pub async fn create_review_handler(
    State(service): State<Arc<ReviewServiceImpl>>,
    Json(payload): Json<CreateReviewRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    payload.validate()?;
    let created = service.create_review(payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_review_handler(
    State(service): State<Arc<ReviewServiceImpl>>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateReviewRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let id = parse_object_id(&id, "review")?;
    payload.validate()?;
    Ok(Json(service.update_review(id, payload).await?))
}

pub async fn delete_review_handler(
    State(service): State<Arc<ReviewServiceImpl>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    let id = parse_object_id(&id, "review")?;
    service.delete_review(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
