use axum::{extract::{Path, Query, State}, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;
use validator::Validate;

use crate::dto::callback_dto::{CreateCallbackRequest, UpdateCallbackRequest};
use crate::handler::parse_object_id;
use crate::service::callback_service::{CallbackService, CallbackServiceImpl};
use crate::util::error::HandlerError;
use crate::util::filter::ListFilter;

pub async fn create_callback_handler(
    State(service): State<Arc<CallbackServiceImpl>>,
    Json(payload): Json<CreateCallbackRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    payload.validate()?;
    let created = service.request_callback(payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn list_callbacks_handler(
    State(service): State<Arc<CallbackServiceImpl>>,
    Query(filter): Query<ListFilter>,
) -> Result<impl IntoResponse, HandlerError> {
    Ok(Json(service.list_callbacks(filter).await?))
}

pub async fn update_callback_handler(
    State(service): State<Arc<CallbackServiceImpl>>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateCallbackRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let id = parse_object_id(&id, "callback")?;
    payload.validate()?;
    Ok(Json(service.update_callback(id, payload).await?))
}

pub async fn delete_callback_handler(
    State(service): State<Arc<CallbackServiceImpl>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    let id = parse_object_id(&id, "callback")?;
    service.delete_callback(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
