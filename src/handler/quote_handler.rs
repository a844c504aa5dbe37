use axum::{extract::{Path, Query, State}, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;
use tracing::info;
use validator::Validate;

use crate::dto::quote_dto::{SendQuoteConfirmationRequest, UpdateQuoteRequest, WizardStepRequest};
use crate::handler::parse_object_id;
use crate::model::quote_wizard::QuoteDraft;
use crate::service::quote_service::{QuoteService, QuoteServiceImpl};
use crate::util::error::HandlerError;
use crate::util::filter::ListFilter;

// Public: the final wizard submission
pub async fn create_quote_handler(
    State(service): State<Arc<QuoteServiceImpl>>,
    Json(draft): Json<QuoteDraft>,
) -> Result<impl IntoResponse, HandlerError> {
    info!("[create_quote_handler] Handler called");
    let created = service.submit_quote(draft).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn wizard_step_handler(
    State(service): State<Arc<QuoteServiceImpl>>,
    Json(payload): Json<WizardStepRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let response = service.wizard_step(payload)?;
    Ok(Json(response))
}

pub async fn send_quote_confirmation_handler(
    State(service): State<Arc<QuoteServiceImpl>>,
    Json(payload): Json<SendQuoteConfirmationRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    payload.validate()?;
    let id = parse_object_id(&payload.quote_id, "quote")?;
    service.resend_confirmation(id).await?;
    Ok(Json(json!({ "sent": true })))
}

// Admin
pub async fn list_quotes_handler(
    State(service): State<Arc<QuoteServiceImpl>>,
    Query(filter): Query<ListFilter>,
) -> Result<impl IntoResponse, HandlerError> {
    let page = service.list_quotes(filter).await?;
    Ok(Json(page))
}

pub async fn get_quote_handler(
    State(service): State<Arc<QuoteServiceImpl>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    let id = parse_object_id(&id, "quote")?;
    let quote = service.get_quote(id).await?;
    Ok(Json(quote))
}

pub async fn update_quote_handler(
    State(service): State<Arc<QuoteServiceImpl>>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateQuoteRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let id = parse_object_id(&id, "quote")?;
    payload.validate()?;
    let updated = service.update_quote(id, payload).await?;
    Ok(Json(updated))
}

pub async fn delete_quote_handler(
    State(service): State<Arc<QuoteServiceImpl>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    let id = parse_object_id(&id, "quote")?;
    service.delete_quote(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
