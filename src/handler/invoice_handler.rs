use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderValue, StatusCode},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use validator::Validate;

use crate::dto::invoice_dto::{CreateInvoiceRequest, InvoiceResponse, SendInvoiceRequest, UpdateInvoiceRequest};
use crate::handler::parse_object_id;
use crate::service::invoice_service::{InvoiceService, InvoiceServiceImpl};
use crate::util::error::HandlerError;
use crate::util::filter::ListFilter;

pub async fn list_invoices_handler(
    State(service): State<Arc<InvoiceServiceImpl>>,
    Query(filter): Query<ListFilter>,
) -> Result<impl IntoResponse, HandlerError> {
    let page = service.list_invoices(filter).await?;
    Ok(Json(page.try_map(InvoiceResponse::try_from)?))
}

pub async fn create_invoice_handler(
    State(service): State<Arc<InvoiceServiceImpl>>,
    Json(payload): Json<CreateInvoiceRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    payload.validate()?;
    let created = service.create_invoice(payload).await?;
    Ok((StatusCode::CREATED, Json(InvoiceResponse::try_from(created)?)))
}

pub async fn get_invoice_handler(
    State(service): State<Arc<InvoiceServiceImpl>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    let id = parse_object_id(&id, "invoice")?;
    let invoice = service.get_invoice(id).await?;
    Ok(Json(InvoiceResponse::try_from(invoice)?))
}

pub async fn update_invoice_handler(
    State(service): State<Arc<InvoiceServiceImpl>>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateInvoiceRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let id = parse_object_id(&id, "invoice")?;
    payload.validate()?;
    let updated = service.update_invoice(id, payload).await?;
    Ok(Json(InvoiceResponse::try_from(updated)?))
}

pub async fn delete_invoice_handler(
    State(service): State<Arc<InvoiceServiceImpl>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    let id = parse_object_id(&id, "invoice")?;
    service.delete_invoice(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn invoice_pdf_handler(
    State(service): State<Arc<InvoiceServiceImpl>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    let id = parse_object_id(&id, "invoice")?;
    let pdf = service.invoice_pdf(id).await?;
    let disposition = HeaderValue::from_str(&format!("attachment; filename=\"{}\"", pdf.filename))
        .map_err(|e| HandlerError::internal(format!("Invalid filename header: {}", e)))?;
    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("application/pdf")),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        pdf.bytes,
    ))
}

pub async fn send_invoice_handler(
    State(service): State<Arc<InvoiceServiceImpl>>,
    Path(id): Path<String>,
    Json(payload): Json<SendInvoiceRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let id = parse_object_id(&id, "invoice")?;
    payload.validate()?;
    let sent = service.send_invoice(id, payload).await?;
    Ok(Json(InvoiceResponse::try_from(sent)?))
}
