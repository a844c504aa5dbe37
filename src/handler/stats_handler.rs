use axum::{extract::State, response::IntoResponse, Json};
use std::sync::Arc;

use crate::service::stats_service::StatsService;
use crate::util::error::HandlerError;

pub async fn dashboard_stats_handler(
    State(service): State<Arc<StatsService>>,
) -> Result<impl IntoResponse, HandlerError> {
    Ok(Json(service.dashboard().await?))
}
