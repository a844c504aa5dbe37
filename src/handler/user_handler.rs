use axum::{extract::{Json, State}, response::IntoResponse};
use std::sync::Arc;
use validator::Validate;

use crate::dto::user_dto::{LoginRequest, RefreshTokenRequest};
use crate::service::user_service::{UserService, UserServiceImpl};
use crate::util::error::HandlerError;

pub async fn login_handler(
    State(service): State<Arc<UserServiceImpl>>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    payload.validate()?;
    let res = service.login(payload.email, payload.password).await?;
    Ok(Json(res))
}

pub async fn refresh_token_handler(
    State(service): State<Arc<UserServiceImpl>>,
    Json(payload): Json<RefreshTokenRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    payload.validate()?;
    let tokens = service.refresh_token(payload.refresh_token).await?;
    Ok(Json(tokens))
}
