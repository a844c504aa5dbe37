use axum::{body::Body, extract::State, http::{header, Request}, middleware::Next, response::{IntoResponse, Response}};
use std::sync::Arc;
use tracing::warn;

use crate::util::error::{HandlerError, HandlerErrorKind};
use crate::util::jwt::JwtTokenUtils;

pub struct AdminAuthState {
    pub jwt_utils: Arc<dyn JwtTokenUtils>,
}

/// Lets a request through only with a valid admin access token.
/// The decoded claims are attached to the request extensions.
pub async fn admin_auth(
    State(state): State<Arc<AdminAuthState>>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let auth_header = match req.headers().get(header::AUTHORIZATION).and_then(|v| v.to_str().ok()) {
        Some(h) => h,
        None => return HandlerError::unauthorized("Missing Authorization header").into_response(),
    };

    let token = match state.jwt_utils.extract_token_from_header(auth_header) {
        Ok(t) => t,
        Err(_) => return HandlerError::unauthorized("Invalid Authorization header").into_response(),
    };
    let claims = match state.jwt_utils.validate_access_token(&token) {
        Ok(c) => c,
        Err(e) => {
            warn!("Rejected admin token: {}", e);
            return HandlerError::unauthorized("Invalid or expired token").into_response();
        }
    };

    if !state.jwt_utils.is_admin(&claims) {
        return HandlerError::new(HandlerErrorKind::Forbidden, "Admin access required").into_response();
    }

    req.extensions_mut().insert(claims);
    next.run(req).await
}
