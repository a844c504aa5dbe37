use axum::{Router, routing::get, middleware};
use crate::handler::stats_handler::dashboard_stats_handler;
use std::sync::Arc;
use crate::service::stats_service::StatsService;
use crate::middlewares::admin_middleware::{admin_auth, AdminAuthState};

pub fn stats_router(service: Arc<StatsService>, admin_auth_state: Arc<AdminAuthState>) -> Router {
    Router::new()
        .route("/admin/stats", get(dashboard_stats_handler))
        .route_layer(middleware::from_fn_with_state(admin_auth_state, admin_auth))
        .with_state(service)
}
