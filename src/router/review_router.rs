use axum::{Router, routing::{get, patch}, middleware};
use crate::handler::review_handler::{
    list_published_reviews_handler,
    submit_review_handler,
    list_reviews_handler,
    create_review_handler,
    update_review_handler,
    delete_review_handler,
};
use std::sync::Arc;
use crate::service::review_service::ReviewServiceImpl;
use crate::middlewares::admin_middleware::{admin_auth, AdminAuthState};

pub fn review_router(service: Arc<ReviewServiceImpl>, admin_auth_state: Arc<AdminAuthState>) -> Router {
    let public = Router::new()
        .route("/reviews", get(list_published_reviews_handler).post(submit_review_handler));

    let admin = Router::new()
        .route("/admin/reviews", get(list_reviews_handler).post(create_review_handler))
        .route("/admin/reviews/{id}", patch(update_review_handler).delete(delete_review_handler))
        .route_layer(middleware::from_fn_with_state(admin_auth_state, admin_auth));

    public
        .merge(admin)
        .with_state(service)
}
