use axum::{Router, routing::{post, get, patch}, middleware};
use crate::handler::callback_handler::{
    create_callback_handler,
    list_callbacks_handler,
    update_callback_handler,
    delete_callback_handler,
};
use std::sync::Arc;
use crate::service::callback_service::CallbackServiceImpl;
use crate::middlewares::admin_middleware::{admin_auth, AdminAuthState};

pub fn callback_router(service: Arc<CallbackServiceImpl>, admin_auth_state: Arc<AdminAuthState>) -> Router {
    let public = Router::new()
        .route("/callbacks", post(create_callback_handler));

    let admin = Router::new()
        .route("/callbacks", get(list_callbacks_handler))
        .route("/callbacks/{id}", patch(update_callback_handler).delete(delete_callback_handler))
        .route_layer(middleware::from_fn_with_state(admin_auth_state, admin_auth));

    public
        .merge(admin)
        .with_state(service)
}
