use axum::{Router, routing::{post, get}, middleware};
use crate::handler::quote_handler::{
    create_quote_handler,
    wizard_step_handler,
    send_quote_confirmation_handler,
    list_quotes_handler,
    get_quote_handler,
    update_quote_handler,
    delete_quote_handler,
};
use std::sync::Arc;
use crate::service::quote_service::QuoteServiceImpl;
use crate::middlewares::admin_middleware::{admin_auth, AdminAuthState};

pub fn quote_router(service: Arc<QuoteServiceImpl>, admin_auth_state: Arc<AdminAuthState>) -> Router {
    let public = Router::new()
        .route("/quotes", post(create_quote_handler))
        .route("/quotes/wizard/step", post(wizard_step_handler))
        .route("/send-quote-confirmation", post(send_quote_confirmation_handler));

    let admin = Router::new()
        .route("/quotes", get(list_quotes_handler))
        .route("/quotes/{id}", get(get_quote_handler).patch(update_quote_handler).delete(delete_quote_handler))
        .route_layer(middleware::from_fn_with_state(admin_auth_state, admin_auth));

    public
        .merge(admin)
        .with_state(service)
}
