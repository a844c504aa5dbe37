use axum::{Router, routing::{post, get}, middleware};
use crate::handler::invoice_handler::{
    list_invoices_handler,
    create_invoice_handler,
    get_invoice_handler,
    update_invoice_handler,
    delete_invoice_handler,
    invoice_pdf_handler,
    send_invoice_handler,
};
use std::sync::Arc;
use crate::service::invoice_service::InvoiceServiceImpl;
use crate::middlewares::admin_middleware::{admin_auth, AdminAuthState};

// Every invoice route is admin only
pub fn invoice_router(service: Arc<InvoiceServiceImpl>, admin_auth_state: Arc<AdminAuthState>) -> Router {
    Router::new()
        .route("/invoices", get(list_invoices_handler).post(create_invoice_handler))
        .route("/invoices/{id}", get(get_invoice_handler).patch(update_invoice_handler).delete(delete_invoice_handler))
        .route("/invoices/{id}/pdf", get(invoice_pdf_handler))
        .route("/invoices/{id}/send", post(send_invoice_handler))
        .route_layer(middleware::from_fn_with_state(admin_auth_state, admin_auth))
        .with_state(service)
}
