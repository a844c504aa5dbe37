pub mod quote_router;
pub mod callback_router;
pub mod invoice_router;
pub mod project_router;
pub mod review_router;
pub mod stats_router;
pub mod user_router;
