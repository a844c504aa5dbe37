pub mod health_handler;
pub mod quote_handler;
pub mod callback_handler;
pub mod invoice_handler;
pub mod project_handler;
pub mod review_handler;
pub mod stats_handler;
pub mod user_handler;

use bson::oid::ObjectId;

use crate::util::error::HandlerError;

/// Parses a path id, answering 400 on anything that is not a 24 character hex ObjectId.
pub fn parse_object_id(raw: &str, what: &str) -> Result<ObjectId, HandlerError> {
    ObjectId::parse_str(raw).map_err(|_| HandlerError::bad_request(format!("Invalid {} id", what)))
}
