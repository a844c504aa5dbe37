pub mod notification_service;
pub mod user_service;
pub mod quote_service;
pub mod callback_service;
pub mod invoice_service;
pub mod project_service;
pub mod review_service;
pub mod stats_service;

use crate::model::Status;
use crate::util::error::ServiceError;

/// Rejects moves outside the lifecycle graph. Re-applying the current status passes.
pub fn ensure_transition<S: Status>(current: S, next: S) -> Result<(), ServiceError> {
	if current.can_transition_to(next) {
		Ok(())
	} else {
		Err(ServiceError::InvalidInput(format!(
			"Cannot change status from {} to {}",
			current.as_str(),
			next.as_str()
		)))
	}
}

/// Trims optional free text and turns blank strings into `None`.
pub fn clean_text(value: Option<String>) -> Option<String> {
	value.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}
