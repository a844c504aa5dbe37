use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::model::callback::CallbackStatus;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateCallbackRequest {
    #[validate(length(min = 2, max = 100, message = "Name must be between 2 and 100 characters"))]
    pub name: String,

    #[validate(length(min = 6, max = 20, message = "Phone number must be between 6 and 20 characters"))]
    pub phone: String,

    #[validate(length(max = 100))]
    pub preferred_time: Option<String>,

    #[validate(length(max = 2000, message = "Message must be at most 2000 characters"))]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateCallbackRequest {
    pub status: Option<CallbackStatus>,
    #[validate(length(max = 5000))]
    pub notes: Option<String>,
}
