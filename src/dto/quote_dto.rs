use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::model::quote::QuoteStatus;
use crate::model::quote_wizard::QuoteDraft;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardDirection {
    #[default]
    Validate,
    Next,
    Back,
}

/// Body of `POST /quotes/wizard/step`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WizardStepRequest {
    pub step: u8,
    #[serde(default)]
    pub direction: WizardDirection,
    #[serde(default)]
    pub draft: QuoteDraft,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WizardStepResponse {
    /// Step the visitor should now see
    pub step: u8,
    pub total_steps: u8,
    pub title: String,
    pub valid: bool,
    pub errors: Vec<String>,
    pub is_last: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateQuoteRequest {
    pub status: Option<QuoteStatus>,
    #[validate(length(max = 5000, message = "Notes must be at most 5000 characters"))]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SendQuoteConfirmationRequest {
    #[validate(length(equal = 24, message = "quote_id must be a 24 character ObjectId"))]
    pub quote_id: String,
}
