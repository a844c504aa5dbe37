use serde::{Deserialize, Serialize};
use validator::Validate;

/// Testimonial sent from the public site; stored unpublished.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SubmitReviewRequest {
    #[validate(length(min = 2, max = 100, message = "Name must be between 2 and 100 characters"))]
    pub author_name: String,
    #[validate(length(max = 100))]
    pub author_role: Option<String>,
    #[validate(length(max = 100))]
    pub company: Option<String>,
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: u8,
    #[validate(length(min = 10, max = 2000, message = "Review must be between 10 and 2000 characters"))]
    pub content: String,
}

/// Admin-authored review; may be published straight away.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateReviewRequest {
    #[validate(nested)]
    #[serde(flatten)]
    pub review: SubmitReviewRequest,
    /// Hex ObjectId of the related project
    #[validate(length(equal = 24))]
    pub project_id: Option<String>,
    #[serde(default)]
    pub published: bool,
    #[serde(default)]
    pub featured: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateReviewRequest {
    #[validate(length(min = 2, max = 100))]
    pub author_name: Option<String>,
    pub author_role: Option<String>,
    pub company: Option<String>,
    #[validate(range(min = 1, max = 5))]
    pub rating: Option<u8>,
    #[validate(length(min = 10, max = 2000))]
    pub content: Option<String>,
    #[validate(length(equal = 24))]
    pub project_id: Option<String>,
    pub published: Option<bool>,
    pub featured: Option<bool>,
}
