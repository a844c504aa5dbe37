pub mod quote_dto;
pub mod callback_dto;
pub mod invoice_dto;
pub mod project_dto;
pub mod review_dto;
pub mod user_dto;

use serde::Deserialize;

/// `?featured=true` on the public showcase endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeaturedQuery {
    pub featured: Option<bool>,
}
