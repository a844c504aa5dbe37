use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateProjectRequest {
    #[validate(length(min = 2, max = 200))]
    pub title: String,
    /// Generated from the title when absent
    #[validate(length(min = 1, max = 200))]
    pub slug: Option<String>,
    pub client: Option<String>,
    pub category: Option<String>,
    #[validate(length(min = 1, max = 10000))]
    pub description: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[validate(url)]
    pub url: Option<String>,
    #[validate(url)]
    pub image_url: Option<String>,
    pub completed_on: Option<String>,
    #[serde(default)]
    pub published: bool,
    #[serde(default)]
    pub featured: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateProjectRequest {
    #[validate(length(min = 2, max = 200))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub slug: Option<String>,
    pub client: Option<String>,
    pub category: Option<String>,
    #[validate(length(min = 1, max = 10000))]
    pub description: Option<String>,
    pub technologies: Option<Vec<String>>,
    #[validate(url)]
    pub url: Option<String>,
    #[validate(url)]
    pub image_url: Option<String>,
    pub completed_on: Option<String>,
    pub published: Option<bool>,
    pub featured: Option<bool>,
}
