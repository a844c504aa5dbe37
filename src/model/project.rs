use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::model::Document;
use crate::util::filter::Searchable;

/// Portfolio entry shown on the examples pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub title: String,
    pub slug: String,
    pub client: Option<String>,
    pub category: Option<String>,
    pub description: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    pub url: Option<String>,
    pub image_url: Option<String>,
    pub completed_on: Option<String>,
    pub published: bool,
    pub featured: bool,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl Document for Project {
    const COLLECTION: &'static str = "projects";

    fn id(&self) -> Option<ObjectId> { self.id }
    fn set_id(&mut self, id: ObjectId) { self.id = Some(id); }
    fn created_at(&self) -> Option<&str> { self.created_at.as_deref() }
    fn set_created_at(&mut self, at: String) { self.created_at = Some(at); }
    fn set_updated_at(&mut self, at: String) { self.updated_at = Some(at); }
}

impl Searchable for Project {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.title.as_str(), self.description.as_str()];
        fields.extend(self.client.as_deref());
        fields.extend(self.category.as_deref());
        fields.extend(self.technologies.iter().map(String::as_str));
        fields
    }

    fn status_str(&self) -> Option<&str> {
        Some(if self.published { "published" } else { "draft" })
    }
}

/// Lowercase ASCII slug: runs of anything else collapse to a single `-`.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;
    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}
