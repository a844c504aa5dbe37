use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::model::Document;
use crate::util::filter::Searchable;

/// Client testimonial.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub author_name: String,
    pub author_role: Option<String>,
    pub company: Option<String>,
    pub rating: u8,
    pub content: String,
    pub project_id: Option<ObjectId>,
    pub published: bool,
    pub featured: bool,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl Document for Review {
    const COLLECTION: &'static str = "reviews";

    fn id(&self) -> Option<ObjectId> { self.id }
    fn set_id(&mut self, id: ObjectId) { self.id = Some(id); }
    fn created_at(&self) -> Option<&str> { self.created_at.as_deref() }
    fn set_created_at(&mut self, at: String) { self.created_at = Some(at); }
    fn set_updated_at(&mut self, at: String) { self.updated_at = Some(at); }
}

impl Searchable for Review {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.author_name.as_str(), self.content.as_str()];
        fields.extend(self.company.as_deref());
        fields
    }

    fn status_str(&self) -> Option<&str> {
        Some(if self.published { "published" } else { "draft" })
    }
}
