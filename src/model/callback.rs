use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::model::{Document, Status};
use crate::util::filter::Searchable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallbackStatus {
    Pending,
    Contacted,
    Completed,
}

impl Status for CallbackStatus {
    fn as_str(&self) -> &'static str {
        match self {
            CallbackStatus::Pending => "pending",
            CallbackStatus::Contacted => "contacted",
            CallbackStatus::Completed => "completed",
        }
    }

    fn allowed_next(&self) -> &'static [Self] {
        match self {
            CallbackStatus::Pending => &[CallbackStatus::Contacted, CallbackStatus::Completed],
            CallbackStatus::Contacted => &[CallbackStatus::Completed],
            CallbackStatus::Completed => &[],
        }
    }
}

/// A visitor asking to be phoned back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Callback {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub phone: String,
    pub preferred_time: Option<String>,
    pub message: Option<String>,

    pub status: CallbackStatus,
    pub notes: Option<String>,
    pub contacted_at: Option<String>,
    pub completed_at: Option<String>,

    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl Callback {
    /// Moves to `status`, stamping the matching timestamp the first time it is reached.
    pub fn apply_status(&mut self, status: CallbackStatus, now: &str) {
        self.status = status;
        match status {
            CallbackStatus::Contacted if self.contacted_at.is_none() => {
                self.contacted_at = Some(now.to_string());
            }
            CallbackStatus::Completed if self.completed_at.is_none() => {
                self.completed_at = Some(now.to_string());
            }
            _ => {}
        }
    }
}

impl Document for Callback {
    const COLLECTION: &'static str = "callbacks";

    fn id(&self) -> Option<ObjectId> { self.id }
    fn set_id(&mut self, id: ObjectId) { self.id = Some(id); }
    fn created_at(&self) -> Option<&str> { self.created_at.as_deref() }
    fn set_created_at(&mut self, at: String) { self.created_at = Some(at); }
    fn set_updated_at(&mut self, at: String) { self.updated_at = Some(at); }
}

impl Searchable for Callback {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str(), self.phone.as_str()];
        fields.extend(self.message.as_deref());
        fields
    }

    fn status_str(&self) -> Option<&str> {
        Some(self.status.as_str())
    }
}
