pub mod quote;
pub mod quote_wizard;
pub mod callback;
pub mod invoice;
pub mod project;
pub mod review;
pub mod user;

use bson::oid::ObjectId;
use serde::{de::DeserializeOwned, Serialize};

/// A record stored in its own collection, identified by `_id` and stamped
/// with RFC 3339 creation/update times.
pub trait Document: Serialize + DeserializeOwned + Clone + Send + Sync + Unpin + 'static {
    const COLLECTION: &'static str;

    fn id(&self) -> Option<ObjectId>;
    fn set_id(&mut self, id: ObjectId);
    fn created_at(&self) -> Option<&str>;
    fn set_created_at(&mut self, at: String);
    fn set_updated_at(&mut self, at: String);
}

/// Fixed-width UTC timestamp, so lexical order equals chronological order.
pub fn timestamp() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Micros, true)
}

/// Lifecycle shared by every status enum.
pub trait Status: Copy + PartialEq + std::fmt::Debug + 'static {
    fn as_str(&self) -> &'static str;
    fn allowed_next(&self) -> &'static [Self];

    /// Re-applying the current status is accepted as a no-op.
    fn can_transition_to(&self, next: Self) -> bool {
        *self == next || self.allowed_next().contains(&next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_is_fixed_width_utc() {
        let a = timestamp();
        let b = timestamp();
        assert!(a.ends_with('Z'));
        assert_eq!(a.len(), b.len());
        assert!(a <= b);
    }
}
