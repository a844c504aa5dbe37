//! In-process storage used by tests and `STORAGE_BACKEND=memory`.

use std::collections::BTreeMap;

use async_trait::async_trait;
use bson::oid::ObjectId;
use tokio::sync::RwLock;
use tracing::debug;

use crate::model::{timestamp, Document};
use crate::repository::repository_error::{RepositoryError, RepositoryResult};
use crate::repository::Repository;

pub struct MemoryRepository<T: Document> {
    items: RwLock<BTreeMap<ObjectId, T>>,
    unique_fields: Vec<&'static str>,
}

impl<T: Document> Default for MemoryRepository<T> {
    fn default() -> Self {
        MemoryRepository { items: RwLock::new(BTreeMap::new()), unique_fields: Vec::new() }
    }
}

impl<T: Document> MemoryRepository<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects a second document with the same string value in `field`,
    /// like a unique index does in MongoDB.
    pub fn with_unique_field(mut self, field: &'static str) -> Self {
        self.unique_fields.push(field);
        self
    }

    fn check_unique(&self, items: &BTreeMap<ObjectId, T>, item: &T, own_id: Option<ObjectId>) -> RepositoryResult<()> {
        if self.unique_fields.is_empty() {
            return Ok(());
        }
        let json = serde_json::to_value(item)?;
        for field in &self.unique_fields {
            let Some(value) = json.get(*field).and_then(serde_json::Value::as_str) else {
                continue;
            };
            for (id, other) in items {
                if Some(*id) != own_id && field_matches(other, field, value)? {
                    return Err(RepositoryError::already_exists(format!(
                        "Duplicate key: {} with {} '{}' already exists",
                        T::COLLECTION,
                        field,
                        value
                    )));
                }
            }
        }
        Ok(())
    }
}

fn field_matches<T: Document>(item: &T, field: &str, value: &str) -> RepositoryResult<bool> {
    let json = serde_json::to_value(item)?;
    Ok(json.get(field).and_then(serde_json::Value::as_str) == Some(value))
}

#[async_trait]
impl<T: Document> Repository<T> for MemoryRepository<T> {
    async fn create(&self, mut item: T) -> RepositoryResult<T> {
        let id = ObjectId::new();
        let now = timestamp();
        item.set_id(id);
        item.set_created_at(now.clone());
        item.set_updated_at(now);
        let mut items = self.items.write().await;
        self.check_unique(&items, &item, None)?;
        items.insert(id, item.clone());
        debug!(collection = T::COLLECTION, %id, "Stored document in memory");
        Ok(item)
    }

    async fn get_by_id(&self, id: ObjectId) -> RepositoryResult<T> {
        self.items
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| RepositoryError::not_found(format!("{} not found for ID: {}", T::COLLECTION, id)))
    }

    async fn update(&self, id: ObjectId, mut item: T) -> RepositoryResult<T> {
        let mut items = self.items.write().await;
        if !items.contains_key(&id) {
            return Err(RepositoryError::not_found(format!("No {} found to update for ID: {}", T::COLLECTION, id)));
        }
        self.check_unique(&items, &item, Some(id))?;
        let existing = items
            .get_mut(&id)
            .ok_or_else(|| RepositoryError::not_found(format!("No {} found to update for ID: {}", T::COLLECTION, id)))?;
        item.set_id(id);
        if item.created_at().is_none() {
            if let Some(created) = existing.created_at() {
                item.set_created_at(created.to_string());
            }
        }
        item.set_updated_at(timestamp());
        *existing = item.clone();
        Ok(item)
    }

    async fn delete(&self, id: ObjectId) -> RepositoryResult<()> {
        self.items
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| RepositoryError::not_found(format!("No {} found to delete for ID: {}", T::COLLECTION, id)))
    }

    async fn list(&self) -> RepositoryResult<Vec<T>> {
        let mut items: Vec<T> = self.items.read().await.values().cloned().collect();
        items.sort_by(|a, b| b.created_at().cmp(&a.created_at()).then_with(|| b.id().cmp(&a.id())));
        Ok(items)
    }

    async fn find_by_field(&self, field: &str, value: &str) -> RepositoryResult<Option<T>> {
        for item in self.items.read().await.values() {
            if field_matches(item, field, value)? {
                return Ok(Some(item.clone()));
            }
        }
        Ok(None)
    }

    async fn count(&self) -> RepositoryResult<u64> {
        Ok(self.items.read().await.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::user::User;

    fn user(username: &str) -> User {
        User {
            id: None,
            username: username.to_string(),
            first_name: "Ada".to_string(),
            last_name: "Admin".to_string(),
            email: format!("{}@harbonline.test", username),
            password_hash: "hash".to_string(),
            role: "admin".to_string(),
            created_at: None,
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_timestamps() {
        let repo = MemoryRepository::<User>::new();
        let created = repo.create(user("ada")).await.unwrap();
        assert!(created.id.is_some());
        assert_eq!(created.created_at, created.updated_at);
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let repo = MemoryRepository::<User>::new();
        for name in ["first", "second", "third"] {
            repo.create(user(name)).await.unwrap();
        }
        let names: Vec<String> = repo.list().await.unwrap().into_iter().map(|u| u.username).collect();
        assert_eq!(names, vec!["third", "second", "first"]);
    }

    #[tokio::test]
    async fn test_update_keeps_created_at() {
        let repo = MemoryRepository::<User>::new();
        let created = repo.create(user("ada")).await.unwrap();
        let id = created.id.unwrap();

        let mut changed = created.clone();
        changed.created_at = None;
        changed.first_name = "Augusta".to_string();
        let updated = repo.update(id, changed).await.unwrap();

        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(repo.get_by_id(id).await.unwrap().first_name, "Augusta");
    }

    #[tokio::test]
    async fn test_missing_records_are_not_found() {
        let repo = MemoryRepository::<User>::new();
        let id = ObjectId::new();
        assert!(matches!(repo.get_by_id(id).await, Err(RepositoryError::NotFound(_))));
        assert!(matches!(repo.update(id, user("x")).await, Err(RepositoryError::NotFound(_))));
        assert!(matches!(repo.delete(id).await, Err(RepositoryError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_unique_field_rejects_duplicates() {
        let repo = MemoryRepository::<User>::new().with_unique_field("email");
        let ada = repo.create(user("ada")).await.unwrap();
        repo.create(user("grace")).await.unwrap();

        let mut twin = user("ada");
        twin.username = "ada2".to_string();
        assert!(matches!(repo.create(twin).await, Err(RepositoryError::AlreadyExists(_))));
        assert_eq!(repo.count().await.unwrap(), 2);

        let mut clash = ada.clone();
        clash.email = "grace@harbonline.test".to_string();
        assert!(matches!(repo.update(ada.id.unwrap(), clash).await, Err(RepositoryError::AlreadyExists(_))));

        // Saving a document over itself is not a clash.
        let mut renamed = ada.clone();
        renamed.first_name = "Augusta".to_string();
        assert!(repo.update(ada.id.unwrap(), renamed).await.is_ok());
    }

    #[tokio::test]
    async fn test_find_by_field() {
        let repo = MemoryRepository::<User>::new();
        repo.create(user("ada")).await.unwrap();
        repo.create(user("grace")).await.unwrap();
        let found = repo.find_by_field("username", "grace").await.unwrap();
        assert_eq!(found.map(|u| u.email), Some("grace@harbonline.test".to_string()));
        assert!(repo.find_by_field("username", "nobody").await.unwrap().is_none());
    }
}
