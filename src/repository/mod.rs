pub mod repository_error;
pub mod mongo_repo;
pub mod memory_repo;

use async_trait::async_trait;
use bson::oid::ObjectId;

use crate::model::Document;
use repository_error::RepositoryResult;

pub use memory_repo::MemoryRepository;
pub use mongo_repo::MongoRepository;

/// Storage operations shared by every collection.
#[async_trait]
pub trait Repository<T: Document>: Send + Sync {
    /// Assigns the id and both timestamps, then stores the record.
    async fn create(&self, item: T) -> RepositoryResult<T>;
    async fn get_by_id(&self, id: ObjectId) -> RepositoryResult<T>;
    /// Replaces the stored record and refreshes `updated_at`.
    async fn update(&self, id: ObjectId, item: T) -> RepositoryResult<T>;
    async fn delete(&self, id: ObjectId) -> RepositoryResult<()>;
    /// Every record, newest first.
    async fn list(&self) -> RepositoryResult<Vec<T>>;
    /// First record whose string `field` equals `value`.
    async fn find_by_field(&self, field: &str, value: &str) -> RepositoryResult<Option<T>>;
    async fn count(&self) -> RepositoryResult<u64>;
}
