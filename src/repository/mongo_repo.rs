use async_trait::async_trait;
use bson::{doc, oid::ObjectId};
use futures::stream::TryStreamExt;
use mongodb::{
    options::{ClientOptions, Credential, FindOptions, IndexOptions, ResolverConfig},
    Client, Collection, Database, IndexModel,
};
use tracing::{error, info};

use crate::config::mongo_conf::MongoConfig;
use crate::model::{timestamp, Document};
use crate::repository::repository_error::{RepositoryError, RepositoryResult};
use crate::repository::Repository;

/// Opens a client from `MongoConfig` and returns the configured database.
pub async fn connect_database(config: &MongoConfig) -> Result<Database, mongodb::error::Error> {
    let mut client_options = ClientOptions::parse_with_resolver_config(&config.uri, ResolverConfig::cloudflare()).await?;
    client_options.app_name = Some("HarbonlineBackend".to_string());
    client_options.max_pool_size = Some(config.pool_size);
    client_options.connect_timeout = Some(std::time::Duration::from_secs(config.connection_timeout_secs));

    if let (Some(ref username), Some(ref password)) = (&config.username, &config.password) {
        client_options.credential = Some(Credential::builder()
            .username(username.clone())
            .password(password.clone())
            .build());
    }

    let client = Client::with_options(client_options)?;
    info!(database = %config.database, "MongoDB client created");
    Ok(client.database(&config.database))
}

pub struct MongoRepository<T: Document> {
    collection: Collection<T>,
}

impl<T: Document> MongoRepository<T> {
    pub fn new(db: &Database) -> Self {
        MongoRepository { collection: db.collection::<T>(T::COLLECTION) }
    }

    /// Creates a unique index on `field` if it does not exist yet.
    pub async fn ensure_unique_index(&self, field: &str) -> RepositoryResult<()> {
        let mut keys = bson::Document::new();
        keys.insert(field, 1);
        let index = IndexModel::builder()
            .keys(keys)
            .options(IndexOptions::builder().unique(true).build())
            .build();
        self.collection.create_index(index, None).await?;
        info!(collection = T::COLLECTION, field, "Unique index ensured");
        Ok(())
    }
}

#[async_trait]
impl<T: Document> Repository<T> for MongoRepository<T> {
    #[tracing::instrument(skip(self, item), fields(collection = T::COLLECTION))]
    async fn create(&self, mut item: T) -> RepositoryResult<T> {
        let now = timestamp();
        item.set_id(ObjectId::new());
        item.set_created_at(now.clone());
        item.set_updated_at(now);

        match self.collection.insert_one(item.clone(), None).await {
            Ok(_) => {
                info!(id = ?item.id(), "Document created");
                Ok(item)
            }
            Err(e) => {
                error!("Failed to create document: {}", e);
                Err(e.into())
            }
        }
    }

    #[tracing::instrument(skip(self), fields(collection = T::COLLECTION, id = %id))]
    async fn get_by_id(&self, id: ObjectId) -> RepositoryResult<T> {
        let filter = doc! { "_id": id };
        match self.collection.find_one(filter, None).await {
            Ok(Some(item)) => Ok(item),
            Ok(None) => Err(RepositoryError::not_found(format!("{} not found for ID: {}", T::COLLECTION, id))),
            Err(e) => {
                error!("Failed to fetch document by ID: {}", e);
                Err(RepositoryError::database(format!("Failed to fetch document by ID: {}", e)))
            }
        }
    }

    #[tracing::instrument(skip(self, item), fields(collection = T::COLLECTION, id = %id))]
    async fn update(&self, id: ObjectId, mut item: T) -> RepositoryResult<T> {
        item.set_id(id);
        item.set_updated_at(timestamp());

        let mut document = bson::to_document(&item)?;
        document.remove("_id");
        let update = doc! { "$set": document };

        match self.collection.update_one(doc! { "_id": id }, update, None).await {
            Ok(result) if result.matched_count > 0 => {
                info!("Document updated");
                Ok(item)
            }
            Ok(_) => Err(RepositoryError::not_found(format!("No {} found to update for ID: {}", T::COLLECTION, id))),
            Err(e) => {
                error!("Failed to update document: {}", e);
                Err(e.into())
            }
        }
    }

    #[tracing::instrument(skip(self), fields(collection = T::COLLECTION, id = %id))]
    async fn delete(&self, id: ObjectId) -> RepositoryResult<()> {
        match self.collection.delete_one(doc! { "_id": id }, None).await {
            Ok(result) if result.deleted_count > 0 => {
                info!("Document deleted");
                Ok(())
            }
            Ok(_) => Err(RepositoryError::not_found(format!("No {} found to delete for ID: {}", T::COLLECTION, id))),
            Err(e) => {
                error!("Failed to delete document: {}", e);
                Err(RepositoryError::database(format!("Failed to delete document: {}", e)))
            }
        }
    }

    #[tracing::instrument(skip(self), fields(collection = T::COLLECTION))]
    async fn list(&self) -> RepositoryResult<Vec<T>> {
        let options = FindOptions::builder().sort(doc! { "created_at": -1, "_id": -1 }).build();
        let cursor = self.collection.find(None, options).await.map_err(|e| {
            error!("Failed to list documents: {}", e);
            RepositoryError::database(format!("Failed to list documents: {}", e))
        })?;
        let items: Vec<T> = cursor
            .try_collect()
            .await
            .map_err(|e| RepositoryError::serialization(format!("Failed to deserialize document: {}", e)))?;
        info!("Fetched {} documents", items.len());
        Ok(items)
    }

    #[tracing::instrument(skip(self), fields(collection = T::COLLECTION))]
    async fn find_by_field(&self, field: &str, value: &str) -> RepositoryResult<Option<T>> {
        let mut filter = bson::Document::new();
        filter.insert(field, value);
        self.collection
            .find_one(filter, None)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to find document by {}: {}", field, e)))
    }

    async fn count(&self) -> RepositoryResult<u64> {
        self.collection
            .count_documents(None, None)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to count documents: {}", e)))
    }
}
