use async_trait::async_trait;
use shared::errors::StorageError;
use std::sync::Arc;

pub type DynImageStore = Arc<dyn ImageStoreTrait + Send + Sync>;

/// Content store for product images, addressed by key within the `products` namespace.
#[async_trait]
pub trait ImageStoreTrait {
    async fn put(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError>;
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;
    async fn exists(&self, key: &str) -> Result<bool, StorageError>;
    /// Removing a key that is not stored is not an error.
    async fn delete(&self, key: &str) -> Result<(), StorageError>;
}
