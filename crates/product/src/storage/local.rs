use crate::abstract_trait::storage::ImageStoreTrait;
use async_trait::async_trait;
use shared::errors::StorageError;
use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};
use tokio::fs;
use tracing::{debug, info};

pub const PRODUCTS_NAMESPACE: &str = "products";
const STAGING_DIR: &str = ".staging";

/// Stores images as files under `<root>/products/<key>`.
///
/// Uploads are first written to `<root>/.staging`, which is never served, and then
/// renamed into the namespace.
#[derive(Debug, Clone)]
pub struct LocalImageStore {
    dir: PathBuf,
    staging: PathBuf,
}

impl LocalImageStore {
    pub fn new(storage_root: impl AsRef<Path>) -> Self {
        let root = storage_root.as_ref();
        Self {
            dir: root.join(PRODUCTS_NAMESPACE),
            staging: root.join(STAGING_DIR),
        }
    }

    /// Directory holding the stored artifacts.
    pub fn directory(&self) -> &Path {
        &self.dir
    }

    pub async fn ensure_directory(&self) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir).await?;
        fs::create_dir_all(&self.staging).await?;
        Ok(())
    }

    fn staging_path(&self, key: &str) -> PathBuf {
        self.staging.join(format!("{key}.part"))
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let invalid = key.is_empty()
            || key.starts_with('.')
            || key.contains(['/', '\\', '\0'])
            || key.contains("..");

        if invalid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }

        Ok(self.dir.join(key))
    }
}

#[async_trait]
impl ImageStoreTrait for LocalImageStore {
    async fn put(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        self.ensure_directory().await?;

        let partial = self.staging_path(key);
        fs::write(&partial, bytes).await?;
        if let Err(e) = fs::rename(&partial, &path).await {
            let _ = fs::remove_file(&partial).await;
            return Err(e.into());
        }

        info!("🖼️ Stored image {} ({} bytes)", key, bytes.len());
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn exists(&self, key: &str) -> Result<bool, StorageError> {
        let path = self.path_for(key)?;
        Ok(fs::try_exists(&path).await?)
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path).await {
            Ok(()) => {
                info!("🗑️ Deleted image {}", key);
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("Image {} already absent", key);
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }
}
