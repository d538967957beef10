use crate::{
    abstract_trait::storage::DynImageStore,
    config::myconfig::Config,
    di::{DependenciesInject, DependenciesInjectDeps},
    repository::ProductRepository,
    storage::LocalImageStore,
};
use anyhow::{Context, Result};
use prometheus_client::registry::Registry;
use shared::config::ConnectionPool;
use std::{fmt, path::PathBuf, sync::Arc};

#[derive(Clone)]
pub struct AppState {
    pub di_container: DependenciesInject,
    pub registry: Arc<Registry>,
    /// Directory served under `/storage/products`.
    pub storage_dir: PathBuf,
    pub max_upload_bytes: usize,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("di_container", &self.di_container)
            .field("storage_dir", &self.storage_dir)
            .field("max_upload_bytes", &self.max_upload_bytes)
            .finish()
    }
}

impl AppState {
    pub async fn new(pool: ConnectionPool, config: &Config) -> Result<Self> {
        let store = LocalImageStore::new(&config.storage_root);
        store
            .ensure_directory()
            .await
            .with_context(|| format!("Failed to create {}", store.directory().display()))?;

        let storage_dir = store.directory().to_path_buf();
        let repository = ProductRepository::new(pool);

        let deps = DependenciesInjectDeps {
            query: repository.query,
            command: repository.command,
            storage: Arc::new(store) as DynImageStore,
        };

        Ok(Self::from_deps(deps, storage_dir, config.max_upload_bytes))
    }

    /// Assembles the state from already-built collaborators.
    pub fn from_deps(
        deps: DependenciesInjectDeps,
        storage_dir: PathBuf,
        max_upload_bytes: usize,
    ) -> Self {
        let mut registry = Registry::default();
        let di_container = DependenciesInject::new(deps, &mut registry);

        Self {
            di_container,
            registry: Arc::new(registry),
            storage_dir,
            max_upload_bytes,
        }
    }
}
