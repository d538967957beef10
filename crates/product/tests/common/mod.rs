#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use product::{
    abstract_trait::{
        product::repository::{
            DynProductCommandRepository, DynProductQueryRepository, ProductCommandRepositoryTrait,
            ProductQueryRepositoryTrait,
        },
        storage::DynImageStore,
    },
    di::DependenciesInjectDeps,
    domain::requests::product::{
        CreateProductRequest, ImageUpload, ProductForm, UpdateProductRequest,
    },
    model::product::Product as ProductModel,
    storage::LocalImageStore,
};
use shared::errors::RepositoryError;
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicBool, Ordering},
};
use tempfile::TempDir;

pub const PNG_BYTES: &[u8] = &[
    0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, b'I', b'H', b'D', b'R',
];
pub const JPEG_BYTES: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F'];

#[derive(Default)]
struct Table {
    rows: Vec<ProductModel>,
    next_id: i32,
}

/// Products held in memory, with a switch to make every write fail.
#[derive(Default)]
pub struct InMemoryProductRepository {
    table: Mutex<Table>,
    fail_writes: AtomicBool,
}

impl InMemoryProductRepository {
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.table.lock().unwrap().rows.len()
    }

    fn check_writable(&self) -> Result<(), RepositoryError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(RepositoryError::Custom("database unavailable".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl ProductQueryRepositoryTrait for InMemoryProductRepository {
    async fn find_all(&self) -> Result<Vec<ProductModel>, RepositoryError> {
        let table = self.table.lock().unwrap();
        let mut rows = table.rows.clone();
        rows.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(rows)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<ProductModel>, RepositoryError> {
        let table = self.table.lock().unwrap();
        Ok(table.rows.iter().find(|p| p.id == id).cloned())
    }
}

#[async_trait]
impl ProductCommandRepositoryTrait for InMemoryProductRepository {
    async fn create_product(
        &self,
        req: &CreateProductRequest,
    ) -> Result<ProductModel, RepositoryError> {
        self.check_writable()?;

        let mut table = self.table.lock().unwrap();
        table.next_id += 1;
        let now = Utc::now();
        let product = ProductModel {
            id: table.next_id,
            name: req.name.clone(),
            price: req.price,
            stock: req.stock,
            category: req.category.as_str().to_string(),
            image: Some(req.image.clone()),
            is_favorite: req.is_favorite,
            created_at: Some(now),
            updated_at: Some(now),
        };
        table.rows.push(product.clone());
        Ok(product)
    }

    async fn update_product(
        &self,
        req: &UpdateProductRequest,
    ) -> Result<ProductModel, RepositoryError> {
        self.check_writable()?;

        let mut table = self.table.lock().unwrap();
        let product = table
            .rows
            .iter_mut()
            .find(|p| p.id == req.id)
            .ok_or(RepositoryError::NotFound)?;

        if let Some(name) = &req.name {
            product.name = name.clone();
        }
        if let Some(price) = req.price {
            product.price = price;
        }
        if let Some(stock) = req.stock {
            product.stock = stock;
        }
        if let Some(category) = req.category {
            product.category = category.as_str().to_string();
        }
        if let Some(image) = &req.image {
            product.image = Some(image.clone());
        }
        if let Some(is_favorite) = req.is_favorite {
            product.is_favorite = is_favorite;
        }
        product.updated_at = Some(Utc::now());

        Ok(product.clone())
    }

    async fn delete_product(&self, id: i32) -> Result<(), RepositoryError> {
        self.check_writable()?;

        let mut table = self.table.lock().unwrap();
        let before = table.rows.len();
        table.rows.retain(|p| p.id != id);
        if table.rows.len() == before {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

/// Collaborators backed by memory and a temporary directory.
pub struct Fixture {
    pub repo: Arc<InMemoryProductRepository>,
    pub store: Arc<LocalImageStore>,
    pub dir: TempDir,
}

impl Fixture {
    pub async fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(LocalImageStore::new(dir.path()));
        store.ensure_directory().await.unwrap();

        Self {
            repo: Arc::new(InMemoryProductRepository::default()),
            store,
            dir,
        }
    }

    pub fn deps(&self) -> DependenciesInjectDeps {
        DependenciesInjectDeps {
            query: self.repo.clone() as DynProductQueryRepository,
            command: self.repo.clone() as DynProductCommandRepository,
            storage: self.store.clone() as DynImageStore,
        }
    }

    /// Names of the files currently in the image directory.
    pub fn stored_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = std::fs::read_dir(self.store.directory())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        keys.sort();
        keys
    }
}

pub fn valid_form(name: &str) -> ProductForm {
    ProductForm::new()
        .with_field("name", name)
        .with_field("price", "25000")
        .with_field("stock", "10")
        .with_field("category", "food")
        .with_file("image", ImageUpload::new("photo.png", PNG_BYTES))
}
