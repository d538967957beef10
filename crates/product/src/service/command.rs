use crate::{
    abstract_trait::{
        product::{
            repository::{DynProductCommandRepository, DynProductQueryRepository},
            service::ProductCommandServiceTrait,
        },
        storage::DynImageStore,
    },
    domain::{
        image::generate_image_key,
        requests::product::{CreateProductRequest, ProductForm, UpdateProductRequest},
        response::{
            api::{ApiMessage, ApiResponse},
            product::ProductResponse,
        },
    },
    model::product::Product as ProductModel,
    service::observe::ServiceObserver,
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use shared::{
    errors::{RepositoryError, ServiceError},
    utils::{Method, Metrics},
};
use tracing::{error, info, warn};

const NOT_FOUND: &str = "Product not found";

#[derive(Clone)]
pub struct ProductCommandService {
    pub query: DynProductQueryRepository,
    pub command: DynProductCommandRepository,
    pub storage: DynImageStore,
    observer: ServiceObserver,
}

pub struct ProductCommandServiceDeps {
    pub query: DynProductQueryRepository,
    pub command: DynProductCommandRepository,
    pub storage: DynImageStore,
}

impl ProductCommandService {
    pub fn new(deps: ProductCommandServiceDeps, registry: &mut Registry) -> Self {
        let ProductCommandServiceDeps {
            query,
            command,
            storage,
        } = deps;

        let metrics = Metrics::new();
        metrics.register(registry, "product_command_service", "ProductCommandService");

        Self {
            query,
            command,
            storage,
            observer: ServiceObserver::new("product-command-service", metrics),
        }
    }

    async fn find_existing(&self, id: i32) -> Result<ProductModel, ServiceError> {
        match self.query.find_by_id(id).await {
            Ok(Some(product)) => Ok(product),
            Ok(None) => Err(ServiceError::NotFound(NOT_FOUND.into())),
            Err(e) => {
                error!("❌ Failed to find product ID={} | {:?}", id, e);
                Err(ServiceError::Repo(e))
            }
        }
    }

    /// Best-effort removal; the stored record never points at the discarded key.
    async fn discard_image(&self, key: &str) {
        if let Err(e) = self.storage.delete(key).await {
            warn!("⚠️ Failed to delete image {}: {}", key, e);
        }
    }
}

fn not_found_or_repo(e: RepositoryError) -> ServiceError {
    match e {
        RepositoryError::NotFound => ServiceError::NotFound(NOT_FOUND.into()),
        other => ServiceError::Repo(other),
    }
}

#[async_trait]
impl ProductCommandServiceTrait for ProductCommandService {
    async fn create_product(
        &self,
        form: ProductForm,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        info!("🏗️ Creating new product");

        let method = Method::Post;
        let tracing_ctx = self.observer.start_tracing(
            "CreateProduct",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("operation", "create"),
            ],
        );

        let input = match form.into_create_input() {
            Ok(input) => input,
            Err(errors) => {
                self.observer
                    .complete_tracing_error(&tracing_ctx, method, "Validation failed");
                return Err(ServiceError::Validation(errors));
            }
        };

        let image_key = generate_image_key(input.image.format);

        if let Err(e) = self.storage.put(&image_key, &input.image.bytes).await {
            let msg = format!("Failed to store image {image_key}: {e}");
            error!("❌ {msg}");
            self.observer.complete_tracing_error(&tracing_ctx, method, &msg);
            return Err(ServiceError::Storage(e));
        }

        let req = CreateProductRequest {
            name: input.name,
            price: input.price,
            stock: input.stock,
            category: input.category,
            image: image_key.clone(),
            is_favorite: input.is_favorite,
        };

        let product = match self.command.create_product(&req).await {
            Ok(product) => product,
            Err(e) => {
                error!("❌ Failed to save product {}: {:?}", req.name, e);
                self.discard_image(&image_key).await;
                self.observer
                    .complete_tracing_error(&tracing_ctx, method, "Product Failed to Save");
                return Err(ServiceError::Repo(RepositoryError::Conflict(
                    "Product Failed to Save".into(),
                )));
            }
        };

        self.observer
            .complete_tracing_success(&tracing_ctx, method, "Product created");
        info!("✅ Product created: {} (ID: {})", product.name, product.id);

        Ok(ApiResponse::success(
            "Product Created",
            ProductResponse::from(product),
        ))
    }

    async fn update_product(
        &self,
        id: i32,
        form: ProductForm,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        info!("✏️ Updating product {id}");

        let method = Method::Put;
        let tracing_ctx = self.observer.start_tracing(
            "UpdateProduct",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("operation", "update"),
                KeyValue::new("product.id", id.to_string()),
            ],
        );

        let existing = match self.find_existing(id).await {
            Ok(product) => product,
            Err(e) => {
                self.observer
                    .complete_tracing_error(&tracing_ctx, method, &e.to_string());
                return Err(e);
            }
        };

        let input = match form.into_update_input() {
            Ok(input) => input,
            Err(errors) => {
                self.observer
                    .complete_tracing_error(&tracing_ctx, method, "Validation failed");
                return Err(ServiceError::Validation(errors));
            }
        };

        let new_image = match &input.image {
            Some(image) => {
                let key = generate_image_key(image.format);
                if let Err(e) = self.storage.put(&key, &image.bytes).await {
                    let msg = format!("Failed to store image {key}: {e}");
                    error!("❌ {msg}");
                    self.observer.complete_tracing_error(&tracing_ctx, method, &msg);
                    return Err(ServiceError::Storage(e));
                }
                Some(key)
            }
            None => None,
        };

        let req = UpdateProductRequest {
            id,
            name: input.name,
            price: input.price,
            stock: input.stock,
            category: input.category,
            image: new_image.clone(),
            is_favorite: input.is_favorite,
        };

        let product = match self.command.update_product(&req).await {
            Ok(product) => product,
            Err(e) => {
                error!("❌ Failed to update product {}: {:?}", id, e);
                if let Some(key) = &new_image {
                    self.discard_image(key).await;
                }
                let err = not_found_or_repo(e);
                self.observer
                    .complete_tracing_error(&tracing_ctx, method, &err.to_string());
                return Err(err);
            }
        };

        if let (Some(new_key), Some(old_key)) = (&new_image, &existing.image)
            && !old_key.is_empty()
            && old_key != new_key
        {
            self.discard_image(old_key).await;
        }

        self.observer
            .complete_tracing_success(&tracing_ctx, method, "Product updated");
        info!("🔄 Product updated: {} (ID: {})", product.name, product.id);

        Ok(ApiResponse::success(
            "Product updated successfully",
            ProductResponse::from(product),
        ))
    }

    async fn delete_product(&self, id: i32) -> Result<ApiMessage, ServiceError> {
        info!("🧨 Deleting product {id}");

        let method = Method::Delete;
        let tracing_ctx = self.observer.start_tracing(
            "DeleteProduct",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("operation", "delete"),
                KeyValue::new("product.id", id.to_string()),
            ],
        );

        let existing = match self.find_existing(id).await {
            Ok(product) => product,
            Err(e) => {
                self.observer
                    .complete_tracing_error(&tracing_ctx, method, &e.to_string());
                return Err(e);
            }
        };

        if let Err(e) = self.command.delete_product(id).await {
            error!("❌ Failed to delete product {}: {:?}", id, e);
            let err = not_found_or_repo(e);
            self.observer
                .complete_tracing_error(&tracing_ctx, method, &err.to_string());
            return Err(err);
        }

        if let Some(image) = existing.image.as_deref().filter(|key| !key.is_empty()) {
            self.discard_image(image).await;
        }

        self.observer
            .complete_tracing_success(&tracing_ctx, method, "Product deleted");

        Ok(ApiMessage::success("Product deleted successfully"))
    }
}
