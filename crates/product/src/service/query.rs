use crate::{
    abstract_trait::product::{
        repository::DynProductQueryRepository, service::ProductQueryServiceTrait,
    },
    domain::response::{api::ApiResponse, product::ProductResponse},
    service::observe::ServiceObserver,
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use shared::{
    errors::ServiceError,
    utils::{Method, Metrics},
};
use tracing::{error, info};

#[derive(Clone)]
pub struct ProductQueryService {
    pub query: DynProductQueryRepository,
    observer: ServiceObserver,
}

impl ProductQueryService {
    pub fn new(query: DynProductQueryRepository, registry: &mut Registry) -> Self {
        let metrics = Metrics::new();
        metrics.register(registry, "product_query_service", "ProductQueryService");

        Self {
            query,
            observer: ServiceObserver::new("product-query-service", metrics),
        }
    }
}

#[async_trait]
impl ProductQueryServiceTrait for ProductQueryService {
    async fn find_all(&self) -> Result<ApiResponse<Vec<ProductResponse>>, ServiceError> {
        info!("🔍 Finding all products");

        let method = Method::Get;
        let tracing_ctx = self.observer.start_tracing(
            "product_find_all",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("operation", "find_all"),
            ],
        );

        let products = match self.query.find_all().await {
            Ok(products) => products,
            Err(e) => {
                let msg = format!("Failed to fetch all products: {e:?}");
                error!("❌ {msg}");
                self.observer.complete_tracing_error(&tracing_ctx, method, &msg);
                return Err(ServiceError::Repo(e));
            }
        };

        let data: Vec<ProductResponse> = products.into_iter().map(ProductResponse::from).collect();

        self.observer
            .complete_tracing_success(&tracing_ctx, method, "Products retrieved from DB");
        info!("✅ Found {} products", data.len());

        Ok(ApiResponse::success("List Data Product", data))
    }

    async fn find_by_id(&self, id: i32) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        info!("🆔 Finding product by ID: {id}");

        let method = Method::Get;
        let tracing_ctx = self.observer.start_tracing(
            "product_find_by_id",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("operation", "find_by_id"),
                KeyValue::new("product.id", id.to_string()),
            ],
        );

        match self.query.find_by_id(id).await {
            Ok(Some(product)) => {
                self.observer
                    .complete_tracing_success(&tracing_ctx, method, "Product found");
                Ok(ApiResponse::success(
                    "Detail Data Product",
                    ProductResponse::from(product),
                ))
            }
            Ok(None) => {
                self.observer
                    .complete_tracing_error(&tracing_ctx, method, "Product not found");
                Err(ServiceError::NotFound("Product not found".into()))
            }
            Err(e) => {
                let msg = format!("Failed to fetch product {id}: {e:?}");
                error!("❌ {msg}");
                self.observer.complete_tracing_error(&tracing_ctx, method, &msg);
                Err(ServiceError::Repo(e))
            }
        }
    }
}
