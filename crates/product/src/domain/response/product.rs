use crate::model::product::Product as ProductModel;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct ProductResponse {
    pub id: i32,
    pub name: String,
    pub price: i64,
    pub stock: i32,
    #[schema(example = "food")]
    pub category: String,
    #[schema(example = "1735689600_3f2a9c1e.png")]
    pub image: Option<String>,
    pub is_favorite: bool,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

fn format_timestamp(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

// model to response
impl From<ProductModel> for ProductResponse {
    fn from(value: ProductModel) -> Self {
        ProductResponse {
            id: value.id,
            name: value.name,
            price: value.price,
            stock: value.stock,
            category: value.category,
            image: value.image,
            is_favorite: value.is_favorite,
            created_at: value.created_at.map(format_timestamp),
            updated_at: value.updated_at.map(format_timestamp),
        }
    }
}
