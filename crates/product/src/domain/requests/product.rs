use crate::domain::{
    image::ImageFormat,
    validation::{FieldValue, FormFields, Rule, Schema, parse_bool, parse_integer, validate},
};
use serde::{Deserialize, Serialize};
use std::{
    borrow::Cow,
    collections::{HashMap, HashSet},
    fmt,
    str::FromStr,
};
use utoipa::ToSchema;
use validator::{ValidationError, ValidationErrors};

pub const CATEGORIES: &[&str] = &["food", "drink", "snack"];
pub const IMAGE_TYPES: &[&str] = &["png", "jpg", "jpeg"];

const STOCK_RANGE: Rule = Rule::Between(i32::MIN as i64, i32::MAX as i64);

pub const CREATE_PRODUCT_RULES: Schema = &[
    ("name", &[Rule::Required, Rule::MinLength(3)]),
    ("price", &[Rule::Required, Rule::Integer]),
    ("stock", &[Rule::Required, Rule::Integer, STOCK_RANGE]),
    ("category", &[Rule::Required, Rule::In(CATEGORIES)]),
    ("image", &[Rule::Required, Rule::Image(IMAGE_TYPES)]),
    ("is_favorite", &[Rule::Boolean]),
];

pub const UPDATE_PRODUCT_RULES: Schema = &[
    ("name", &[Rule::Nullable, Rule::MinLength(3)]),
    ("price", &[Rule::Nullable, Rule::Integer]),
    ("stock", &[Rule::Nullable, Rule::Integer, STOCK_RANGE]),
    ("category", &[Rule::Nullable, Rule::In(CATEGORIES)]),
    ("image", &[Rule::Nullable, Rule::Image(IMAGE_TYPES)]),
    ("is_favorite", &[Rule::Boolean]),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ProductCategory {
    Food,
    Drink,
    Snack,
}

impl ProductCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            ProductCategory::Food => "food",
            ProductCategory::Drink => "drink",
            ProductCategory::Snack => "snack",
        }
    }
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "food" => Ok(ProductCategory::Food),
            "drink" => Ok(ProductCategory::Drink),
            "snack" => Ok(ProductCategory::Snack),
            other => Err(format!("unknown product category '{other}'")),
        }
    }
}

/// A file part received with the form.
#[derive(Clone, Default)]
pub struct ImageUpload {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageUpload")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl ImageUpload {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: Some(file_name.into()),
            content_type: None,
            bytes: bytes.into(),
        }
    }
}

/// An uploaded image whose format has been checked.
#[derive(Debug, Clone)]
pub struct ValidatedImage {
    pub format: ImageFormat,
    pub bytes: Vec<u8>,
}

/// Raw submitted fields, as decoded from multipart, urlencoded or JSON bodies.
#[derive(Debug, Clone, Default)]
pub struct ProductForm {
    fields: HashMap<String, String>,
    files: HashMap<String, ImageUpload>,
    structured: HashSet<String>,
}

impl ProductForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert_field(name, value);
        self
    }

    pub fn with_file(mut self, name: impl Into<String>, upload: ImageUpload) -> Self {
        self.insert_file(name, upload);
        self
    }

    pub fn insert_field(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(name.into(), value.into());
    }

    pub fn insert_file(&mut self, name: impl Into<String>, upload: ImageUpload) {
        self.files.insert(name.into(), upload);
    }

    /// Marks a field whose submitted value was an object or an array.
    pub fn insert_structured(&mut self, name: impl Into<String>) {
        self.structured.insert(name.into());
    }

    fn text(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    fn image(&self, name: &str) -> Result<Option<ValidatedImage>, ValidationErrors> {
        let Some(upload) = self.files.get(name) else {
            return Ok(None);
        };
        let format = ImageFormat::detect(&upload.bytes)
            .ok_or_else(|| single_error("image", "image", "The image field must be an image."))?;
        Ok(Some(ValidatedImage {
            format,
            bytes: upload.bytes.clone(),
        }))
    }

    /// Validates against [`CREATE_PRODUCT_RULES`] and returns the typed input.
    pub fn into_create_input(self) -> Result<CreateProductInput, ValidationErrors> {
        validate(&self, CREATE_PRODUCT_RULES)?;

        Ok(CreateProductInput {
            name: self.text("name").ok_or_else(|| missing("name"))?.to_string(),
            price: self.integer("price")?.ok_or_else(|| missing("price"))?,
            stock: self.stock()?.ok_or_else(|| missing("stock"))?,
            category: self.category()?.ok_or_else(|| missing("category"))?,
            is_favorite: self.boolean("is_favorite")?.unwrap_or(false),
            image: self.image("image")?.ok_or_else(|| missing("image"))?,
        })
    }

    /// Validates against [`UPDATE_PRODUCT_RULES`]; absent fields stay `None`.
    pub fn into_update_input(self) -> Result<UpdateProductInput, ValidationErrors> {
        validate(&self, UPDATE_PRODUCT_RULES)?;

        Ok(UpdateProductInput {
            name: self.text("name").map(str::to_string),
            price: self.integer("price")?,
            stock: self.stock()?,
            category: self.category()?,
            is_favorite: self.boolean("is_favorite")?,
            image: self.image("image")?,
        })
    }

    fn integer(&self, name: &'static str) -> Result<Option<i64>, ValidationErrors> {
        self.text(name)
            .map(|v| {
                parse_integer(v).ok_or_else(|| {
                    single_error(name, "integer", &format!("The {name} field must be an integer."))
                })
            })
            .transpose()
    }

    fn stock(&self) -> Result<Option<i32>, ValidationErrors> {
        self.integer("stock")?
            .map(|v| {
                i32::try_from(v).map_err(|_| {
                    single_error("stock", "between", "The stock field is out of range.")
                })
            })
            .transpose()
    }

    fn category(&self) -> Result<Option<ProductCategory>, ValidationErrors> {
        self.text("category")
            .map(|v| {
                v.parse::<ProductCategory>().map_err(|_| {
                    single_error("category", "in", "The selected category is invalid.")
                })
            })
            .transpose()
    }

    fn boolean(&self, name: &'static str) -> Result<Option<bool>, ValidationErrors> {
        self.text(name)
            .map(|v| {
                parse_bool(v).ok_or_else(|| {
                    single_error(
                        name,
                        "boolean",
                        &format!("The {name} field must be true or false."),
                    )
                })
            })
            .transpose()
    }
}

impl FormFields for ProductForm {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        if let Some(upload) = self.files.get(name) {
            return Some(FieldValue::File(upload));
        }
        if self.structured.contains(name) {
            return Some(FieldValue::Structured);
        }
        self.text(name).map(FieldValue::Text)
    }
}

fn missing(field: &'static str) -> ValidationErrors {
    single_error(field, "required", &format!("The {field} field is required."))
}

fn single_error(field: &'static str, code: &'static str, message: &str) -> ValidationErrors {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Owned(message.to_string()));
    let mut errors = ValidationErrors::new();
    errors.add(field, error);
    errors
}

#[derive(Debug, Clone)]
pub struct CreateProductInput {
    pub name: String,
    pub price: i64,
    pub stock: i32,
    pub category: ProductCategory,
    pub is_favorite: bool,
    pub image: ValidatedImage,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateProductInput {
    pub name: Option<String>,
    pub price: Option<i64>,
    pub stock: Option<i32>,
    pub category: Option<ProductCategory>,
    pub is_favorite: Option<bool>,
    pub image: Option<ValidatedImage>,
}

/// Row values handed to the repository on insert.
#[derive(Debug, Clone)]
pub struct CreateProductRequest {
    pub name: String,
    pub price: i64,
    pub stock: i32,
    pub category: ProductCategory,
    pub image: String,
    pub is_favorite: bool,
}

/// Partial row update; `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct UpdateProductRequest {
    pub id: i32,
    pub name: Option<String>,
    pub price: Option<i64>,
    pub stock: Option<i32>,
    pub category: Option<ProductCategory>,
    pub image: Option<String>,
    pub is_favorite: Option<bool>,
}

/// Multipart body accepted by the create and update endpoints (documentation only).
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct ProductUploadForm {
    #[schema(example = "Nasi Goreng")]
    pub name: String,
    #[schema(example = 25000)]
    pub price: i64,
    #[schema(example = 10)]
    pub stock: i32,
    pub category: ProductCategory,
    #[schema(value_type = String, format = Binary)]
    pub image: Vec<u8>,
    #[schema(example = false)]
    pub is_favorite: Option<bool>,
}
