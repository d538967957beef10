use crate::domain::requests::product::{ImageUpload, ProductForm};
use axum::{
    Form, Json,
    extract::{FromRequest, Multipart, Request},
    http::header::CONTENT_TYPE,
};
use serde_json::Value;
use shared::errors::HttpError;
use std::collections::HashMap;
use tracing::warn;

/// Decodes `multipart/form-data`, `application/x-www-form-urlencoded` or a JSON
/// object into the raw submitted fields of a product form.
impl<S> FromRequest<S> for ProductForm
where
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_ascii_lowercase())
            .unwrap_or_default();

        if content_type.starts_with("multipart/form-data") {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|rejection| HttpError::BadRequest(rejection.body_text()))?;
            return from_multipart(multipart).await;
        }

        if content_type.starts_with("application/json") {
            let Json(value) = Json::<Value>::from_request(req, state)
                .await
                .map_err(|rejection| HttpError::BadRequest(rejection.body_text()))?;
            return from_json(value);
        }

        if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(fields) = Form::<HashMap<String, String>>::from_request(req, state)
                .await
                .map_err(|rejection| HttpError::BadRequest(rejection.body_text()))?;

            let mut form = ProductForm::new();
            for (name, value) in fields {
                form.insert_field(name, value);
            }
            return Ok(form);
        }

        Err(HttpError::BadRequest(
            "Unsupported content type; expected multipart/form-data, \
             application/x-www-form-urlencoded or application/json"
                .into(),
        ))
    }
}

async fn from_multipart(mut multipart: Multipart) -> Result<ProductForm, HttpError> {
    let mut form = ProductForm::new();

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        warn!("⚠️ Malformed multipart body: {e}");
        HttpError::BadRequest(format!("Malformed multipart body: {e}"))
    })? {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };

        match field.file_name().map(str::to_owned) {
            Some(file_name) => {
                let content_type = field.content_type().map(str::to_owned);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| HttpError::BadRequest(format!("Failed to read {name}: {e}")))?;

                // browsers send an empty part when no file was chosen
                if bytes.is_empty() {
                    continue;
                }

                form.insert_file(
                    name,
                    ImageUpload {
                        file_name: Some(file_name),
                        content_type,
                        bytes: bytes.to_vec(),
                    },
                );
            }
            None => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| HttpError::BadRequest(format!("Failed to read {name}: {e}")))?;
                form.insert_field(name, value);
            }
        }
    }

    Ok(form)
}

fn from_json(value: Value) -> Result<ProductForm, HttpError> {
    let Value::Object(map) = value else {
        return Err(HttpError::BadRequest("Expected a JSON object".into()));
    };

    let mut form = ProductForm::new();
    for (name, value) in map {
        match value {
            Value::Null => {}
            Value::String(s) => form.insert_field(name, s),
            Value::Bool(b) => form.insert_field(name, b.to_string()),
            Value::Number(n) => form.insert_field(name, n.to_string()),
            Value::Array(_) | Value::Object(_) => form.insert_structured(name),
        }
    }

    Ok(form)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_scalars_become_text_fields() {
        let form = from_json(json!({
            "name": "Kopi Susu",
            "price": 18000,
            "is_favorite": true,
            "category": null
        }))
        .unwrap();

        let input = form.into_update_input().unwrap();
        assert_eq!(input.name.as_deref(), Some("Kopi Susu"));
        assert_eq!(input.price, Some(18000));
        assert_eq!(input.is_favorite, Some(true));
        assert!(input.category.is_none());
    }

    #[test]
    fn nested_json_values_fail_validation() {
        let form = from_json(json!({"name": {"a": 1}, "stock": [1, 2]})).unwrap();

        let errors = form.into_update_input().unwrap_err();
        let field_errors = errors.field_errors();
        assert_eq!(field_errors["name"][0].code, "string");
        assert_eq!(field_errors["stock"][0].code, "string");
    }

    #[test]
    fn json_array_body_is_rejected() {
        assert!(matches!(
            from_json(json!([1, 2, 3])),
            Err(HttpError::BadRequest(_))
        ));
    }
}
