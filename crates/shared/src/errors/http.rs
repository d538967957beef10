use crate::errors::{
    error::ErrorResponse, repository::RepositoryError, service::ServiceError,
};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};
use tracing::error;
use validator::ValidationErrors;

#[derive(Debug)]
pub enum HttpError {
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    UnprocessableEntity { message: String, errors: Value },
    Internal(String),
}

impl From<ServiceError> for HttpError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::NotFound(msg) => HttpError::NotFound(msg),

            ServiceError::Validation(errors) => HttpError::UnprocessableEntity {
                message: format_validation_errors(&errors),
                errors: format_validation_errors_detailed(&errors),
            },

            ServiceError::Repo(repo_err) => match repo_err {
                RepositoryError::NotFound => HttpError::NotFound("Not found".into()),
                RepositoryError::Conflict(msg) => HttpError::Conflict(msg),
                other => {
                    error!("❌ Unhandled repository error: {other}");
                    HttpError::Internal("Repository error".into())
                }
            },

            ServiceError::Storage(storage_err) => {
                error!("❌ Unhandled storage error: {storage_err}");
                HttpError::Internal("Storage error".into())
            }

            ServiceError::Internal(msg) => HttpError::Internal(msg),
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            HttpError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ErrorResponse::new(msg)),
            HttpError::NotFound(msg) => (StatusCode::NOT_FOUND, ErrorResponse::new(msg)),
            HttpError::Conflict(msg) => (StatusCode::CONFLICT, ErrorResponse::new(msg)),
            HttpError::UnprocessableEntity { message, errors } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorResponse {
                    success: false,
                    message,
                    errors: Some(errors),
                },
            ),
            HttpError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorResponse::new(msg))
            }
        };

        (status, Json(body)).into_response()
    }
}

fn describe(field: &str, error: &validator::ValidationError) -> String {
    error
        .message
        .as_ref()
        .map(|m| m.to_string())
        .unwrap_or_else(|| match error.code.as_ref() {
            "required" => format!("The {field} field is required."),
            "length" => "Invalid length".to_string(),
            "range" => "Value out of range".to_string(),
            _ => format!("Invalid {field}"),
        })
}

/// Flattens every field error into a single `field: message; ...` line.
pub fn format_validation_errors(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    let error_messages: Vec<String> = fields
        .into_iter()
        .flat_map(|(field, field_errors)| {
            field_errors
                .iter()
                .map(move |e| format!("{field}: {}", describe(&field, e)))
        })
        .collect();

    if error_messages.is_empty() {
        "Validation failed".to_string()
    } else {
        error_messages.join("; ")
    }
}

pub fn format_validation_errors_detailed(errors: &ValidationErrors) -> Value {
    let mut error_map = serde_json::Map::new();

    for (field, field_errors) in errors.field_errors() {
        let messages: Vec<String> = field_errors.iter().map(|e| describe(&field, e)).collect();
        error_map.insert(field.to_string(), json!(messages));
    }

    Value::Object(error_map)
}
