mod error;
mod http;
mod repository;
mod service;
mod storage;

pub use self::error::ErrorResponse;
pub use self::http::{HttpError, format_validation_errors, format_validation_errors_detailed};
pub use self::repository::RepositoryError;
pub use self::service::ServiceError;
pub use self::storage::StorageError;
