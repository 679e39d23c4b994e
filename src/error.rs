use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::storage::StorageError;

/// Failures surfaced by the registration and profile services. Everything but
/// the store variants resolves locally without a partial write.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("please sign in first")]
    Unauthenticated,

    #[error("invalid value for {0}")]
    Validation(String),

    #[error("already registered for this camp")]
    AlreadyRegistered,

    #[error("a profile already exists for this account")]
    ProfileAlreadyExists,

    #[error("registration not found")]
    NotFound,

    #[error("database error: {0}")]
    Store(#[from] sea_orm::DbErr),

    #[error("object store error: {0}")]
    Storage(#[from] StorageError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Unauthenticated => StatusCode::UNAUTHORIZED,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::AlreadyRegistered | AppError::ProfileAlreadyExists => StatusCode::CONFLICT,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Store(_) | AppError::Storage(_) => StatusCode::SERVICE_UNAVAILABLE,
        };

        if status == StatusCode::SERVICE_UNAVAILABLE {
            tracing::error!("backing store failure: {self}");
        }

        (status, self.to_string()).into_response()
    }
}
