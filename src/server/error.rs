use crate::business_store::StoreError;
use crate::documents::InvoiceError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(anyhow::Error),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl ApiError {
    pub fn not_found(kind: &'static str, id: &str) -> Self {
        ApiError::NotFound(StoreError::NotFound {
            kind,
            id: id.to_string(),
        }
        .to_string())
    }
}

/// Store and document errors the caller can act on become 4xx; anything
/// else is a 500.
impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        if let Some(store_error) = err.downcast_ref::<StoreError>() {
            return match store_error {
                StoreError::NotFound { .. } => ApiError::NotFound(store_error.to_string()),
                StoreError::InvalidReference { .. } | StoreError::UnknownColumn(_) => {
                    ApiError::BadRequest(store_error.to_string())
                }
            };
        }
        if let Some(invoice_error) = err.downcast_ref::<InvoiceError>() {
            return ApiError::BadRequest(invoice_error.to_string());
        }
        ApiError::Internal(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(err) => {
                error!("Request failed: {:#}", err);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        let error = match &self {
            ApiError::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        };
        (status, Json(ErrorBody { error })).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
