use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid product: {0}")]
    InvalidProduct(#[from] ProductError),

    #[error("Product source error: {0}")]
    Source(String),
}

/// Reasons a single product entry is refused at construction time
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ProductError {
    #[error("product name must not be empty")]
    EmptyName,

    #[error("price must be a finite, non-negative number (got {0})")]
    InvalidPrice(f64),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::InvalidProduct(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            AppError::Source(msg) => (StatusCode::BAD_GATEWAY, msg),
            AppError::Io(_) | AppError::Serialization(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
