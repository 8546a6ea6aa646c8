use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;

use crate::models::ProductStatus;

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Product not found: {0}")]
    NotFound(Uuid),

    #[error("No product named '{0}'")]
    NameNotFound(String),

    #[error("User {user} has already voted for product {product_id}")]
    AlreadyVoted { product_id: Uuid, user: String },

    #[error("Product {id} is already {status}")]
    AlreadyInStatus { id: Uuid, status: ProductStatus },

    #[error("Product {0} is already featured")]
    AlreadyFeatured(Uuid),

    #[error("{count} products are named '{name}'")]
    AmbiguousName { name: String, count: usize },

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

/// Convert ProductError to AppError for standardized error responses
impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound(_) | ProductError::NameNotFound(_) => {
                AppError::NotFound("Product not found".to_string())
            }
            ProductError::AlreadyVoted { .. } => {
                AppError::Conflict("User has already voted".to_string())
            }
            // A repeated moderation decision matches no document and answers 404,
            // with a message that still names the current state.
            ProductError::AlreadyInStatus { status, .. } => {
                AppError::NotFound(format!("Product is already {}", status))
            }
            ProductError::AlreadyFeatured(_) => {
                AppError::NotFound("Product is already featured".to_string())
            }
            ProductError::AmbiguousName { name, count } => AppError::Conflict(format!(
                "{} products are named '{}'; vote by id instead",
                count, name
            )),
            ProductError::Validation(msg) => AppError::BadRequest(msg),
            ProductError::Database(msg) => AppError::Database(msg),
            ProductError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for ProductError {
    fn from(err: mongodb::error::Error) -> Self {
        ProductError::Database(err.to_string())
    }
}
