use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum CommunityError {
    #[error("Coupon not found: {0}")]
    CouponNotFound(Uuid),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type CommunityResult<T> = Result<T, CommunityError>;

impl From<CommunityError> for AppError {
    fn from(err: CommunityError) -> Self {
        match err {
            CommunityError::CouponNotFound(_) => AppError::NotFound("Coupon not found".to_string()),
            CommunityError::Validation(msg) => AppError::BadRequest(msg),
            CommunityError::Database(msg) => AppError::Database(msg),
            CommunityError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for CommunityError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}

impl From<mongodb::error::Error> for CommunityError {
    fn from(err: mongodb::error::Error) -> Self {
        CommunityError::Database(err.to_string())
    }
}
