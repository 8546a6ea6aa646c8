use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;

use crate::models::Position;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("User not found: {0}")]
    NotFound(Uuid),

    #[error("No user with email '{0}'")]
    EmailNotFound(String),

    #[error("User with email '{0}' already exists")]
    DuplicateEmail(String),

    #[error("User '{0}' is already subscribed")]
    AlreadySubscribed(String),

    #[error("User {id} is already {position}")]
    AlreadyInPosition { id: Uuid, position: Position },

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type UserResult<T> = Result<T, UserError>;

impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(_) | UserError::EmailNotFound(_) => {
                AppError::NotFound("User not found".to_string())
            }
            UserError::DuplicateEmail(_) => AppError::Conflict("User already exists".to_string()),
            UserError::AlreadySubscribed(_) => {
                AppError::Conflict("User is already subscribed".to_string())
            }
            // Repeating a promotion matches no document: 404, naming the position
            UserError::AlreadyInPosition { position, .. } => {
                AppError::NotFound(format!("User is already {}", position))
            }
            UserError::Validation(msg) => AppError::BadRequest(msg),
            UserError::Database(msg) => AppError::Database(msg),
            UserError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}

impl From<mongodb::error::Error> for UserError {
    fn from(err: mongodb::error::Error) -> Self {
        UserError::Database(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_status_codes() {
        let id = Uuid::now_v7();
        let cases = [
            (UserError::NotFound(id), StatusCode::NOT_FOUND),
            (UserError::EmailNotFound("a@x.com".into()), StatusCode::NOT_FOUND),
            (UserError::DuplicateEmail("a@x.com".into()), StatusCode::BAD_REQUEST),
            (
                UserError::AlreadyInPosition {
                    id,
                    position: Position::Admin,
                },
                StatusCode::NOT_FOUND,
            ),
            (
                UserError::AlreadySubscribed("a@x.com".into()),
                StatusCode::BAD_REQUEST,
            ),
            (
                UserError::Database("down".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(AppError::from(err).status(), expected);
        }
    }
}
