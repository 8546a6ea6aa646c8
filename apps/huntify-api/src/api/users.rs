//! Users API routes

use axum::Router;
use domain_users::{InMemoryUserRepository, MongoUserRepository, UserService, handlers};

use crate::state::AppState;

/// Create users router
pub fn router(state: &AppState) -> Router {
    match &state.mongo {
        Some(mongo) => handlers::router(UserService::new(MongoUserRepository::new(&mongo.db))),
        None => handlers::router(UserService::new(InMemoryUserRepository::new())),
    }
}
