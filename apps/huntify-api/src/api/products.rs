//! Products API routes
//!
//! Wires the products domain to the configured storage backend.

use axum::Router;
use domain_products::{
    InMemoryProductRepository, MongoProductRepository, ProductService, handlers,
};

use crate::state::AppState;

/// Create products router
pub fn router(state: &AppState) -> Router {
    match &state.mongo {
        Some(mongo) => handlers::router(ProductService::new(MongoProductRepository::new(
            &mongo.db,
        ))),
        None => handlers::router(ProductService::new(InMemoryProductRepository::new())),
    }
}
