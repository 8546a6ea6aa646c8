//! API routes module
//!
//! Every domain router is merged at the root; `axum_helpers::create_router`
//! adds the documentation UIs and middleware on top.

pub mod auth;
pub mod community;
pub mod health;
pub mod products;
pub mod users;

use axum::Router;
use mongodb::Database;
use tracing::info;

use crate::state::AppState;

/// Create all API routes
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .merge(products::router(state))
        .merge(users::router(state))
        .merge(community::router(state))
        .merge(auth::router(&state.config.jwt))
        .merge(health::router(state.clone()))
}

/// Create the indexes every MongoDB repository relies on
pub async fn init_indexes(db: &Database) -> eyre::Result<()> {
    domain_products::MongoProductRepository::new(db)
        .init_indexes()
        .await
        .map_err(|e| eyre::eyre!("Failed to create product indexes: {}", e))?;
    domain_users::MongoUserRepository::new(db)
        .init_indexes()
        .await
        .map_err(|e| eyre::eyre!("Failed to create user indexes: {}", e))?;
    domain_community::MongoCommunityRepository::new(db)
        .init_indexes()
        .await
        .map_err(|e| eyre::eyre!("Failed to create community indexes: {}", e))?;

    info!("MongoDB indexes ready");
    Ok(())
}
