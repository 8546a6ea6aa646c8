use axum_helpers::server::{create_production_app, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use std::time::Duration;
use tracing::{info, warn};

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::{AppState, MongoHandles};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output
    install_color_eyre();

    // Load configuration from environment variables
    let config = Config::from_env()?;

    // Initialize tracing
    init_tracing(&config.environment);

    let mongo = match &config.mongodb {
        Some(mongo_config) => {
            info!("Connecting to MongoDB database {}", mongo_config.database);

            let client =
                database::mongodb::connect_from_config_with_retry(mongo_config, None).await?;
            let db = client.database(&mongo_config.database);

            api::init_indexes(&db).await?;

            Some(MongoHandles { client, db })
        }
        None => {
            warn!("Using in-memory storage; data is lost on restart");
            None
        }
    };

    let mongo_client = mongo.as_ref().map(|handles| handles.client.clone());
    let state = AppState { config, mongo };

    // Build router with API routes
    let api_routes = api::routes(&state);

    // Create a router with OpenAPI docs
    let router = axum_helpers::create_router::<openapi::ApiDoc>(api_routes).await?;

    // Merge health endpoints
    let app = router.merge(health_router(state.config.app));

    info!("Starting Huntify API (30s shutdown timeout)");

    create_production_app(
        app,
        &state.config.server,
        Duration::from_secs(30),
        async move {
            if let Some(client) = mongo_client {
                info!("Shutting down: closing MongoDB connections");
                client.shutdown().await;
                info!("MongoDB connection closed successfully");
            }
        },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Huntify API shutdown complete");
    Ok(())
}
