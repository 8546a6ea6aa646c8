//! Liveness banner and readiness check

use axum::{Router, extract::State, response::IntoResponse, routing::get};
use axum_helpers::server::{HealthCheckFuture, run_health_checks};

use crate::state::AppState;

/// `/` and `/ready`; `/health` comes from `axum_helpers::health_router`
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/ready", get(readiness_check))
        .with_state(state)
}

async fn root() -> &'static str {
    "Server is running"
}

/// Readiness check - pings MongoDB when it is the storage backend
async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    let mut checks: Vec<(&str, HealthCheckFuture)> = Vec::new();

    if let Some(mongo) = &state.mongo {
        let client = mongo.client.clone();
        checks.push((
            "mongodb",
            Box::pin(async move {
                if database::mongodb::check_health(&client).await {
                    Ok(())
                } else {
                    Err("ping failed".to_string())
                }
            }),
        ));
    }

    run_health_checks(checks).await
}
