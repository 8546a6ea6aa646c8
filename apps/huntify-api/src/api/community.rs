//! Community API routes: reviews, coupons, newsletter and help requests

use axum::Router;
use domain_community::{
    CommunityService, InMemoryCommunityRepository, MongoCommunityRepository, handlers,
};

use crate::state::AppState;

/// Create community router
pub fn router(state: &AppState) -> Router {
    match &state.mongo {
        Some(mongo) => handlers::router(CommunityService::new(MongoCommunityRepository::new(
            &mongo.db,
        ))),
        None => handlers::router(CommunityService::new(InMemoryCommunityRepository::new())),
    }
}
