//! Application state management.
//!
//! The state carries the loaded configuration and, unless the process runs on
//! the in-memory backend, the MongoDB handles every repository is built from.

use mongodb::{Client, Database};

/// MongoDB client and the database the repositories live in
#[derive(Clone)]
pub struct MongoHandles {
    /// Cloneable; shares the underlying connection pool
    pub client: Client,
    pub db: Database,
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// `None` when `STORAGE_BACKEND=memory`
    pub mongo: Option<MongoHandles>,
}
