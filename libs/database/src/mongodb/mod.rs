//! MongoDB connection management
//!
//! The [`Client`] returned here is a connection pool; open it once at startup
//! and hand `client.database(..)` to whatever needs collections.

mod config;
mod connector;
pub mod dates;
mod health;
pub mod ids;

pub use config::MongoConfig;
pub use connector::{connect, connect_from_config, connect_from_config_with_retry};
pub use health::{HealthStatus, check_health, check_health_detailed};
pub use dates::bson_datetime;
pub use ids::id_filter;

pub use mongodb::{Client, Collection, Database};
