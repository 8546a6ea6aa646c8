use std::str::FromStr;

use axum_helpers::JwtConfig;
use core_config::{AppInfo, ConfigError, FromEnv, app_info, env_or_default, server::ServerConfig};

// Import MongoDB config from the database library
use database::mongodb::MongoConfig;

// Re-export Environment for use in other modules
pub use core_config::Environment;

/// Where the repositories keep their data (`STORAGE_BACKEND`)
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum StorageBackend {
    #[default]
    MongoDb,
    /// Process-local maps; data is lost on restart
    Memory,
}

impl FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "mongodb" | "mongo" => Ok(Self::MongoDb),
            "memory" => Ok(Self::Memory),
            other => Err(ConfigError::ParseError {
                key: "STORAGE_BACKEND".to_string(),
                details: format!("expected 'mongodb' or 'memory', got '{}'", other),
            }),
        }
    }
}

/// Application-specific configuration
/// Composes shared config components from the `config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub storage: StorageBackend,
    /// Present only when `storage` is [`StorageBackend::MongoDb`]
    pub mongodb: Option<MongoConfig>,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let storage: StorageBackend = env_or_default("STORAGE_BACKEND", "mongodb").parse()?;
        let mongodb = match storage {
            StorageBackend::MongoDb => Some(MongoConfig::from_env()?),
            StorageBackend::Memory => None,
        };
        let server = ServerConfig::from_env()?;
        let jwt = JwtConfig::from_env()?;

        Ok(Self {
            app: app_info!(),
            storage,
            mongodb,
            server,
            jwt,
            environment,
        })
    }
}
