//! Token issuance for the storefront.
//!
//! ```ignore
//! use axum_helpers::auth::{JwtConfig, JwtIssuer};
//! use core_config::FromEnv;
//!
//! let issuer = JwtIssuer::new(&JwtConfig::from_env()?);
//! let token = issuer.issue("user@example.com")?;
//! ```

pub mod config;
pub mod jwt;

pub use config::{DEFAULT_TOKEN_TTL_SECS, JwtConfig};
pub use jwt::{JwtClaims, JwtIssuer};
