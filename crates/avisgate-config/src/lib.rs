//! # avisgate Config
//!
//! Configuration structures loaded from environment variables:
//!
//! - [`jwt`]: token signing secret and time-to-live
//! - [`cors`]: allowed cross-origin callers
//! - [`server`]: listen address
//!
//! # Example
//!
//! ```ignore
//! use avisgate_config::{CorsConfig, JwtConfig, ServerConfig};
//!
//! let jwt_config = JwtConfig::from_env()?;
//! let cors_config = CorsConfig::from_env();
//! let server_config = ServerConfig::from_env();
//! ```

pub mod cors;
pub mod jwt;
pub mod server;

use thiserror::Error;

// Re-export commonly used types at crate root
pub use cors::CorsConfig;
pub use jwt::JwtConfig;
pub use server::ServerConfig;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} is invalid: {reason}")]
    Invalid { name: &'static str, reason: String },
}
