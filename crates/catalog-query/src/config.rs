// crates/catalog-query/src/config.rs
// ============================================================================
// Module: CatalogQuery Configuration
// Description: Environment-variable configuration loading for the
// catalog-query binary.
// Purpose: Provide fail-closed config parsing without a TOML file.
// Dependencies: std::env
// ============================================================================

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::net::SocketAddr;

use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default bind address when `CATALOG_QUERY_BIND` is unset.
const DEFAULT_BIND: &str = "0.0.0.0:8083";

// ============================================================================
// SECTION: Config
// ============================================================================

/// Resolved configuration for the catalog-query process.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP server binds to.
    pub bind: SocketAddr,
}

/// Error produced while loading configuration from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A recognized variable held a value that failed to parse.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

impl Config {
    /// Loads configuration from the process environment.
    ///
    /// # Errors
    /// Returns [`ConfigError`] when `CATALOG_QUERY_BIND` is set but is not
    /// a valid socket address.
    pub fn from_env() -> Result<Self, ConfigError> {
        let bind = match env::var("CATALOG_QUERY_BIND") {
            Ok(raw) => {
                raw.parse().map_err(|_| ConfigError::Invalid(format!("invalid bind address {raw:?}")))?
            }
            Err(_) => DEFAULT_BIND.parse().map_err(|_| ConfigError::Invalid("invalid default bind address".to_string()))?,
        };
        Ok(Self { bind })
    }
}
