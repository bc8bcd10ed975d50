// crates/knowledge-store-http/src/config.rs
// ============================================================================
// Module: KnowledgeStore Configuration
// Description: Environment-variable configuration loading for the
// knowledge-store binary.
// Purpose: Provide fail-closed config parsing without a TOML file, since
// spec.md §6 names environment variables only.
// Dependencies: std::env
// ============================================================================

//! ## Overview
//! `PERSISTENCE=durable` parses and validates but has no concrete adapter in
//! this repository (see `knowledge-store-adapters`); selecting it fails
//! closed at startup rather than silently falling back to the in-memory
//! adapter.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::net::SocketAddr;

use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default bind address when `KNOWLEDGE_STORE_BIND` is unset.
const DEFAULT_BIND: &str = "0.0.0.0:8081";

// ============================================================================
// SECTION: Persistence Mode
// ============================================================================

/// Selects the storage adapter family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Persistence {
    /// Process-local, in-memory adapters (the only adapter this repo ships).
    Memory,
    /// A durable backend; recognized but not implemented by this repo.
    Durable,
}

impl Persistence {
    fn parse(raw: &str) -> Result<Self, ConfigError> {
        match raw {
            "memory" => Ok(Self::Memory),
            "durable" => Ok(Self::Durable),
            other => Err(ConfigError::Invalid(format!(
                "PERSISTENCE must be \"memory\" or \"durable\", got {other:?}"
            ))),
        }
    }
}

// ============================================================================
// SECTION: Config
// ============================================================================

/// Resolved configuration for the knowledge-store process.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP server binds to.
    pub bind: SocketAddr,
    /// Selected storage adapter family.
    pub persistence: Persistence,
    /// Document-store endpoint URI, when a durable adapter is configured.
    pub document_store_uri: Option<String>,
    /// Document-store database name, when a durable adapter is configured.
    pub document_store_db: Option<String>,
    /// Optional blob bucket target for raw content persistence.
    pub blob_bucket: Option<String>,
    /// Optional shared secret gating non-health routes.
    pub api_key: Option<String>,
}

/// Error produced while loading configuration from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A recognized variable held a value that failed to parse.
    #[error("invalid configuration: {0}")]
    Invalid(String),
    /// `PERSISTENCE=durable` was selected but no durable adapter ships here.
    #[error(
        "PERSISTENCE=durable has no concrete adapter in this build; use PERSISTENCE=memory"
    )]
    DurableUnavailable,
}

impl Config {
    /// Loads configuration from the process environment.
    ///
    /// # Errors
    /// Returns [`ConfigError`] when a recognized variable is present but
    /// invalid, or when `PERSISTENCE=durable` is selected.
    pub fn from_env() -> Result<Self, ConfigError> {
        let bind = match env::var("KNOWLEDGE_STORE_BIND") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| ConfigError::Invalid(format!("invalid bind address {raw:?}")))?,
            Err(_) => DEFAULT_BIND
                .parse()
                .map_err(|_| ConfigError::Invalid("invalid default bind address".to_string()))?,
        };

        let persistence = match env::var("PERSISTENCE") {
            Ok(raw) => Persistence::parse(&raw)?,
            Err(_) => Persistence::Memory,
        };
        if persistence == Persistence::Durable {
            return Err(ConfigError::DurableUnavailable);
        }

        Ok(Self {
            bind,
            persistence,
            document_store_uri: env::var("DOCUMENT_STORE_URI").ok(),
            document_store_db: env::var("DOCUMENT_STORE_DB").ok(),
            blob_bucket: env::var("BLOB_BUCKET").ok(),
            api_key: env::var("API_KEY").ok(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::Persistence;

    #[test]
    fn persistence_parses_known_values() {
        assert_eq!(Persistence::parse("memory").expect("parses"), Persistence::Memory);
        assert_eq!(Persistence::parse("durable").expect("parses"), Persistence::Durable);
        assert!(Persistence::parse("bogus").is_err());
    }
}
