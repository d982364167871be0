//! Storage backend selection.

use serde::{Deserialize, Serialize};

const fn default_max_connections() -> u32 {
    10
}

const fn default_apply_schema() -> bool {
    true
}

/// Which repository implementation backs the services.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Process-local maps; data is lost on restart.
    #[default]
    Memory,
    /// `PostgreSQL` through Diesel.
    Postgres,
}

/// Storage configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Selected backend.
    #[serde(default)]
    pub backend: StorageBackend,

    /// Connection URL, required for the Postgres backend.
    #[serde(default)]
    pub database_url: Option<String>,

    /// Upper bound on pooled connections.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Whether to run the idempotent schema DDL at start-up.
    #[serde(default = "default_apply_schema")]
    pub apply_schema: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            database_url: None,
            max_connections: default_max_connections(),
            apply_schema: default_apply_schema(),
        }
    }
}
