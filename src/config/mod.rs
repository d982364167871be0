//! Layered configuration loading using figment.
//!
//! Sources, highest priority first:
//! 1. Environment variables prefixed `TASK_TRACKER_`, with `__` separating
//!    sections (`TASK_TRACKER_SERVER__PORT=9090` sets `server.port`)
//! 2. `task-tracker.toml` in the working directory, when present
//! 3. Built-in defaults
//!
//! [`AppConfig::load_with_dotenv`] additionally reads a `.env` file into the
//! process environment before the chain is evaluated.

mod error;
mod general;
mod server;
mod storage;

pub use error::ConfigError;
pub use general::{DemoDataConfig, LogConfig};
pub use server::ServerConfig;
pub use storage::{StorageBackend, StorageConfig};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

/// Prefix shared by every configuration environment variable.
pub const ENV_PREFIX: &str = "TASK_TRACKER_";

/// Optional configuration file read from the working directory.
pub const CONFIG_FILE: &str = "task-tracker.toml";

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct AppConfig {
    /// HTTP listener.
    #[serde(default)]
    pub server: ServerConfig,
    /// Repository backend.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Start-up seeding.
    #[serde(default)]
    pub demo_data: DemoDataConfig,
    /// Log filtering.
    #[serde(default)]
    pub log: LogConfig,
}

impl AppConfig {
    /// Loads and validates configuration from defaults, the optional file,
    /// and the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a source cannot be parsed or the merged
    /// values are inconsistent.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    /// Reads `.env` (if any) into the environment, then calls [`Self::load`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Dotenv`] for an unreadable `.env` file, or any
    /// error from [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            return Err(ConfigError::Dotenv(err));
        }
        Self::load()
    }

    /// Builds the provider chain without extracting it.
    #[must_use]
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Extracts and validates configuration from an arbitrary figment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when extraction or validation fails.
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Checks cross-field constraints.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for a zero port or pool size, or
    /// [`ConfigError::Missing`] when the Postgres backend has no URL.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port",
                reason: "must be between 1 and 65535",
            });
        }
        if self.storage.backend == StorageBackend::Postgres {
            let has_url = self
                .storage
                .database_url
                .as_deref()
                .is_some_and(|url| !url.trim().is_empty());
            if !has_url {
                return Err(ConfigError::Missing {
                    field: "storage.database_url",
                    condition: "storage.backend is postgres",
                });
            }
            if self.storage.max_connections == 0 {
                return Err(ConfigError::InvalidValue {
                    field: "storage.max_connections",
                    reason: "must be at least 1",
                });
            }
        }
        Ok(())
    }
}
