//! Process configuration, read from the environment (and `.env` when present).
//!
//! Variables map onto fields by lowercased name: `DATABASE_URL`, `BIND_ADDR`,
//! `DB_MAX_CONNECTIONS`, `STORAGE`.

use std::net::SocketAddr;

use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] ::config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("DATABASE_URL must be set when STORAGE=postgres")]
    MissingDatabaseUrl,

    #[error("DB_MAX_CONNECTIONS must be at least 1")]
    InvalidPoolSize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    #[serde(alias = "postgresql")]
    Postgres,
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database_url: Option<String>,

    #[serde(default = "default_bind_addr")]
    pub bind_addr: SocketAddr,

    #[serde(rename = "db_max_connections", default = "default_max_connections")]
    pub max_connections: u32,

    #[serde(default)]
    pub storage: StorageBackend,
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 3050))
}

fn default_max_connections() -> u32 {
    DEFAULT_MAX_CONNECTIONS
}

impl Config {
    /// Loads `.env` if present, reads the process environment and validates.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = Self::load(::config::Environment::default())?;
        config.validate()?;
        Ok(config)
    }

    fn load(source: ::config::Environment) -> Result<Self, ::config::ConfigError> {
        ::config::Config::builder()
            .add_source(source.ignore_empty(true))
            .build()?
            .try_deserialize()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.storage == StorageBackend::Postgres && self.database_url.is_none() {
            return Err(ValidationError::MissingDatabaseUrl);
        }
        if self.max_connections == 0 {
            return Err(ValidationError::InvalidPoolSize);
        }
        Ok(())
    }
}
