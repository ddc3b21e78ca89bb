use std::env;

use persistence::db::DatabaseConfig;
use poem::middleware::Cors;

use super::{cors_config, database_config, error::ConfigError, server_config::ServerConfig};

pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub cors: Cors,
}

impl AppConfig {
    /// Load the full configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load the full configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            server: ServerConfig::from_lookup(&lookup)?,
            database: database_config::from_lookup(&lookup)?,
            cors: cors_config::init_cors(&lookup),
        })
    }
}
