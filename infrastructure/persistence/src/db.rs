use sqlx::{
    PgPool,
    postgres::{PgConnectOptions, PgPoolOptions, PgSslMode},
};
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("database.connection_error")]
    ConnectionError(#[source] sqlx::Error),
    #[error("database.migration_error")]
    MigrationError(#[source] sqlx::migrate::MigrateError),
}

/// Configuration for the database connection
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    pub ssl_mode: PgSslMode,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl DatabaseConfig {
    /// Creates a new database configuration with default values
    pub fn new(host: String, user: String, name: String) -> Self {
        Self {
            host,
            port: 5432,
            user,
            password: String::new(),
            name,
            ssl_mode: PgSslMode::Disable,
            max_connections: 5,
            acquire_timeout: Duration::from_secs(5),
        }
    }

    /// Builds the driver options; credentials never go through a URL string
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.name)
            .ssl_mode(self.ssl_mode)
    }
}

/// Creates a PostgreSQL connection pool
pub async fn create_postgres_pool(config: &DatabaseConfig) -> Result<PgPool, DatabaseError> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
        .connect_with(config.connect_options())
        .await
        .map_err(DatabaseError::ConnectionError)?;

    Ok(pool)
}

/// Applies the migrations embedded from `migrations/`
pub async fn run_migrations(pool: &PgPool) -> Result<(), DatabaseError> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(DatabaseError::MigrationError)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_apply_defaults_for_optional_settings() {
        let config = DatabaseConfig::new(
            "localhost".to_string(),
            "lms".to_string(),
            "courses".to_string(),
        );

        assert_eq!(config.port, 5432);
        assert_eq!(config.password, "");
        assert!(matches!(config.ssl_mode, PgSslMode::Disable));
        assert_eq!(config.max_connections, 5);
    }

    #[test]
    fn should_build_connect_options_from_config() {
        let mut config = DatabaseConfig::new(
            "db.internal".to_string(),
            "lms".to_string(),
            "courses".to_string(),
        );
        config.port = 6543;
        config.ssl_mode = PgSslMode::Require;

        let options = config.connect_options();

        assert_eq!(options.get_host(), "db.internal");
        assert_eq!(options.get_port(), 6543);
        assert_eq!(options.get_username(), "lms");
        assert_eq!(options.get_database(), Some("courses"));
        assert!(matches!(options.get_ssl_mode(), PgSslMode::Require));
    }
}
