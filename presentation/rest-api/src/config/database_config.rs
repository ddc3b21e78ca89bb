use persistence::db::{DatabaseConfig, DatabaseError, create_postgres_pool, run_migrations};
use sqlx::{PgPool, postgres::PgSslMode};

use super::error::ConfigError;

/// Read database settings
///
/// Environment variables:
/// - DB_HOST, DB_USER, DB_NAME: required
/// - DB_PORT: default 5432
/// - DB_PASSWORD: default empty
/// - DB_SSLMODE: libpq mode name, default "disable"
/// - DB_MAX_CONNECTIONS: default 5
pub fn from_lookup<F>(lookup: F) -> Result<DatabaseConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let required = |key: &'static str| {
        lookup(key)
            .filter(|value| !value.trim().is_empty())
            .ok_or(ConfigError::Missing(key))
    };

    let mut config = DatabaseConfig::new(
        required("DB_HOST")?,
        required("DB_USER")?,
        required("DB_NAME")?,
    );

    if let Some(port) = lookup("DB_PORT") {
        config.port = port
            .trim()
            .parse::<u16>()
            .map_err(|_| ConfigError::Invalid("DB_PORT"))?;
    }
    if let Some(password) = lookup("DB_PASSWORD") {
        config.password = password;
    }
    if let Some(ssl_mode) = lookup("DB_SSLMODE") {
        config.ssl_mode = ssl_mode
            .trim()
            .parse::<PgSslMode>()
            .map_err(|_| ConfigError::Invalid("DB_SSLMODE"))?;
    }
    if let Some(max_connections) = lookup("DB_MAX_CONNECTIONS") {
        config.max_connections = max_connections
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|n| *n > 0)
            .ok_or(ConfigError::Invalid("DB_MAX_CONNECTIONS"))?;
    }

    Ok(config)
}

/// Open the connection pool and bring the schema up to date
pub async fn init_database(config: &DatabaseConfig) -> Result<PgPool, DatabaseError> {
    let pool = create_postgres_pool(config).await?;
    run_migrations(&pool).await?;
    Ok(pool)
}
