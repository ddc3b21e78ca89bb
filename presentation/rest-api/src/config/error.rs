use thiserror::Error;

/// Startup configuration failures. Any of these aborts the process.
#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("config.missing: {0} must be set")]
    Missing(&'static str),
    #[error("config.invalid: {0} has an invalid value")]
    Invalid(&'static str),
}
