use std::io::Stdout;
use std::path::Path;
use std::sync::{Arc, Mutex};

use anyhow::Context;
use business::domain::logger::Logger;
use dotenvy::dotenv;
use logger::TracingLogger;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::writer::{MakeWriterExt, Tee};

mod api;
mod config;
mod setup;

use config::{app_config::AppConfig, database_config};
use setup::{dependency_injection::DependencyContainer, server::Server};

const LOG_FILE: &str = "app.log";

type LogWriter = Tee<Mutex<Stdout>, Mutex<RollingFileAppender>>;

/// Stdout plus `app.log` under `dir`, appended to across restarts
fn log_writer(dir: &Path) -> anyhow::Result<LogWriter> {
    let log_file = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(LOG_FILE)
        .build(dir)
        .context("failed to open log file")?;

    Ok(Mutex::new(std::io::stdout()).and(Mutex::new(log_file)))
}

/// REST API Entry Point
///
/// Initializes logging, loads configuration, connects to PostgreSQL, wires the
/// layers and serves until SIGINT/SIGTERM.
///
/// - config/: Application configuration (server, CORS, database)
/// - setup/: Dependency injection and server setup
/// - api/: Route handlers, DTOs and error mapping
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Load environment variables
    dotenv().ok();

    // 2. Initialize tracing with RUST_LOG env filter; every line goes to stdout
    // and to the log file, each sink behind its own lock
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_ansi(false)
        .with_writer(log_writer(Path::new("."))?)
        .init();

    let tracing_logger = TracingLogger::new();
    let logger: Arc<dyn Logger> = Arc::new(tracing_logger);
    logger.info("Logger started");

    // 3. Load configuration
    let config = AppConfig::from_env()
        .unwrap_or_else(|e| tracing_logger.fatal(&format!("Failed to load config: {}", e)));

    // 4. Initialize database
    let pool = database_config::init_database(&config.database)
        .await
        .unwrap_or_else(|e| {
            let e = anyhow::Error::new(e);
            tracing_logger.fatal(&format!("Failed to initialize database: {:#}", e))
        });

    // 5. Wire dependencies
    let container = DependencyContainer::new(pool, logger.clone());

    // 6. Run server
    Server::run(config, container, logger).await?;

    Ok(())
}
