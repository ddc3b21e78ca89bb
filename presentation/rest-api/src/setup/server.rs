use std::sync::Arc;
use std::time::Duration;

use business::domain::logger::Logger;
use poem::{
    Endpoint, EndpointExt, Route, Server as PoemServer, listener::TcpListener,
    middleware::{Cors, Tracing},
};
use poem_openapi::OpenApiService;
use tokio::signal;

use crate::{config::app_config::AppConfig, setup::dependency_injection::DependencyContainer};

/// Time in-flight requests get to finish once shutdown starts
const SHUTDOWN_GRACE_PERIOD: Duration = Duration::from_secs(5);

pub struct Server;

/// Builds the full endpoint tree: the JSON API under `/api` plus its docs.
pub fn build_app(
    container: DependencyContainer,
    cors: Cors,
    server_url: String,
) -> impl Endpoint {
    let api_service = OpenApiService::new(
        (container.health_api, container.course_api),
        "Courses Backend API",
        env!("CARGO_PKG_VERSION"),
    )
    .server(format!("{}/api", server_url));
    let ui = api_service.swagger_ui();
    let spec = api_service.spec_endpoint();

    Route::new()
        .nest("/api", api_service)
        .nest("/docs", ui)
        .nest("/openapi.json", spec)
        .with(cors)
        .with(Tracing)
}

impl Server {
    pub async fn run(
        config: AppConfig,
        container: DependencyContainer,
        logger: Arc<dyn Logger>,
    ) -> anyhow::Result<()> {
        let addr = config.server.bind_address();
        let app = build_app(container, config.cors, format!("http://{}", addr));

        logger.info(&format!("Server starting at http://{}", addr));
        logger.info(&format!("Swagger UI at http://{}/docs", addr));

        PoemServer::new(TcpListener::bind(&addr))
            .run_with_graceful_shutdown(
                app,
                shutdown_signal(logger.clone()),
                Some(SHUTDOWN_GRACE_PERIOD),
            )
            .await?;

        logger.info("Server stopped");
        Ok(())
    }
}

/// Resolves on SIGINT or SIGTERM
async fn shutdown_signal(logger: Arc<dyn Logger>) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            logger.error(&format!("Failed to listen for Ctrl+C: {}", e));
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                logger.error(&format!("Failed to listen for SIGTERM: {}", e));
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    logger.info("Shutting down server...");
}
