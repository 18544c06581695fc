/**
 * Roomcast Server Entry Point
 *
 * Loads configuration, connects the database and serves the REST API,
 * the relay socket and (in production) the front-end bundle.
 */

use std::net::SocketAddr;

use roomcast::backend::server::{config::ServerConfig, create_app};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "info,roomcast=debug";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file if present
    dotenv::dotenv().ok();

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    // Any panic takes the whole process down
    std::panic::set_hook(Box::new(|info| {
        tracing::error!("[Server] Fatal: {}", info);
        std::process::exit(1);
    }));

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("[Server] Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };
    let port = config.port;

    let app = match create_app(config).await {
        Ok(app) => app,
        Err(e) => {
            tracing::error!("[Server] Startup failed: {}", e);
            std::process::exit(1);
        }
    };

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("[Server] Server running on PORT {}", port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("[Server] Shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("[Server] Failed to listen for ctrl-c: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("[Server] Shutdown signal received");
}
