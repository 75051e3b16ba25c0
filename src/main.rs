//! MedFlow API service
//!
//! An HTTP API for the MedFlow system, built with Tokio and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌────────────────────────────────────────────┐
//!                    │               MEDFLOW API                   │
//!                    │                                             │
//!   Client Request   │  ┌─────────┐    ┌──────────────────────┐   │
//!   ─────────────────┼─▶│  http   │───▶│ handlers             │   │
//!                    │  │ server  │    │ /  /health  /status  │   │
//!                    │  └─────────┘    │ /debug  /ask ────────┼───┼──▶ chat-completions API
//!                    │                 └──────────────────────┘   │     (llm client, retried)
//!                    │                                             │
//!                    │  ┌───────────────────────────────────────┐ │
//!                    │  │          Cross-Cutting Concerns        │ │
//!                    │  │  ┌────────┐ ┌────────────┐ ┌────────┐ │ │
//!                    │  │  │ config │ │ observa-   │ │ life-  │ │ │
//!                    │  │  │ (env)  │ │ bility     │ │ cycle  │ │ │
//!                    │  │  └────────┘ └────────────┘ └────────┘ │ │
//!                    │  └───────────────────────────────────────┘ │
//!                    └────────────────────────────────────────────┘
//! ```

use tokio::net::TcpListener;

use medflow_api::config::load_settings;
use medflow_api::http::HttpServer;
use medflow_api::lifecycle::{spawn_signal_listener, Shutdown};
use medflow_api::observability::{init_tracing, metrics};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A .env file is optional; real environment variables win.
    dotenvy::dotenv().ok();

    // Settings load before tracing so the log format can follow the
    // environment. A config failure is fatal and must not bind a socket.
    let settings = match load_settings() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            std::process::exit(1);
        }
    };

    init_tracing(settings.debug, settings.environment);

    tracing::info!(
        app_name = %settings.app_name,
        environment = %settings.environment,
        "medflow-api v{} starting",
        env!("CARGO_PKG_VERSION")
    );

    if settings.metrics_enabled {
        if let Ok(addr) = settings.metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %settings.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    let listener = TcpListener::bind((settings.host.as_str(), settings.port)).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(
        address = %local_addr,
        "Listening for connections"
    );

    let shutdown = Shutdown::new();
    spawn_signal_listener(shutdown.clone());

    let server = HttpServer::new(settings)?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
