//! Course BFF server.
//!
//! ```text
//!   Front end ──▶ axum router ──▶ handler ──▶ query parser
//!                                    │
//!                                    ├──▶ CMS (courses, seos)
//!                                    └──▶ client API (catalog, pricing, units)
//!                                    │
//!   Front end ◀── JSON ◀──────── transformers
//! ```

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tokio::net::TcpListener;

use course_bff::config::load_config;
use course_bff::http::BffServer;
use course_bff::lifecycle::{build_state, signals, Shutdown, StartupError};
use course_bff::observability::{logging, metrics};

#[derive(Parser, Debug)]
#[command(name = "course-bff", version, about = "Backend-for-frontend for the course catalog")]
struct Args {
    /// Path to a TOML config file. Environment variables override its values.
    #[arg(short, long, env = "BFF_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // .env is optional
    let _ = dotenvy::dotenv();
    let args = Args::parse();

    let config = load_config(args.config.as_deref())?;
    logging::init_logging(&config.observability);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let state = build_state(&config)?;

    let listener = TcpListener::bind(&config.listener.bind_address)
        .await
        .map_err(|source| StartupError::Bind {
            address: config.listener.bind_address.clone(),
            source,
        })?;

    let shutdown = Shutdown::new();
    signals::spawn_signal_listener(shutdown.clone());

    let server = BffServer::new(state, Duration::from_secs(config.timeouts.request_secs));
    server.run(listener, shutdown.wait()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
