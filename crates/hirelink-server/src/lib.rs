//! hirelink-server
//!
//! REST API for the hirelink marketplace. The two public search route
//! groups, equipment and manpower, share one location registry and one Postgres
//! pool, both initialized explicitly at startup and handed to handlers
//! through [`state::AppState`].

use std::sync::Arc;

use hirelink_core::LocationRegistry;
use tokio::net::TcpListener;
use tokio::signal::ctrl_c;
#[cfg(unix)]
use tokio::signal::unix::{signal, SignalKind};
use tracing::info;
use tracing_subscriber::EnvFilter;

pub mod args;
pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;
pub mod store;

use crate::args::CliArgs;
use crate::config::Config;
use crate::state::AppState;

pub async fn run(args: CliArgs) -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::load();
    let port = args.port.unwrap_or(config.port);

    let registry = match &args.locations {
        Some(path) => LocationRegistry::from_path(path)?,
        None => LocationRegistry::load()?,
    };
    let stats = registry.stats();
    info!(
        countries = stats.countries,
        states = stats.states,
        cities = stats.cities,
        "location registry loaded"
    );

    let database_url = args.database_url.unwrap_or(config.database_url);
    let pool = store::connect(&database_url).await?;

    let state = AppState {
        pool,
        registry: Arc::new(registry),
    };
    let app = routes::router(state);

    let address = format!("0.0.0.0:{port}");
    let listener = TcpListener::bind(&address).await?;
    info!("server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let interrupt = async {
        ctrl_c().await.expect("Failed to install Ctrl+C handler");
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal(SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = interrupt => {},
        _ = terminate => {},
    }
}
