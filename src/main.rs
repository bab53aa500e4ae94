//! Storefront shipping service.
//!
//! # Environment Variables
//!
//! - `STOREFRONT_CONFIG`: Extra configuration file, layered over `config/default.toml`
//! - `STOREFRONT__<SECTION>__<KEY>`: Any configuration value
//! - `PORT`: Server port (default: `3000`)
//! - `GOOGLE_MAPS_API_KEY`: Enables distance-based pricing and `/calculate-distance`
//! - `RUST_LOG`: Log filter, overriding `logging.level`

use anyhow::Context;
use std::sync::Arc;
use storefront::api::rest::{AppState, create_router};
use storefront::config::AppConfig;
use storefront::infrastructure::factory::{Resolvers, build_estimator};
use storefront::telemetry::init_tracing;
use tokio::net::TcpListener;
use tokio::signal;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("failed to load configuration")?;
    init_tracing(&config.logging).context("failed to install tracing subscriber")?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting storefront");

    let resolvers =
        Resolvers::from_config(&config.geocoding).context("failed to build geocoding clients")?;
    let estimator = build_estimator(&config.shipping, &resolvers)
        .context("invalid shipping configuration")?;

    match estimator.warm_up().await {
        Ok(Some(coordinate)) => {
            tracing::info!(origin = %estimator.origin(), %coordinate, "origin located");
        }
        Ok(None) => {
            tracing::warn!(origin = %estimator.origin(), "origin not located yet, will retry per request");
        }
        Err(error) => {
            tracing::warn!(%error, "origin warm-up failed");
        }
    }

    let state = Arc::new(AppState {
        estimator: Arc::new(estimator),
        routes: resolvers.routes.clone(),
    });
    let app = create_router(state, &config.server.allowed_origins);

    let address = config.server.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {}", address))?;
    tracing::info!(%address, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("shutdown complete");
    Ok(())
}

/// Completes on SIGINT or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::warn!(%error, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::warn!(%error, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("received Ctrl+C, shutting down"),
        () = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
