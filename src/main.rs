//! World Manager - backend API for tabletop worldbuilding
//!
//! The server:
//! - Stores spells, stat blocks, races, items, events, and user accounts
//!   in SQLite
//! - Serves a REST API over axum
//! - Delivers contact form submissions asynchronously through a
//!   persistent mail queue

mod application;
mod domain;
mod infrastructure;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::infrastructure::config::AppConfig;
use crate::infrastructure::http;
use crate::infrastructure::state::AppState;
use crate::infrastructure::workers::{mail_delivery_worker, queue_cleanup_worker};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "world_manager=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting World Manager");

    let config = AppConfig::from_env()?;
    tracing::info!("Configuration loaded");
    tracing::info!("  Database: {}", config.database_path);
    match &config.mail.relay_url {
        Some(url) => tracing::info!("  Mail relay: {}", url),
        None => tracing::warn!("  Mail relay not configured; contact mail will queue"),
    }

    let state = Arc::new(AppState::new(config).await?);
    tracing::info!("Application state initialized");

    // Background workers for the mail queue
    let mail_worker = {
        let state = state.clone();
        tokio::spawn(async move {
            mail_delivery_worker(state).await;
        })
    };
    let cleanup_worker = {
        let state = state.clone();
        tokio::spawn(async move {
            queue_cleanup_worker(state).await;
        })
    };

    let app = Router::new()
        .route("/health", get(|| async { "OK" }))
        .merge(http::create_routes())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state.clone());

    let addr = SocketAddr::from(([0, 0, 0, 0], state.config.server_port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    tokio::select! {
        result = axum::serve(listener, app) => {
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    mail_worker.abort();
    cleanup_worker.abort();
    tracing::info!("World Manager stopped");

    Ok(())
}
