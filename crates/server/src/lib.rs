//! Bloglist Server Library
//!
//! REST backend for a shared blog list: users register and log in, then
//! create, update and delete the blogs they own. Anyone can read blogs
//! and the statistics computed over them.

pub mod blogs;
pub mod core;

use axum::{routing::get, Router};
use std::net::SocketAddr;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::core::{AppState, ServerConfig};

/// Build the full application router over `state`.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(crate::core::router())
        .merge(blogs::router(state.clone()))
        .route("/health", get(health_check))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
}

pub async fn run() -> anyhow::Result<()> {
    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        // Already set, ignore
    }

    info!("=== Bloglist Server ===");

    let config = ServerConfig::default();
    let root = bloglist_common::init_structure(&config.data_dir)?;
    info!("Data directory: {:?}", root);

    // An explicitly chosen root is remembered for later runs.
    if std::env::var_os(bloglist_common::ROOT_ENV).is_some() {
        if let Err(e) = bloglist_common::save_persistent_root(&root) {
            warn!("Could not persist data root: {:#}", e);
        }
    }

    let port = config.port;
    let state = AppState::new(config).await?;

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app(state)).await?;

    Ok(())
}

async fn health_check() -> &'static str {
    "OK - Bloglist Server"
}
