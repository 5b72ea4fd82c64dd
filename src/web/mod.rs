pub mod handlers;
pub mod jobs;
pub mod page;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::llm::GenerationBackend;
use crate::stages::Crew;
use jobs::JobRegistry;

/// Configuration for the web server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on
    pub addr: SocketAddr,
    /// Finished jobs kept in memory
    pub max_jobs: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 8501)),
            max_jobs: 64,
        }
    }
}

/// Shared handler state. Everything here is read-only or internally synchronised.
#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<dyn GenerationBackend>,
    pub crew: Arc<Crew>,
    pub jobs: JobRegistry,
}

impl AppState {
    pub fn new(backend: Arc<dyn GenerationBackend>, crew: Crew, max_jobs: usize) -> Self {
        Self {
            backend,
            crew: Arc::new(crew),
            jobs: JobRegistry::new(max_jobs),
        }
    }
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health))
        .route("/api/articles", post(handlers::submit_article))
        .route(
            "/api/articles/{id}",
            get(handlers::article_status).delete(handlers::cancel_article),
        )
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Serve until Ctrl-C, then cancel whatever is still running
pub async fn serve(config: ServerConfig, state: AppState) -> Result<()> {
    let jobs = state.jobs.clone();
    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.addr))?;

    info!(
        "Serving on http://{} with {} backend",
        config.addr,
        state.backend.name()
    );

    axum::serve(listener, create_app(state))
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            info!("Shutting down");
        })
        .await
        .context("Server error")?;

    jobs.cancel_all().await;
    Ok(())
}
