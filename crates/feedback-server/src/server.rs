use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use feedback_core::sample::SamplingPolicy;
use feedback_llm::FeedbackAnalyzer;

use crate::handlers;
use crate::settings::{Settings, SettingsError};

/// Largest accepted request body.
pub const BODY_LIMIT_BYTES: usize = 10 * 1024 * 1024;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub static_dir: PathBuf,
    pub policy: SamplingPolicy,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            static_dir: PathBuf::from("public"),
            policy: SamplingPolicy::default(),
        }
    }
}

impl TryFrom<&Settings> for ServerConfig {
    type Error = SettingsError;

    fn try_from(settings: &Settings) -> Result<Self, Self::Error> {
        Ok(Self {
            addr: settings.socket_addr()?,
            static_dir: settings.static_dir.clone(),
            policy: settings.sampling_policy(),
        })
    }
}

/// Shared application state passed to Axum handlers.
#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<FeedbackAnalyzer>,
    pub policy: SamplingPolicy,
}

/// Build the Axum router: API routes, static UI fallback, and middleware.
pub fn build_router(state: AppState, static_dir: impl Into<PathBuf>) -> Router {
    Router::new()
        .route("/api/analyze", post(handlers::analyze))
        .route("/api/analyze-bulk", post(handlers::analyze_bulk))
        .route("/api/health", get(handlers::health))
        .with_state(state)
        .fallback_service(ServeDir::new(static_dir.into()))
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Bind and start serving. Returns a handle holding the server task.
pub async fn start(
    config: ServerConfig,
    analyzer: Arc<FeedbackAnalyzer>,
) -> Result<ServerHandle, std::io::Error> {
    let state = AppState {
        analyzer,
        policy: config.policy,
    };
    let router = build_router(state, config.static_dir.clone());

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(
        addr = %local_addr,
        static_dir = %config.static_dir.display(),
        endpoints = ?handlers::ENDPOINTS,
        "feedback analyzer server started"
    );

    let server = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router).await {
            tracing::error!(error = %e, "server exited with error");
        }
    });

    Ok(ServerHandle {
        port: local_addr.port(),
        _server: server,
    })
}

/// Handle returned by `start()`; keeps the server task alive.
pub struct ServerHandle {
    pub port: u16,
    _server: tokio::task::JoinHandle<()>,
}
