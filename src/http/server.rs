//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the page, session and health handlers
//! - Wire up middleware (tracing, timeout)
//! - Serve until shutdown is triggered

use axum::{
    extract::State,
    response::{Html, IntoResponse},
    routing::get,
    Json, Router,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::ServerConfig;
use crate::http::page::render_page;
use crate::lifecycle::ShutdownSignal;
use crate::observability::metrics;
use crate::session::{Session, SessionStore};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub title: Arc<str>,
    pub store: SessionStore,
}

/// HTTP server for the page and session view.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server reading from `store`.
    pub fn new(config: &ServerConfig, store: SessionStore) -> Self {
        let state = AppState {
            title: Arc::from(config.title.as_str()),
            store,
        };

        let router = Self::build_router(config, state);
        Self { router }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServerConfig, state: AppState) -> Router {
        Router::new()
            .route("/", get(page_handler))
            .route("/session", get(session_handler))
            .route("/health", get(health_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout_secs)))
            .layer(TraceLayer::new_for_http())
    }

    /// Router with all handlers, for embedding or testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: ShutdownSignal,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move { shutdown.recv().await })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

async fn page_handler(State(state): State<AppState>) -> Html<String> {
    metrics::record_request("/");
    Html(render_page(&state.title))
}

async fn session_handler(State(state): State<AppState>) -> Json<Session> {
    metrics::record_request("/session");
    Json(Session::clone(&state.store.snapshot()))
}

async fn health_handler() -> impl IntoResponse {
    "ok"
}
