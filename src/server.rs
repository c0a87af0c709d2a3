//! HTTP front door powered by axum.
//!
//! Serves:
//! - `POST /`: JSON-RPC 2.0 endpoint
//! - `GET  /.well-known/agent.json`: static agent descriptor
//! - `GET  /docs/*`: static docs, when the directory exists
//! - `GET  /health`: liveness probe

use std::any::Any;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::etymology::{EtymologyService, OpenAiClient};
use crate::guard;
use crate::handlers;
use crate::protocol::{JsonRpcError, JsonRpcResponse};

/// Maximum bytes per JSON-RPC request body (1 MiB).
pub const MAX_MESSAGE_BYTES: usize = 1024 * 1024;

/// Shared state handed to every route.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<EtymologyService>,
    pub agent_card_path: Arc<PathBuf>,
}

impl AppState {
    pub fn new(service: EtymologyService, agent_card_path: impl Into<PathBuf>) -> Self {
        Self {
            service: Arc::new(service),
            agent_card_path: Arc::new(agent_card_path.into()),
        }
    }
}

/// Build the router. `/docs` is mounted only if `docs_dir` is a directory.
pub fn build_router(state: AppState, docs_dir: &Path) -> Router {
    let mut router = Router::new()
        .route("/", post(rpc_entry))
        .route("/.well-known/agent.json", get(agent_card))
        .route("/health", get(health_check));

    if docs_dir.is_dir() {
        tracing::info!(dir = %docs_dir.display(), "serving docs at /docs");
        router = router.nest_service("/docs", ServeDir::new(docs_dir));
    }

    router
        .with_state(state)
        .layer(DefaultBodyLimit::max(MAX_MESSAGE_BYTES))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Etymology agent bound to the configured host and port.
pub struct EtymoServer {
    config: ServerConfig,
}

impl EtymoServer {
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    /// Router wired to the OpenAI client from the configuration.
    pub fn router(&self) -> Router {
        let client = OpenAiClient::new(&self.config.base_url, &self.config.api_key, &self.config.model);
        tracing::info!(model = client.model(), "using upstream model");
        let service = EtymologyService::new(Arc::new(client));
        let state = AppState::new(service, self.config.agent_card_path.clone());
        build_router(state, &self.config.docs_dir)
    }

    pub async fn run(self) -> std::io::Result<()> {
        let app = self.router();
        let listener = tokio::net::TcpListener::bind((self.config.host.as_str(), self.config.port)).await?;

        tracing::info!("etymo agent listening on http://{}", listener.local_addr()?);
        tracing::info!("   Agent Card: /.well-known/agent.json");
        tracing::info!("   JSON-RPC:   POST /");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}

/// POST /: JSON-RPC 2.0 endpoint. Always answers 200.
async fn rpc_entry(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Json<JsonRpcResponse> {
    let body = match body {
        Ok(b) => b,
        Err(rejection) => {
            tracing::warn!(error = %rejection, "failed to read request body");
            return Json(JsonRpcResponse::error(
                None,
                JsonRpcError::parse_error(rejection.body_text()),
            ));
        }
    };

    let resp = guard::guarded(&body, handlers::handle_body(&body, &state.service)).await;
    Json(resp)
}

/// GET /.well-known/agent.json: the descriptor file, verbatim.
async fn agent_card(State(state): State<AppState>) -> Response {
    match tokio::fs::read(state.agent_card_path.as_path()).await {
        Ok(bytes) => ([(header::CONTENT_TYPE, "application/json")], bytes).into_response(),
        Err(e) => {
            tracing::warn!(path = %state.agent_card_path.display(), error = %e, "agent card unavailable");
            (
                StatusCode::NOT_FOUND,
                Json(serde_json::json!({ "error": "agent.json not found" })),
            )
                .into_response()
        }
    }
}

/// GET /health
async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Panics outside the RPC guard still answer with a JSON-RPC envelope.
fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    (StatusCode::OK, Json(guard::recover(None, err))).into_response()
}
