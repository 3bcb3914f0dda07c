use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Result;
use axum::{
    body::Bytes,
    extract::State,
    middleware,
    routing::{get_service, post},
    Json, Router,
};
use tower_http::{
    services::{ServeDir, ServeFile},
    trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{error, info, Level};

use crate::{
    auth,
    config::Config,
    error::{GatewayError, GatewayResult},
    llm,
    models::{ChatRequest, ChatResponse},
    prompts,
};

/**
 * \brief State shared by every handler: immutable configuration plus a pooled HTTP client.
 */
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self {
            config: Arc::new(config),
            http,
        })
    }
}

/**
 * \brief Builds the gateway router.
 * \param static_dir directory holding `index.html` and the assets under `/static`
 */
pub fn router(state: AppState, static_dir: impl AsRef<Path>) -> Router {
    let static_dir: PathBuf = static_dir.as_ref().to_path_buf();
    let index = get_service(ServeFile::new(static_dir.join("index.html")));

    let protected = Router::new()
        .route("/", index)
        .route("/api/chat", post(chat))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_auth,
        ));

    // Spans carry the path only; the query string holds the shared secret.
    let trace = TraceLayer::new_for_http()
        .make_span_with(|req: &axum::http::Request<_>| {
            tracing::info_span!("request", method = %req.method(), path = %req.uri().path())
        })
        .on_request(DefaultOnRequest::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .merge(protected)
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(trace)
        .with_state(state)
}

/**
 * \brief Starts the HTTP service and blocks until Ctrl-C.
 * \param addr listen address, e.g. "0.0.0.0:8000"
 */
pub async fn run(addr: &str, state: AppState, static_dir: impl AsRef<Path>) -> Result<()> {
    if state.config.auth_secret.is_none() {
        error!("APP_AUTH is not set; every protected request will be refused");
    }
    let app = router(state, static_dir);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "gateway listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

/**
 * \brief Chat endpoint: POST /api/chat?auth=... with `{"message": "...", "history": [...]}`.
 */
async fn chat(State(state): State<AppState>, body: Bytes) -> GatewayResult<Json<ChatResponse>> {
    let request = ChatRequest::from_slice(&body)?;
    let messages = prompts::assemble(&request.history, &request.message);
    info!(
        history = request.history.len(),
        message_len = request.message.len(),
        "forwarding chat turn"
    );

    let reply = llm::chat_once(&state.http, &state.config, &messages)
        .await
        .map_err(|e| {
            error!(error = %e, "chat completion failed");
            GatewayError::Upstream(e.to_string())
        })?;

    Ok(Json(ChatResponse {
        reply: reply.trim().to_string(),
    }))
}
