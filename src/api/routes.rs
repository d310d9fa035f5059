//! Endpoint handlers and server wiring.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Html,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};

use crate::agent::{AgentConfig, TurnExecutor};
use crate::config::Config;
use crate::news::parse_news_items;
use crate::runtime::GeminiRuntime;

use super::types::{
    ChatRequest, ChatResponse, ErrorBody, HealthResponse, NewsParams, NewsResponse,
};

/// Query used when the news endpoint is called without one.
const DEFAULT_NEWS_QUERY: &str = "latest AI news today";

/// Query behind the `/api/news/latest` convenience route.
const LATEST_NEWS_QUERY: &str = "latest artificial intelligence news and breakthroughs today";

/// Shared application state. The agent definition is immutable, so
/// unsynchronized concurrent reads are fine; nothing else is shared across
/// requests.
pub struct AppState {
    pub agent: Arc<AgentConfig>,
    pub executor: Arc<TurnExecutor>,
}

type ApiError = (StatusCode, Json<ErrorBody>);

fn internal_error(context: &str, err: anyhow::Error) -> ApiError {
    error!("{}: {}", context, err);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorBody {
            detail: format!("{}: {}", context, err),
        }),
    )
}

/// Build the API router over the given state.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/api/chat", post(chat))
        .route("/api/news", post(news))
        .route("/api/news/latest", get(news_latest))
        .route("/dashboard", get(dashboard))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Build the agent, runtime and executor from config and serve until the
/// process is stopped. Fails fast only on bind errors; per-request failures
/// never take the server down.
pub async fn serve(config: Config) -> anyhow::Result<()> {
    let agent = Arc::new(AgentConfig::news_agent(&config.model));
    let runtime = Arc::new(GeminiRuntime::new(agent.clone(), config.api_key.clone()));
    let executor = Arc::new(TurnExecutor::new(
        agent.clone(),
        runtime,
        config.turn_timeout,
    ));

    let state = Arc::new(AppState { agent, executor });

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, router(state)).await?;
    Ok(())
}

/// `GET /` - static service metadata.
async fn root() -> Json<Value> {
    Json(json!({
        "service": "AI News Chatbot Backend",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running",
        "endpoints": {
            "chat": "/api/chat",
            "news": "/api/news",
            "health": "/health",
            "dashboard": "/dashboard",
        },
    }))
}

/// `GET /health` - healthy whenever the agent definition exists, regardless
/// of whether the runtime credential is set.
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: Utc::now(),
        agent_status: if state.agent.name.is_empty() {
            "not initialized".to_string()
        } else {
            "ready".to_string()
        },
    })
}

/// `POST /api/chat` - run one agent turn over the raw message.
async fn chat(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let response = state
        .executor
        .run_turn(&request.message)
        .await
        .map_err(|e| internal_error("Error processing message", e))?;

    Ok(Json(ChatResponse {
        response,
        timestamp: Utc::now(),
    }))
}

/// `POST /api/news?query=` - wrap the query in the news instruction
/// template, run one turn, extract items from the reply.
async fn news(
    State(state): State<Arc<AppState>>,
    Query(params): Query<NewsParams>,
) -> Result<Json<NewsResponse>, ApiError> {
    let query = params
        .query
        .unwrap_or_else(|| DEFAULT_NEWS_QUERY.to_string());
    fetch_news(&state, query).await
}

/// `GET /api/news/latest` - `/api/news` with a fixed broad query.
async fn news_latest(
    State(state): State<Arc<AppState>>,
) -> Result<Json<NewsResponse>, ApiError> {
    fetch_news(&state, LATEST_NEWS_QUERY.to_string()).await
}

async fn fetch_news(state: &AppState, query: String) -> Result<Json<NewsResponse>, ApiError> {
    let prompt = format!(
        "Search for the latest news about: {}. \
         Provide a list of recent news items with titles and summaries.",
        query
    );

    let reply = state
        .executor
        .run_turn(&prompt)
        .await
        .map_err(|e| internal_error("Error fetching news", e))?;

    Ok(Json(NewsResponse {
        news_items: parse_news_items(&reply),
        query,
        timestamp: Utc::now(),
    }))
}

/// `GET /dashboard` - the browser chat/news dashboard.
async fn dashboard() -> Html<&'static str> {
    Html(include_str!("../../static/dashboard.html"))
}
