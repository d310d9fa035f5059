//! API request and response types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::news::NewsItem;

/// Chat request body.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    /// User message to the chatbot
    pub message: String,
}

/// Chat reply.
#[derive(Debug, Clone, Serialize)]
pub struct ChatResponse {
    /// Assistant response text (empty when the turn produced no answer)
    pub response: String,

    /// Server-side completion time
    pub timestamp: DateTime<Utc>,
}

/// Query parameters for the news endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct NewsParams {
    /// Free-text news query (defaults to a broad AI-news query)
    pub query: Option<String>,
}

/// News reply.
#[derive(Debug, Clone, Serialize)]
pub struct NewsResponse {
    /// Extracted items, in reply order
    pub news_items: Vec<NewsItem>,

    /// The query that produced them (before template wrapping)
    pub query: String,

    /// Server-side completion time
    pub timestamp: DateTime<Utc>,
}

/// Health check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Server-side time of the check
    pub timestamp: DateTime<Utc>,

    /// Whether the agent definition is constructed
    pub agent_status: String,
}

/// Error body for 500 responses.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    /// Human-readable failure description
    pub detail: String,
}
