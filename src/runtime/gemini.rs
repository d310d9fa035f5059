//! Gemini `generateContent` implementation of the agent runtime.
//!
//! Speaks the hosted Generative Language API over HTTPS. The configured
//! tools (web search) run inside the hosted service during the call, so a
//! whole turn collapses into one request/response pair here; the response is
//! surfaced as a single final event to satisfy the [`AgentRuntime`] stream
//! contract.

use std::sync::Arc;

use async_trait::async_trait;
use futures::StreamExt;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;

use crate::agent::AgentConfig;

use super::{AgentRuntime, Content, EventStream, Part, RuntimeEvent, Session};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Client for the hosted Gemini runtime.
pub struct GeminiRuntime {
    agent: Arc<AgentConfig>,
    api_key: Option<String>,
    base_url: String,
    client: reqwest::Client,
}

impl GeminiRuntime {
    pub fn new(agent: Arc<AgentConfig>, api_key: Option<String>) -> Self {
        Self {
            agent,
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Override the API base URL (local test servers).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn request_body(&self, message: &Content) -> GenerateContentRequest {
        let parts: Vec<Value> = message
            .parts
            .iter()
            .filter_map(|p| p.text.clone())
            .map(|text| json!({ "text": text }))
            .collect();

        GenerateContentRequest {
            system_instruction: Some(json!({
                "parts": [{ "text": self.agent.instruction }]
            })),
            contents: vec![json!({
                "role": message.role,
                "parts": parts,
            })],
            tools: self
                .agent
                .tools
                .iter()
                .map(|name| json!({ (name.as_str()): {} }))
                .collect(),
        }
    }
}

#[async_trait]
impl AgentRuntime for GeminiRuntime {
    async fn run_turn(&self, session: &Session, message: Content) -> anyhow::Result<EventStream> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("GEMINI_API_KEY is not set"))?;

        let url = format!(
            "{}/models/{}:generateContent",
            self.base_url, self.agent.model
        );

        debug!(
            session_id = %session.id,
            model = %self.agent.model,
            "Submitting turn to hosted runtime"
        );

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&self.request_body(&message))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Runtime returned HTTP {}: {}", status, body);
        }

        let reply: GenerateContentResponse = response.json().await?;

        let parts = reply
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|p| p.text)
            .map(Part::text)
            .collect();

        let event = RuntimeEvent {
            author: self.agent.name.clone(),
            final_response: true,
            content: Some(Content {
                role: "model".to_string(),
                parts,
            }),
        };

        Ok(futures::stream::iter([Ok(event)]).boxed())
    }
}

// ── Wire types ────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Value>,
    contents: Vec<Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}
