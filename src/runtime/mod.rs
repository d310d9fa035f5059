//! Hosted agent runtime abstraction.
//!
//! The language-model runtime (session handling, tool invocation, search
//! execution) is an external service. This module narrows it to a single
//! contract: submit one user message under an ephemeral session and get back
//! the turn's event stream. The [`agent::TurnExecutor`](crate::agent) depends
//! only on the [`AgentRuntime`] trait, so tests (or a different vendor's API)
//! can substitute their own implementation.

mod gemini;

pub use gemini::GeminiRuntime;

use async_trait::async_trait;
use futures::stream::BoxStream;
use uuid::Uuid;

/// Ephemeral conversation context for one turn.
///
/// Created at the start of a turn, discarded at the end. Sessions are never
/// reused or resumed, so no history crosses requests.
#[derive(Debug, Clone)]
pub struct Session {
    /// Fresh opaque identifier, unique per call
    pub id: Uuid,
    /// Fixed placeholder identity
    pub user_id: String,
    /// Fixed application name the session is registered under
    pub app_name: String,
}

impl Session {
    /// Create a new session with a freshly generated id.
    pub fn new(user_id: &str, app_name: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            app_name: app_name.to_string(),
        }
    }
}

/// One text segment of an event's content.
#[derive(Debug, Clone, Default)]
pub struct Part {
    pub text: Option<String>,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }
}

/// Role-tagged message content, both for outbound user messages and for
/// content carried by runtime events.
#[derive(Debug, Clone)]
pub struct Content {
    pub role: String,
    pub parts: Vec<Part>,
}

impl Content {
    /// Wrap a prompt string as a single-part user message.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            parts: vec![Part::text(text)],
        }
    }
}

/// One event observed while the runtime processes a turn.
///
/// Intermediate events (tool calls, partial output) and the final response
/// share this shape; `final_response` marks the authoritative answer.
#[derive(Debug, Clone)]
pub struct RuntimeEvent {
    /// Name of the agent (or tool) that produced the event
    pub author: String,
    /// Whether this event carries the turn's final response
    pub final_response: bool,
    /// Content payload, absent for bookkeeping events
    pub content: Option<Content>,
}

/// Event stream yielded by one turn. Each item suspends until the runtime
/// produces the next event.
pub type EventStream = BoxStream<'static, anyhow::Result<RuntimeEvent>>;

/// Narrow contract over the hosted agent runtime: run one turn, observe its
/// events. Errors from the underlying service propagate unmodified.
#[async_trait]
pub trait AgentRuntime: Send + Sync {
    async fn run_turn(&self, session: &Session, message: Content) -> anyhow::Result<EventStream>;
}
