//! Per-request turn execution against the hosted runtime.

use std::sync::Arc;
use std::time::Duration;

use futures::StreamExt;

use crate::runtime::{AgentRuntime, Content, Session};

use super::AgentConfig;

/// Application name sessions are registered under.
const APP_NAME: &str = "ai-news-chatbot";

/// Placeholder user identity; the backend keeps no per-user state.
const DEFAULT_USER: &str = "student";

/// Runs one agent turn per call.
///
/// Every call gets its own ephemeral session, so concurrent calls are
/// independent and nothing here needs locking.
pub struct TurnExecutor {
    agent: Arc<AgentConfig>,
    runtime: Arc<dyn AgentRuntime>,
    turn_timeout: Duration,
}

impl TurnExecutor {
    pub fn new(
        agent: Arc<AgentConfig>,
        runtime: Arc<dyn AgentRuntime>,
        turn_timeout: Duration,
    ) -> Self {
        Self {
            agent,
            runtime,
            turn_timeout,
        }
    }

    /// Run one turn and return the final response text.
    ///
    /// The event stream is scanned to its end in arrival order; the text of
    /// the last final-response event authored by the agent wins. If no such
    /// event is observed the turn degrades to an empty string - callers must
    /// treat that as "no answer", not as an error.
    ///
    /// Empty prompts are forwarded unmodified; whether to answer them is the
    /// runtime's call.
    ///
    /// # Errors
    ///
    /// Runtime errors (network, quota, credential) propagate unmodified.
    /// A turn exceeding the configured timeout is cancelled and reported as
    /// an error.
    pub async fn run_turn(&self, prompt: &str) -> anyhow::Result<String> {
        let session = Session::new(DEFAULT_USER, APP_NAME);
        let message = Content::user(prompt);

        tracing::debug!(session_id = %session.id, "Starting agent turn");

        let drain = async {
            let mut events = self.runtime.run_turn(&session, message).await?;

            let mut final_text = String::new();
            while let Some(event) = events.next().await {
                let event = event?;
                if event.author == self.agent.name && event.final_response {
                    final_text = extract_text(event.content.as_ref());
                }
            }
            anyhow::Ok(final_text)
        };

        let final_text = tokio::time::timeout(self.turn_timeout, drain)
            .await
            .map_err(|_| {
                anyhow::anyhow!(
                    "Agent turn timed out after {}s",
                    self.turn_timeout.as_secs()
                )
            })??;

        Ok(final_text.trim().to_string())
    }
}

/// Concatenate an event's text parts: each trimmed, empties dropped,
/// newline-separated.
fn extract_text(content: Option<&Content>) -> String {
    let Some(content) = content else {
        return String::new();
    };

    content
        .parts
        .iter()
        .filter_map(|p| p.text.as_deref())
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashSet;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use futures::StreamExt;
    use uuid::Uuid;

    use crate::runtime::{EventStream, Part, RuntimeEvent};

    const AGENT: &str = "ai_news_agent";

    fn final_event(author: &str, text: &str) -> RuntimeEvent {
        RuntimeEvent {
            author: author.to_string(),
            final_response: true,
            content: Some(Content {
                role: "model".to_string(),
                parts: vec![Part::text(text)],
            }),
        }
    }

    fn partial_event(author: &str, text: &str) -> RuntimeEvent {
        RuntimeEvent {
            final_response: false,
            ..final_event(author, text)
        }
    }

    /// Mock runtime replaying a fixed event script, recording the sessions
    /// and prompts it was called with.
    struct ScriptedRuntime {
        events: Vec<RuntimeEvent>,
        error: Option<String>,
        seen_sessions: Mutex<Vec<Uuid>>,
        seen_prompts: Mutex<Vec<String>>,
    }

    impl ScriptedRuntime {
        fn new(events: Vec<RuntimeEvent>) -> Self {
            Self {
                events,
                error: None,
                seen_sessions: Mutex::new(Vec::new()),
                seen_prompts: Mutex::new(Vec::new()),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                error: Some(message.to_string()),
                ..Self::new(Vec::new())
            }
        }
    }

    #[async_trait]
    impl AgentRuntime for ScriptedRuntime {
        async fn run_turn(
            &self,
            session: &Session,
            message: Content,
        ) -> anyhow::Result<EventStream> {
            self.seen_sessions.lock().unwrap().push(session.id);
            self.seen_prompts
                .lock()
                .unwrap()
                .push(extract_text(Some(&message)));

            let mut items: Vec<anyhow::Result<RuntimeEvent>> =
                self.events.iter().cloned().map(Ok).collect();
            if let Some(message) = &self.error {
                items.push(Err(anyhow::anyhow!("{}", message)));
            }
            Ok(futures::stream::iter(items).boxed())
        }
    }

    /// Runtime whose stream never yields, for timeout coverage.
    struct StalledRuntime;

    #[async_trait]
    impl AgentRuntime for StalledRuntime {
        async fn run_turn(&self, _: &Session, _: Content) -> anyhow::Result<EventStream> {
            Ok(futures::stream::pending().boxed())
        }
    }

    fn executor(runtime: Arc<dyn AgentRuntime>) -> TurnExecutor {
        TurnExecutor::new(
            Arc::new(AgentConfig::news_agent("test-model")),
            runtime,
            Duration::from_secs(5),
        )
    }

    #[tokio::test]
    async fn returns_final_response_text() {
        let runtime = Arc::new(ScriptedRuntime::new(vec![final_event(AGENT, "the answer")]));
        let result = executor(runtime).run_turn("question").await.unwrap();
        assert_eq!(result, "the answer");
    }

    #[tokio::test]
    async fn last_final_event_wins() {
        let runtime = Arc::new(ScriptedRuntime::new(vec![
            final_event(AGENT, "first"),
            partial_event(AGENT, "interim"),
            final_event(AGENT, "second"),
        ]));
        let result = executor(runtime).run_turn("question").await.unwrap();
        assert_eq!(result, "second");
    }

    #[tokio::test]
    async fn ignores_non_final_and_foreign_events() {
        let runtime = Arc::new(ScriptedRuntime::new(vec![
            partial_event(AGENT, "thinking"),
            final_event("google_search", "raw results"),
        ]));
        let result = executor(runtime).run_turn("question").await.unwrap();
        assert_eq!(result, "");
    }

    #[tokio::test]
    async fn empty_stream_yields_empty_string() {
        let runtime = Arc::new(ScriptedRuntime::new(Vec::new()));
        let result = executor(runtime).run_turn("question").await.unwrap();
        assert_eq!(result, "");
    }

    #[tokio::test]
    async fn joins_parts_and_drops_blank_segments() {
        let event = RuntimeEvent {
            author: AGENT.to_string(),
            final_response: true,
            content: Some(Content {
                role: "model".to_string(),
                parts: vec![Part::text("  alpha  "), Part::text("   "), Part::text("beta")],
            }),
        };
        let runtime = Arc::new(ScriptedRuntime::new(vec![event]));
        let result = executor(runtime).run_turn("question").await.unwrap();
        assert_eq!(result, "alpha\nbeta");
    }

    #[tokio::test]
    async fn runtime_error_propagates_unmodified() {
        let runtime = Arc::new(ScriptedRuntime::failing("quota exceeded"));
        let err = executor(runtime).run_turn("question").await.unwrap_err();
        assert_eq!(err.to_string(), "quota exceeded");
    }

    #[tokio::test]
    async fn empty_prompt_is_forwarded() {
        let runtime = Arc::new(ScriptedRuntime::new(vec![final_event(AGENT, "reply")]));
        executor(runtime.clone()).run_turn("").await.unwrap();
        let prompts = runtime.seen_prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert_eq!(prompts[0], "");
    }

    #[tokio::test]
    async fn concurrent_turns_get_distinct_sessions() {
        let runtime = Arc::new(ScriptedRuntime::new(vec![final_event(AGENT, "ok")]));
        let executor = Arc::new(executor(runtime.clone()));

        let mut handles = Vec::new();
        for i in 0..8 {
            let executor = executor.clone();
            handles.push(tokio::spawn(async move {
                executor.run_turn(&format!("prompt {}", i)).await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let sessions = runtime.seen_sessions.lock().unwrap();
        let unique: HashSet<_> = sessions.iter().collect();
        assert_eq!(unique.len(), 8);
    }

    #[tokio::test]
    async fn stalled_turn_times_out() {
        let executor = TurnExecutor::new(
            Arc::new(AgentConfig::news_agent("test-model")),
            Arc::new(StalledRuntime),
            Duration::from_millis(20),
        );
        let err = executor.run_turn("question").await.unwrap_err();
        assert!(err.to_string().contains("timed out"), "got: {}", err);
    }
}
