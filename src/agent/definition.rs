//! Static agent definition.

/// Immutable agent configuration, constructed once at startup and shared
/// read-only by every request. Construction cannot fail; a missing runtime
/// credential surfaces lazily at first invocation instead.
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// Agent name, also the author tag on its runtime events
    pub name: String,
    /// Model identifier passed to the runtime
    pub model: String,
    /// Instruction prompt
    pub instruction: String,
    /// Capabilities the hosted runtime may invoke autonomously
    pub tools: Vec<String>,
}

impl AgentConfig {
    /// The AI news agent: answers news queries using hosted web search.
    pub fn news_agent(model: &str) -> Self {
        Self {
            name: "ai_news_agent".to_string(),
            model: model.to_string(),
            instruction: "You are an AI news assistant. Your primary role is to provide accurate, \
up-to-date information about artificial intelligence developments, news, and trends.\n\n\
When asked about AI news or developments:\n\
1. Use the google_search tool to find the most recent and relevant information\n\
2. Provide concise but informative responses\n\
3. Include sources or references when appropriate\n\
4. If the information might be outdated, acknowledge this limitation\n\n\
Always maintain a helpful, informative tone and focus on delivering factual information."
                .to_string(),
            tools: vec!["google_search".to_string()],
        }
    }
}
