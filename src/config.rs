//! Configuration management for the AI News Agent.
//!
//! Configuration can be set via environment variables:
//! - `GEMINI_API_KEY` - Optional at startup. Credential for the hosted agent
//!   runtime. Its absence is logged as a warning; agent calls fail until set.
//! - `AGENT_MODEL` - Optional. The model to use. Defaults to `gemini-2.5-flash`.
//! - `HOST` - Optional. Server host. Defaults to `127.0.0.1`.
//! - `PORT` - Optional. Server port. Defaults to `8000`.
//! - `TURN_TIMEOUT_SECS` - Optional. Timeout for one agent turn. Defaults to `120`.

use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Agent backend configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Credential for the hosted agent runtime. Checked lazily at first
    /// invocation, not at startup.
    pub api_key: Option<String>,

    /// Model identifier passed to the runtime
    pub model: String,

    /// Server host
    pub host: String,

    /// Server port
    pub port: u16,

    /// Upper bound on one agent turn, including runtime tool calls
    pub turn_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` when `PORT` or `TURN_TIMEOUT_SECS`
    /// fail to parse. A missing `GEMINI_API_KEY` is not an error here; it
    /// surfaces on the first agent call instead.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = std::env::var("GEMINI_API_KEY").ok().filter(|k| !k.is_empty());

        let model = std::env::var("AGENT_MODEL")
            .unwrap_or_else(|_| "gemini-2.5-flash".to_string());

        let host = std::env::var("HOST")
            .unwrap_or_else(|_| "127.0.0.1".to_string());

        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "8000".to_string())
            .parse()
            .map_err(|e| ConfigError::InvalidValue("PORT".to_string(), format!("{}", e)))?;

        let turn_timeout_secs: u64 = std::env::var("TURN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "120".to_string())
            .parse()
            .map_err(|e| {
                ConfigError::InvalidValue("TURN_TIMEOUT_SECS".to_string(), format!("{}", e))
            })?;

        Ok(Self {
            api_key,
            model,
            host,
            port,
            turn_timeout: Duration::from_secs(turn_timeout_secs),
        })
    }

    /// Create a config with custom values (useful for testing).
    pub fn new(api_key: Option<String>, model: String) -> Self {
        Self {
            api_key,
            model,
            host: "127.0.0.1".to_string(),
            port: 8000,
            turn_timeout: Duration::from_secs(120),
        }
    }
}
