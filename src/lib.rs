//! # AI News Agent
//!
//! A chat agent backend for AI news queries.
//!
//! This library provides:
//! - An agent definition (model, instructions, web-search capability)
//! - A turn executor that runs one agent turn per HTTP request against a
//!   hosted language-model runtime
//! - An HTTP API for chat and news queries, plus a browser dashboard
//! - A best-effort parser that turns free-text replies into news items
//!
//! ## Architecture
//!
//! Each HTTP request maps to exactly one agent turn:
//! 1. Receive a chat message or news query via the API
//! 2. Create a fresh ephemeral session with the runtime
//! 3. Submit the prompt, drain the runtime's event stream
//! 4. Return the final response text (chat) or parse it into items (news)
//!
//! No conversation state survives a request; chat history lives only in the
//! client.
//!
//! ## Example
//!
//! ```rust,ignore
//! use ai_news_agent::{config::Config, api};
//!
//! let config = Config::from_env()?;
//! api::serve(config).await?;
//! ```

pub mod agent;
pub mod api;
pub mod config;
pub mod news;
pub mod runtime;

pub use config::Config;
