//! HTTP facade over the turn executor.
//!
//! Stateless between requests: every chat or news call runs one agent turn
//! and maps the result (or the error) straight into a JSON response.

pub mod routes;
pub mod types;

pub use routes::{serve, AppState};
