//! Agent module - the agent definition and the per-request turn executor.
//!
//! Each call runs exactly one turn:
//! 1. Create a fresh ephemeral session with the runtime
//! 2. Submit the prompt as a single user message
//! 3. Drain the runtime's event stream in arrival order
//! 4. Keep the text of the last final-response event authored by the agent

mod definition;
mod executor;

pub use definition::AgentConfig;
pub use executor::TurnExecutor;
