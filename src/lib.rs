//! agentswarm - chat agents for hackathon projects
//!
//! This library provides one LLM-backed chat agent per project, a response
//! generator that falls back from Gemini to OpenAI, and an HTTP router that
//! mounts every agent under `/agents/<slug>`.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `agent`: Chat transport types, prompts, response generation and the agent itself
//! - `providers`: Provider trait and the Gemini and OpenAI clients
//! - `catalog`: Agent definitions (persona + project profile)
//! - `github`: Repository activity used by prompts and `/github/*`
//! - `server`: axum router and handlers
//! - `config`: Configuration management and validation
//! - `error`: Error types and result aliases
//! - `cli`: Command-line interface definition
//!
//! # Example
//!
//! ```no_run
//! use agentswarm::agent::Message;
//! use agentswarm::server::AppState;
//! use agentswarm::Config;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::default();
//!     config.validate()?;
//!
//!     let state = AppState::from_config(&config)?;
//!     let wooly = state.agents.get("wooly").expect("built-in agent");
//!     let reply = wooly.converse(&[Message::user("hello")], "gemini").await?;
//!     println!("{}", reply.response);
//!     Ok(())
//! }
//! ```

pub mod agent;
pub mod catalog;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod github;
pub mod providers;
pub mod server;

// Re-export commonly used types
pub use agent::Agent;
pub use config::Config;
pub use error::{Result, SwarmError};

#[cfg(test)]
pub mod test_utils;
