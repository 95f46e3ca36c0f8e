//! Command-line interface definition for the agent swarm
//!
//! This module defines the CLI structure using clap's derive API,
//! providing commands for serving the agent router, listing the catalog,
//! and chatting with a single agent from the terminal.

use clap::{Parser, Subcommand};

/// Agent swarm - chat agents for hackathon projects
///
/// Serves one LLM-backed agent per project under a shared router.
#[derive(Parser, Debug, Clone)]
#[command(name = "agentswarm")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, env = "AGENTSWARM_CONFIG")]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Serve every enabled agent over HTTP
    Serve {
        /// Override the bind address from config
        #[arg(long)]
        host: Option<String>,

        /// Override the port from config
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// List the agents in the catalog
    Agents {
        /// Print the directory as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Chat with one agent in the terminal
    Chat {
        /// Agent slug (see `agentswarm agents`)
        #[arg(short, long)]
        agent: String,

        /// Provider to request (gemini, openai)
        #[arg(short, long, default_value = "gemini")]
        provider: String,
    },
}

impl Cli {
    /// Parse command line arguments
    ///
    /// # Returns
    ///
    /// Returns the parsed CLI structure
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
