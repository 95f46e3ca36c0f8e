//! agentswarm - chat agents for hackathon projects
//!
//! Main entry point for the agent swarm binary.

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use agentswarm::cli::{Cli, Commands};
use agentswarm::commands;
use agentswarm::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    // Initialize tracing
    init_tracing(cli.verbose, cli.json_logs);

    // Load configuration
    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path, &cli)?;

    // Validate configuration
    config.validate()?;

    // Execute command
    match cli.command {
        Commands::Serve { .. } => {
            tracing::info!("Starting agent router");
            commands::serve::run_serve(config).await?;
            Ok(())
        }
        Commands::Agents { json } => {
            commands::agents::list_agents(&config, json)?;
            Ok(())
        }
        Commands::Chat { agent, provider } => {
            tracing::info!("Starting interactive chat with {}", agent);
            commands::chat::run_chat(config, agent, provider).await?;
            Ok(())
        }
    }
}

fn init_tracing(verbose: bool, json: bool) {
    let default_level = if verbose {
        "agentswarm=debug"
    } else {
        "agentswarm=info"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let registry = tracing_subscriber::registry().with(env_filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
