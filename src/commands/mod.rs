/*!
Command handlers for the CLI

This module provides command handlers invoked by the CLI entrypoint.

- `serve`  - Run the HTTP agent router
- `agents` - Print the agent catalog
- `chat`   - Talk to one agent from the terminal
*/

use crate::agent::Message;
use crate::config::Config;
use crate::error::{Result, SwarmError};
use crate::providers::ProviderKind;
use crate::server::AppState;

// Special commands parser for the chat loop
pub mod special_commands;

// Catalog listing
pub mod agents;

// HTTP router command handler
pub mod serve {
    use super::*;

    /// Serve every enabled agent until interrupted
    ///
    /// # Errors
    ///
    /// Returns error if the router cannot be built or bound
    pub async fn run_serve(config: Config) -> Result<()> {
        crate::server::start_server(&config).await
    }
}

// Chat command handler
pub mod chat {
    //! Interactive chat with a single agent.
    //!
    //! The conversation lives here, client-side, and is sent in full on
    //! every turn exactly as an HTTP client would send it.

    use super::*;
    use crate::commands::special_commands::{parse_special_command, print_help, SpecialCommand};
    use colored::Colorize;
    use rustyline::error::ReadlineError;
    use rustyline::DefaultEditor;

    /// Start interactive chat mode
    ///
    /// # Arguments
    ///
    /// * `config` - Global configuration
    /// * `slug` - Agent to talk to
    /// * `provider` - Initial provider selection (`gemini` or `openai`)
    ///
    /// # Errors
    ///
    /// Returns error if the provider selection is invalid, the agent does
    /// not exist, or the terminal cannot be opened
    pub async fn run_chat(config: Config, slug: String, provider: String) -> Result<()> {
        let mut kind: ProviderKind = provider.parse()?;
        let state = AppState::from_config(&config)?;
        let agent = state
            .agents
            .get(&slug)
            .cloned()
            .ok_or_else(|| SwarmError::AgentNotFound(slug.clone()))?;

        let mut rl = DefaultEditor::new()?;
        let mut messages: Vec<Message> = Vec::new();

        println!(
            "\nChatting with {} via {}. Type {} for commands.\n",
            agent.name().bold(),
            kind.to_string().cyan(),
            "/help".cyan()
        );

        loop {
            let prompt = format!("{}> ", agent.slug()).green().to_string();
            match rl.readline(&prompt) {
                Ok(line) => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }
                    let _ = rl.add_history_entry(trimmed);

                    match parse_special_command(trimmed) {
                        Ok(SpecialCommand::None) => {}
                        Ok(SpecialCommand::SwitchProvider(next)) => {
                            kind = next;
                            println!("Using {}\n", kind.to_string().cyan());
                            continue;
                        }
                        Ok(SpecialCommand::ShowStatus) => {
                            println!(
                                "Agent: {}  Provider: {}  Messages: {}\n",
                                agent.name(),
                                kind,
                                messages.len()
                            );
                            continue;
                        }
                        Ok(SpecialCommand::ShowInfo) => {
                            println!("{}\n", serde_json::to_string_pretty(agent.profile())?);
                            continue;
                        }
                        Ok(SpecialCommand::Reset) => {
                            messages.clear();
                            println!("{}\n", "Conversation reset.".yellow());
                            continue;
                        }
                        Ok(SpecialCommand::Help) => {
                            print_help();
                            continue;
                        }
                        Ok(SpecialCommand::Exit) => break,
                        Err(e) => {
                            eprintln!("{}\n", e.to_string().red());
                            continue;
                        }
                    }

                    messages.push(Message::user(trimmed));
                    let reply = agent.converse_with(&messages, kind).await;
                    println!("\n{}\n", reply.response);
                    messages.push(Message::assistant(reply.response));
                }
                Err(ReadlineError::Interrupted) => {
                    println!("CTRL-C");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    println!("CTRL-D");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {:?}", err);
                    break;
                }
            }
        }

        println!("Goodbye!");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_run_chat_rejects_invalid_provider() {
        let err = chat::run_chat(Config::default(), "wooly".to_string(), "claude".to_string())
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SwarmError>(),
            Some(SwarmError::InvalidArgument(_))
        ));
    }

    #[tokio::test]
    async fn test_run_chat_rejects_unknown_agent() {
        let err = chat::run_chat(Config::default(), "worldie".to_string(), "gemini".to_string())
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SwarmError>(),
            Some(SwarmError::AgentNotFound(_))
        ));
    }
}
