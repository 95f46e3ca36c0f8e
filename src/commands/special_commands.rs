//! Special commands parser for interactive chat
//!
//! Input starting with `/` controls the session instead of being sent to
//! the agent. Commands are case-insensitive.

use crate::providers::ProviderKind;
use thiserror::Error;

/// Errors that can occur when parsing special commands
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Unknown command was entered
    #[error("Unknown command: {0}\n\nType '/help' to see available commands")]
    UnknownCommand(String),

    /// Command was given an unsupported argument
    #[error("Unsupported argument for {command}: {arg}\n\nType '/help' to see valid usage")]
    UnsupportedArgument { command: String, arg: String },

    /// Command requires an argument but none was provided
    #[error("Command {command} requires an argument\n\nUsage: {usage}")]
    MissingArgument { command: String, usage: String },
}

/// Session commands available during interactive chat
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecialCommand {
    /// Use a different provider for the following turns
    SwitchProvider(ProviderKind),

    /// Show the agent, provider and conversation length
    ShowStatus,

    /// Print the agent's project profile
    ShowInfo,

    /// Forget the conversation; the next message is a first turn again
    Reset,

    /// Display help information
    Help,

    /// Exit the interactive session
    Exit,

    /// Not a special command
    None,
}

/// Parse a user input line into a special command
///
/// # Errors
///
/// Returns `CommandError` if the input starts with `/` but is not a valid
/// command, or carries an invalid argument.
///
/// # Examples
///
/// ```
/// use agentswarm::commands::special_commands::{parse_special_command, SpecialCommand};
/// use agentswarm::providers::ProviderKind;
///
/// assert_eq!(
///     parse_special_command("/provider openai").unwrap(),
///     SpecialCommand::SwitchProvider(ProviderKind::OpenAi)
/// );
/// assert_eq!(parse_special_command("hello").unwrap(), SpecialCommand::None);
/// ```
pub fn parse_special_command(input: &str) -> Result<SpecialCommand, CommandError> {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return Ok(SpecialCommand::None);
    }

    let mut parts = trimmed.split_whitespace();
    let command = parts.next().unwrap_or("").to_lowercase();
    let arg = parts.next();

    match command.as_str() {
        "/provider" | "/model" => {
            let arg = arg.ok_or_else(|| CommandError::MissingArgument {
                command: command.clone(),
                usage: "/provider <gemini|openai>".to_string(),
            })?;
            arg.to_lowercase()
                .parse::<ProviderKind>()
                .map(SpecialCommand::SwitchProvider)
                .map_err(|_| CommandError::UnsupportedArgument {
                    command: command.clone(),
                    arg: arg.to_string(),
                })
        }
        "/gemini" => Ok(SpecialCommand::SwitchProvider(ProviderKind::Gemini)),
        "/openai" => Ok(SpecialCommand::SwitchProvider(ProviderKind::OpenAi)),
        "/status" => Ok(SpecialCommand::ShowStatus),
        "/info" => Ok(SpecialCommand::ShowInfo),
        "/reset" | "/clear" => Ok(SpecialCommand::Reset),
        "/help" | "/?" => Ok(SpecialCommand::Help),
        "/exit" | "/quit" | "/q" => Ok(SpecialCommand::Exit),
        _ => Err(CommandError::UnknownCommand(trimmed.to_string())),
    }
}

/// Print the special command reference
pub fn print_help() {
    println!(
        r#"
Special Commands for Interactive Chat
=====================================

PROVIDER:
  /provider <name>  - Use gemini or openai for the next turns
  /gemini           - Shorthand for /provider gemini
  /openai           - Shorthand for /provider openai

SESSION:
  /status           - Show agent, provider and conversation length
  /info             - Print the agent's project profile
  /reset            - Start a new conversation (alias: /clear)
  /help             - Show this help (alias: /?)
  /exit             - Leave the chat (aliases: /quit, /q)

Anything else is sent to the agent. Ctrl-C or Ctrl-D also exits.
"#
    );
}
