//! Chat transport types
//!
//! A conversation is the ordered list of messages a client has exchanged
//! with an agent so far. It is sent in full on every turn; nothing is kept
//! server-side between turns.

use crate::agent::profile::ProjectProfile;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Author of a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The human talking to the agent
    User,
    /// A previous agent reply
    Assistant,
}

impl Role {
    /// Label used when the conversation is flattened into a transcript
    pub fn label(&self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Assistant => "Assistant",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single role-tagged message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Author of the message
    pub role: Role,
    /// Message text
    pub content: String,
}

impl Message {
    /// Creates a new user message
    ///
    /// # Examples
    ///
    /// ```
    /// use agentswarm::agent::{Message, Role};
    ///
    /// let msg = Message::user("hello");
    /// assert_eq!(msg.role, Role::User);
    /// ```
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Creates a new assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Body of a chat request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Full conversation so far, oldest first
    #[serde(default)]
    pub messages: Vec<Message>,
}

/// Body of a chat response
///
/// `project_info` is present only on the first turn of a conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Generated text, or the apology sentence when no provider answered
    pub response: String,
    /// The agent's project profile, first turn only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_info: Option<ProjectProfile>,
}

/// Flattens a conversation into `Role: content` lines, oldest first
///
/// # Examples
///
/// ```
/// use agentswarm::agent::{transcript, Message};
///
/// let messages = vec![Message::user("hi"), Message::assistant("hello")];
/// assert_eq!(transcript(&messages), "User: hi\nAssistant: hello");
/// ```
pub fn transcript(messages: &[Message]) -> String {
    messages
        .iter()
        .map(|m| format!("{}: {}", m.role.label(), m.content))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Returns the content of the most recent user message, or `""` if none
pub fn latest_user_message(messages: &[Message]) -> &str {
    messages
        .iter()
        .rev()
        .find(|m| m.role == Role::User)
        .map(|m| m.content.as_str())
        .unwrap_or("")
}

/// Whether this turn opens the conversation
///
/// Zero or one message counts as the first turn.
pub fn is_first_turn(messages: &[Message]) -> bool {
    messages.len() <= 1
}
