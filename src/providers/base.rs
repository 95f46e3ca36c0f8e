//! Base provider trait and the provider-neutral request shape
//!
//! This module defines the Provider trait that both generative-text
//! backends implement, along with the request type the response generator
//! hands to them and the status classification shared by their HTTP clients.

use crate::error::{ProviderError, ProviderResult};
use crate::providers::ProviderKind;
use async_trait::async_trait;

/// Provider-neutral description of one generation call
///
/// The response generator assembles this once per turn. Each provider renders
/// it into its own wire shape: a single text prompt for Gemini, a
/// system + human message pair for OpenAI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// Display name of the agent the provider should speak as
    pub agent_name: String,
    /// Persona prompt with response guidelines already appended
    pub system_prompt: String,
    /// Flattened conversation, one `Role: content` line per message
    pub transcript: String,
    /// Content of the most recent user message, or empty
    pub latest_user_message: String,
}

impl GenerationRequest {
    /// Renders the human-side turn: history, latest message, and the
    /// instruction to answer in the agent's voice
    ///
    /// # Examples
    ///
    /// ```
    /// use agentswarm::providers::GenerationRequest;
    ///
    /// let request = GenerationRequest {
    ///     agent_name: "Wooly".to_string(),
    ///     system_prompt: "You are Wooly.".to_string(),
    ///     transcript: "User: hi".to_string(),
    ///     latest_user_message: "hi".to_string(),
    /// };
    /// let turn = request.human_turn();
    /// assert!(turn.starts_with("Conversation history:\nUser: hi"));
    /// assert!(turn.ends_with("Respond as the Wooly agent:"));
    /// ```
    pub fn human_turn(&self) -> String {
        format!(
            "Conversation history:\n{}\n\nUser's latest message: {}\n\nRespond as the {} agent:",
            self.transcript, self.latest_user_message, self.agent_name
        )
    }

    /// Renders the whole request as one prompt, persona first
    pub fn single_prompt(&self) -> String {
        format!("{}\n\n{}", self.system_prompt, self.human_turn())
    }
}

/// Provider trait for generative-text backends
///
/// A call either yields text or a [`ProviderError`] describing why it did
/// not. Implementations must not retry internally; fallback between
/// providers is the response generator's job.
///
/// # Examples
///
/// ```no_run
/// use agentswarm::error::ProviderResult;
/// use agentswarm::providers::{GenerationRequest, Provider, ProviderKind};
/// use async_trait::async_trait;
///
/// struct EchoProvider;
///
/// #[async_trait]
/// impl Provider for EchoProvider {
///     fn kind(&self) -> ProviderKind {
///         ProviderKind::Gemini
///     }
///
///     fn is_configured(&self) -> bool {
///         true
///     }
///
///     async fn generate(&self, request: &GenerationRequest) -> ProviderResult<String> {
///         Ok(request.latest_user_message.clone())
///     }
/// }
/// ```
#[async_trait]
pub trait Provider: Send + Sync {
    /// Which provider slot this implementation fills
    fn kind(&self) -> ProviderKind;

    /// Whether a credential is available; unconfigured providers are never called
    fn is_configured(&self) -> bool;

    /// Generates text for the request
    ///
    /// # Errors
    ///
    /// Returns a [`ProviderError`] for missing credentials, transport
    /// failures, non-success statuses, blocked prompts, and undecodable
    /// bodies. An empty body may be reported either as
    /// [`ProviderError::EmptyResponse`] or as `Ok("")`; callers treat both
    /// as failures.
    async fn generate(&self, request: &GenerationRequest) -> ProviderResult<String>;
}

/// Maps a non-success HTTP status to a provider failure
pub(crate) fn classify_status(provider: ProviderKind, status: u16, body: String) -> ProviderError {
    match status {
        401 | 403 => ProviderError::Authentication { provider, status },
        429 => ProviderError::RateLimited { provider },
        _ => ProviderError::Status {
            provider,
            status,
            body,
        },
    }
}
