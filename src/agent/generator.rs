//! Response generation with provider fallback
//!
//! The generator owns one primary and one secondary provider. A request for
//! the primary that fails in any way is retried once against the secondary
//! when the secondary has credentials. Failures are logged and never leave
//! this module: the caller always gets text back.

use crate::config::ProviderConfig;
use crate::error::{ProviderError, ProviderResult, Result};
use crate::providers::{create_providers, GenerationRequest, Provider, ProviderKind};
use std::sync::Arc;

/// Reply returned when no provider produced text
pub const FALLBACK_REPLY: &str =
    "I'm sorry, I'm having trouble connecting to my AI services right now. Please try again later.";

/// Turns generation requests into text, falling back between providers
pub struct ResponseGenerator {
    primary: Arc<dyn Provider>,
    secondary: Arc<dyn Provider>,
}

impl ResponseGenerator {
    /// Creates a generator from an explicit provider pair
    pub fn new(primary: Arc<dyn Provider>, secondary: Arc<dyn Provider>) -> Self {
        Self { primary, secondary }
    }

    /// Creates a generator with the configured Gemini and OpenAI providers
    ///
    /// # Errors
    ///
    /// Returns error if either HTTP client cannot be built
    pub fn from_config(config: &ProviderConfig) -> Result<Self> {
        let (primary, secondary) = create_providers(config)?;
        Ok(Self::new(primary, secondary))
    }

    /// Whether any provider has credentials
    pub fn has_credentials(&self) -> bool {
        self.primary.is_configured() || self.secondary.is_configured()
    }

    fn provider_for(&self, kind: ProviderKind) -> &Arc<dyn Provider> {
        if kind.is_primary() {
            &self.primary
        } else {
            &self.secondary
        }
    }

    /// Generates a reply with the requested provider
    ///
    /// Makes at most two outbound calls. Returns [`FALLBACK_REPLY`] when
    /// neither the requested provider nor its fallback produced text.
    pub async fn generate(&self, request: &GenerationRequest, kind: ProviderKind) -> String {
        let requested = self.provider_for(kind);

        match attempt(requested.as_ref(), request).await {
            Ok(text) => return text,
            Err(err) => tracing::warn!("{} provider failed: {}", kind, err),
        }

        if kind.fallback().is_some() {
            if self.secondary.is_configured() {
                tracing::info!(
                    "Falling back from {} to {} for agent {}",
                    kind,
                    self.secondary.kind(),
                    request.agent_name
                );
                match attempt(self.secondary.as_ref(), request).await {
                    Ok(text) => return text,
                    Err(err) => {
                        tracing::warn!("{} fallback failed: {}", self.secondary.kind(), err)
                    }
                }
            } else {
                tracing::debug!("No fallback available: {} has no credentials", self.secondary.kind());
            }
        }

        tracing::warn!(
            "No provider produced a reply for agent {}, returning apology",
            request.agent_name
        );
        FALLBACK_REPLY.to_string()
    }
}

/// One provider call; unconfigured providers and blank text count as failures
async fn attempt(provider: &dyn Provider, request: &GenerationRequest) -> ProviderResult<String> {
    if !provider.is_configured() {
        return Err(ProviderError::MissingCredentials(provider.kind()));
    }

    let text = provider.generate(request).await?;
    if text.trim().is_empty() {
        return Err(ProviderError::EmptyResponse {
            provider: provider.kind(),
        });
    }

    Ok(text)
}
