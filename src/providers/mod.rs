//! Provider module for the agent swarm
//!
//! This module contains the provider abstraction, the two implementations
//! (Gemini as primary, OpenAI as secondary), and the selection type callers
//! use to pick one per request.

pub mod base;
pub mod gemini;
pub mod openai;

pub use base::{GenerationRequest, Provider};
pub use gemini::GeminiProvider;
pub use openai::OpenAiProvider;

use crate::config::ProviderConfig;
use crate::error::{Result, SwarmError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Provider selection for a single chat turn
///
/// Gemini is the primary provider and OpenAI the secondary. Only a failed
/// primary call falls back to the secondary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Google Gemini, single-prompt generation
    Gemini,
    /// OpenAI chat completions, system + human messages
    #[serde(rename = "openai")]
    OpenAi,
}

impl ProviderKind {
    /// Accepted selection values, in the order they are documented
    pub const VALUES: [&'static str; 2] = ["gemini", "openai"];

    /// Returns the selection string for this provider
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gemini => "gemini",
            Self::OpenAi => "openai",
        }
    }

    /// Whether this is the primary provider
    pub fn is_primary(&self) -> bool {
        matches!(self, Self::Gemini)
    }

    /// Provider to try when a call to this one fails
    ///
    /// # Examples
    ///
    /// ```
    /// use agentswarm::providers::ProviderKind;
    ///
    /// assert_eq!(ProviderKind::Gemini.fallback(), Some(ProviderKind::OpenAi));
    /// assert_eq!(ProviderKind::OpenAi.fallback(), None);
    /// ```
    pub fn fallback(&self) -> Option<ProviderKind> {
        match self {
            Self::Gemini => Some(Self::OpenAi),
            Self::OpenAi => None,
        }
    }
}

impl Default for ProviderKind {
    fn default() -> Self {
        Self::Gemini
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = SwarmError;

    /// Parses a selection value
    ///
    /// # Errors
    ///
    /// Returns `SwarmError::InvalidArgument` for anything other than
    /// `gemini` or `openai`.
    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value {
            "gemini" => Ok(Self::Gemini),
            "openai" => Ok(Self::OpenAi),
            other => Err(SwarmError::InvalidArgument(format!(
                "Invalid model type '{}'. Use one of: {}",
                other,
                Self::VALUES.join(", ")
            ))),
        }
    }
}

/// Create both provider clients from configuration
///
/// # Arguments
///
/// * `config` - Provider configuration including credentials and timeouts
///
/// # Returns
///
/// Returns the primary and secondary providers, in that order
///
/// # Errors
///
/// Returns error if an HTTP client cannot be built
///
/// # Examples
///
/// ```
/// use agentswarm::config::ProviderConfig;
/// use agentswarm::providers::create_providers;
///
/// let (primary, secondary) = create_providers(&ProviderConfig::default()).unwrap();
/// assert!(primary.kind().is_primary());
/// assert!(!secondary.kind().is_primary());
/// ```
pub fn create_providers(config: &ProviderConfig) -> Result<(Arc<dyn Provider>, Arc<dyn Provider>)> {
    let primary = GeminiProvider::new(config.gemini.clone(), config.timeout_seconds)?;
    let secondary = OpenAiProvider::new(config.openai.clone(), config.timeout_seconds)?;
    Ok((Arc::new(primary), Arc::new(secondary)))
}
