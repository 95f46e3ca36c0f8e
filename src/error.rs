//! Error types for the agent swarm
//!
//! This module defines the application error type and the per-call provider
//! failure type, using `thiserror` for ergonomic error handling.

use crate::providers::ProviderKind;
use thiserror::Error;

/// Main error type for agent swarm operations
///
/// Only `InvalidArgument` and `AgentNotFound` are expected to reach an HTTP
/// caller. Provider failures are recovered inside the response generator and
/// never surface through this type during a chat turn.
#[derive(Error, Debug)]
pub enum SwarmError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Caller supplied a value outside the accepted set
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// No agent is registered under the requested slug
    #[error("Agent not found: {0}")]
    AgentNotFound(String),

    /// Agent catalog could not be loaded or failed validation
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// Provider-related errors outside a chat turn (client construction, etc.)
    #[error("Provider error: {0}")]
    Provider(String),

    /// GitHub REST errors
    #[error("GitHub error: {0}")]
    Github(String),

    /// Server startup or binding errors
    #[error("Server error: {0}")]
    Server(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Failure of a single provider call
///
/// Returned by [`crate::providers::Provider::generate`]. The response
/// generator branches on this value to decide whether to fall back.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// The provider has no API key configured
    #[error("Missing credentials for provider: {0}")]
    MissingCredentials(ProviderKind),

    /// The request never produced an HTTP response (connect, timeout, TLS)
    #[error("Request to {provider} failed: {message}")]
    Request {
        /// Provider that was called
        provider: ProviderKind,
        /// Transport error description
        message: String,
    },

    /// The provider rejected the credentials
    #[error("Authentication with {provider} failed (status {status})")]
    Authentication {
        /// Provider that was called
        provider: ProviderKind,
        /// HTTP status code returned
        status: u16,
    },

    /// The provider throttled the request
    #[error("Rate limited by {provider}")]
    RateLimited {
        /// Provider that was called
        provider: ProviderKind,
    },

    /// Any other non-success status
    #[error("{provider} returned error {status}: {body}")]
    Status {
        /// Provider that was called
        provider: ProviderKind,
        /// HTTP status code returned
        status: u16,
        /// Response body, as text
        body: String,
    },

    /// The provider refused to generate content for the prompt
    #[error("{provider} blocked the prompt: {reason}")]
    Blocked {
        /// Provider that was called
        provider: ProviderKind,
        /// Reason reported by the provider
        reason: String,
    },

    /// The provider answered with no usable text
    #[error("{provider} returned an empty response")]
    EmptyResponse {
        /// Provider that was called
        provider: ProviderKind,
    },

    /// The response body did not match the expected shape
    #[error("Failed to parse {provider} response: {message}")]
    Decode {
        /// Provider that was called
        provider: ProviderKind,
        /// Decoder error description
        message: String,
    },
}

impl ProviderError {
    /// Provider the failure originated from
    pub fn provider(&self) -> ProviderKind {
        match self {
            Self::MissingCredentials(provider) => *provider,
            Self::Request { provider, .. }
            | Self::Authentication { provider, .. }
            | Self::RateLimited { provider }
            | Self::Status { provider, .. }
            | Self::Blocked { provider, .. }
            | Self::EmptyResponse { provider }
            | Self::Decode { provider, .. } => *provider,
        }
    }
}

/// Result type alias for agent swarm operations
///
/// This is a convenience alias that uses `anyhow::Error` as the error type,
/// allowing for rich error context and easy error propagation.
pub type Result<T> = anyhow::Result<T>;

/// Result of a single provider call
pub type ProviderResult<T> = std::result::Result<T, ProviderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let error = SwarmError::Config("invalid format".to_string());
        assert_eq!(error.to_string(), "Configuration error: invalid format");
    }

    #[test]
    fn test_invalid_argument_display() {
        let error = SwarmError::InvalidArgument("model_type 'foo'".to_string());
        assert_eq!(error.to_string(), "Invalid argument: model_type 'foo'");
    }

    #[test]
    fn test_agent_not_found_display() {
        let error = SwarmError::AgentNotFound("ghost".to_string());
        assert_eq!(error.to_string(), "Agent not found: ghost");
    }

    #[test]
    fn test_missing_credentials_display() {
        let error = ProviderError::MissingCredentials(ProviderKind::OpenAi);
        assert_eq!(error.to_string(), "Missing credentials for provider: openai");
    }

    #[test]
    fn test_status_error_display() {
        let error = ProviderError::Status {
            provider: ProviderKind::Gemini,
            status: 500,
            body: "boom".to_string(),
        };
        assert_eq!(error.to_string(), "gemini returned error 500: boom");
    }

    #[test]
    fn test_provider_error_reports_origin() {
        let error = ProviderError::EmptyResponse {
            provider: ProviderKind::Gemini,
        };
        assert_eq!(error.provider(), ProviderKind::Gemini);

        let error = ProviderError::RateLimited {
            provider: ProviderKind::OpenAi,
        };
        assert_eq!(error.provider(), ProviderKind::OpenAi);
    }

    #[test]
    fn test_yaml_error_conversion() {
        let yaml_error = serde_yaml::from_str::<serde_yaml::Value>("invalid: : yaml").unwrap_err();
        let error: SwarmError = yaml_error.into();
        assert!(matches!(error, SwarmError::Yaml(_)));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SwarmError>();
        assert_send_sync::<ProviderError>();
    }

    #[test]
    fn test_invalid_argument_survives_anyhow() {
        let error: anyhow::Error = SwarmError::InvalidArgument("x".to_string()).into();
        assert!(matches!(
            error.downcast_ref::<SwarmError>(),
            Some(SwarmError::InvalidArgument(_))
        ));
    }
}
