//! OpenAI provider implementation
//!
//! Implements the Provider trait against the chat completions endpoint.
//! The persona goes in a system message and the conversation history plus
//! latest user message go in a single human message.

use crate::config::OpenAiConfig;
use crate::error::{ProviderError, ProviderResult, Result, SwarmError};
use crate::providers::base::classify_status;
use crate::providers::{GenerationRequest, Provider, ProviderKind};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// OpenAI chat completions provider
pub struct OpenAiProvider {
    client: Client,
    config: OpenAiConfig,
}

#[derive(Debug, Serialize)]
struct OpenAiRequest {
    model: String,
    messages: Vec<OpenAiMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize, Deserialize)]
struct OpenAiMessage {
    role: String,
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiResponse {
    #[serde(default)]
    choices: Vec<OpenAiChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAiChoice {
    message: OpenAiMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

impl OpenAiProvider {
    /// Create a new OpenAI provider instance
    ///
    /// # Arguments
    ///
    /// * `config` - OpenAI configuration, including the optional API key
    /// * `timeout_seconds` - HTTP timeout for each call
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails
    ///
    /// # Examples
    ///
    /// ```
    /// use agentswarm::config::OpenAiConfig;
    /// use agentswarm::providers::{OpenAiProvider, Provider};
    ///
    /// let provider = OpenAiProvider::new(OpenAiConfig::default(), 30).unwrap();
    /// assert!(!provider.is_configured());
    /// ```
    pub fn new(config: OpenAiConfig, timeout_seconds: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .user_agent(concat!("agentswarm/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SwarmError::Provider(format!("Failed to create HTTP client: {}", e)))?;

        tracing::info!(
            "Initialized OpenAI provider: model={}, configured={}",
            config.model,
            config.api_key.is_some()
        );

        Ok(Self { client, config })
    }

    /// Get the configured model name
    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.api_base.trim_end_matches('/')
        )
    }

    fn build_request(&self, request: &GenerationRequest) -> OpenAiRequest {
        OpenAiRequest {
            model: self.config.model.clone(),
            messages: vec![
                OpenAiMessage {
                    role: "system".to_string(),
                    content: Some(request.system_prompt.clone()),
                },
                OpenAiMessage {
                    role: "user".to_string(),
                    content: Some(request.human_turn()),
                },
            ],
            temperature: self.config.temperature,
        }
    }

    fn extract_text(response: OpenAiResponse) -> ProviderResult<String> {
        let provider = ProviderKind::OpenAi;
        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or(ProviderError::EmptyResponse { provider })?;

        match choice.message.content {
            Some(text) if !text.trim().is_empty() => Ok(text),
            _ if choice.finish_reason.as_deref() == Some("content_filter") => {
                Err(ProviderError::Blocked {
                    provider,
                    reason: "content_filter".to_string(),
                })
            }
            _ => Err(ProviderError::EmptyResponse { provider }),
        }
    }
}

#[async_trait]
impl Provider for OpenAiProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::OpenAi
    }

    fn is_configured(&self) -> bool {
        self.config.api_key.is_some()
    }

    async fn generate(&self, request: &GenerationRequest) -> ProviderResult<String> {
        let provider = ProviderKind::OpenAi;
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(ProviderError::MissingCredentials(provider))?;

        let body = self.build_request(request);
        tracing::debug!(
            "Sending OpenAI request: model={}, {} messages",
            body.model,
            body.messages.len()
        );

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("OpenAI request failed: {}", e);
                ProviderError::Request {
                    provider,
                    message: e.to_string(),
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("OpenAI returned error {}: {}", status, error_text);
            return Err(classify_status(provider, status.as_u16(), error_text));
        }

        let openai_response: OpenAiResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse OpenAI response: {}", e);
            ProviderError::Decode {
                provider,
                message: e.to_string(),
            }
        })?;

        Self::extract_text(openai_response)
    }
}
