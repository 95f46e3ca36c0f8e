//! Gemini provider implementation
//!
//! This module implements the Provider trait for Google's Gemini
//! `generateContent` endpoint. The whole request is sent as a single text
//! prompt together with sampling parameters and per-category safety
//! thresholds.

use crate::config::GeminiConfig;
use crate::error::{ProviderError, ProviderResult, Result, SwarmError};
use crate::providers::base::classify_status;
use crate::providers::{GenerationRequest, Provider, ProviderKind};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Harm categories every request carries a threshold for
const HARM_CATEGORIES: [&str; 4] = [
    "HARM_CATEGORY_HARASSMENT",
    "HARM_CATEGORY_HATE_SPEECH",
    "HARM_CATEGORY_SEXUALLY_EXPLICIT",
    "HARM_CATEGORY_DANGEROUS_CONTENT",
];

/// Gemini API provider
///
/// # Examples
///
/// ```no_run
/// use agentswarm::config::GeminiConfig;
/// use agentswarm::providers::{GeminiProvider, GenerationRequest, Provider};
///
/// # async fn example() -> agentswarm::error::Result<()> {
/// let config = GeminiConfig {
///     api_key: Some("key".to_string()),
///     ..Default::default()
/// };
/// let provider = GeminiProvider::new(config, 60)?;
/// let request = GenerationRequest {
///     agent_name: "Wooly".to_string(),
///     system_prompt: "You are Wooly.".to_string(),
///     transcript: "User: hello".to_string(),
///     latest_user_message: "hello".to_string(),
/// };
/// let text = provider.generate(&request).await?;
/// # Ok(())
/// # }
/// ```
pub struct GeminiProvider {
    client: Client,
    config: GeminiConfig,
}

/// Request body for `generateContent`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    safety_settings: Vec<GeminiSafetySetting>,
    generation_config: GeminiGenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize)]
struct GeminiSafetySetting {
    category: &'static str,
    threshold: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    temperature: f32,
    top_p: f32,
    top_k: u32,
    max_output_tokens: u32,
}

/// Response body from `generateContent`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    #[serde(default)]
    prompt_feedback: Option<GeminiPromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    #[serde(default)]
    content: Option<GeminiContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiPromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

impl GeminiProvider {
    /// Create a new Gemini provider instance
    ///
    /// # Arguments
    ///
    /// * `config` - Gemini configuration, including the optional API key
    /// * `timeout_seconds` - HTTP timeout for each call
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails
    pub fn new(config: GeminiConfig, timeout_seconds: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .user_agent(concat!("agentswarm/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SwarmError::Provider(format!("Failed to create HTTP client: {}", e)))?;

        tracing::info!(
            "Initialized Gemini provider: model={}, configured={}",
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
            "{}/v1beta/models/{}:generateContent",
            self.config.api_base.trim_end_matches('/'),
            self.config.model
        )
    }

    fn build_request(&self, request: &GenerationRequest) -> GeminiRequest {
        GeminiRequest {
            contents: vec![GeminiContent {
                role: Some("user".to_string()),
                parts: vec![GeminiPart {
                    text: request.single_prompt(),
                }],
            }],
            safety_settings: HARM_CATEGORIES
                .iter()
                .map(|category| GeminiSafetySetting {
                    category: *category,
                    threshold: self.config.safety_threshold.clone(),
                })
                .collect(),
            generation_config: GeminiGenerationConfig {
                temperature: self.config.temperature,
                top_p: self.config.top_p,
                top_k: self.config.top_k,
                max_output_tokens: self.config.max_output_tokens,
            },
        }
    }

    /// Extract text from the first candidate, or explain why there is none
    fn extract_text(response: GeminiResponse) -> ProviderResult<String> {
        let provider = ProviderKind::Gemini;

        let Some(candidate) = response.candidates.into_iter().next() else {
            let reason = response
                .prompt_feedback
                .and_then(|feedback| feedback.block_reason);
            return Err(match reason {
                Some(reason) => ProviderError::Blocked { provider, reason },
                None => ProviderError::EmptyResponse { provider },
            });
        };

        let text: String = candidate
            .content
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .map(|part| part.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            let blocked = matches!(
                candidate.finish_reason.as_deref(),
                Some("SAFETY" | "RECITATION" | "BLOCKLIST")
            );
            return Err(if blocked {
                ProviderError::Blocked {
                    provider,
                    reason: candidate.finish_reason.unwrap_or_default(),
                }
            } else {
                ProviderError::EmptyResponse { provider }
            });
        }

        Ok(text)
    }
}

#[async_trait]
impl Provider for GeminiProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Gemini
    }

    fn is_configured(&self) -> bool {
        self.config.api_key.is_some()
    }

    async fn generate(&self, request: &GenerationRequest) -> ProviderResult<String> {
        let provider = ProviderKind::Gemini;
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(ProviderError::MissingCredentials(provider))?;

        let body = self.build_request(request);
        tracing::debug!(
            "Sending Gemini request: model={}, prompt_chars={}",
            self.config.model,
            body.contents[0].parts[0].text.len()
        );

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Gemini request failed: {}", e);
                ProviderError::Request {
                    provider,
                    message: e.to_string(),
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Gemini returned error {}: {}", status, error_text);
            return Err(classify_status(provider, status.as_u16(), error_text));
        }

        let gemini_response: GeminiResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse Gemini response: {}", e);
            ProviderError::Decode {
                provider,
                message: e.to_string(),
            }
        })?;

        let text = Self::extract_text(gemini_response)?;
        tracing::debug!("Gemini response: {} chars", text.len());
        Ok(text)
    }
}
