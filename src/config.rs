//! Configuration management for the agent swarm
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.
//! Provider credentials live here and are handed to provider constructors
//! explicitly; nothing reads them from the environment after load.

use crate::error::{Result, SwarmError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Provider configuration (Gemini, OpenAI)
    #[serde(default)]
    pub providers: ProviderConfig,
    /// GitHub activity tracking
    #[serde(default)]
    pub github: GithubConfig,
    /// Agent catalog selection
    #[serde(default)]
    pub agents: AgentsConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind
    #[serde(default = "default_port")]
    pub port: u16,

    /// Origins allowed by CORS; `*` allows any, entries containing `*` are globs
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_allowed_origins() -> Vec<String> {
    vec![
        "http://localhost:3000".to_string(),
        "https://mammothon-swarm.vercel.app".to_string(),
        "https://mammothon-swarm-*.vercel.app".to_string(),
        "https://mammothon-swarm-git-*.vercel.app".to_string(),
        "https://kind-gwenora-papajams-0ddff9e5.koyeb.app".to_string(),
        "https://mammothon-backend-papajams-d9d0dedd.koyeb.app".to_string(),
    ]
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            allowed_origins: default_allowed_origins(),
        }
    }
}

/// Provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// HTTP timeout applied to every provider call (seconds)
    #[serde(default = "default_provider_timeout")]
    pub timeout_seconds: u64,

    /// Primary provider settings
    #[serde(default)]
    pub gemini: GeminiConfig,

    /// Secondary provider settings
    #[serde(default)]
    pub openai: OpenAiConfig,
}

fn default_provider_timeout() -> u64 {
    60
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_provider_timeout(),
            gemini: GeminiConfig::default(),
            openai: OpenAiConfig::default(),
        }
    }
}

/// Gemini provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// API key; absent means the provider is unavailable
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,

    /// Model to use
    #[serde(default = "default_gemini_model")]
    pub model: String,

    /// API base URL (overridable for tests and proxies)
    #[serde(default = "default_gemini_api_base")]
    pub api_base: String,

    /// Sampling temperature
    #[serde(default = "default_gemini_temperature")]
    pub temperature: f32,

    /// Nucleus-sampling cutoff
    #[serde(default = "default_gemini_top_p")]
    pub top_p: f32,

    /// Top-k sampling
    #[serde(default = "default_gemini_top_k")]
    pub top_k: u32,

    /// Maximum generated tokens
    #[serde(default = "default_gemini_max_output_tokens")]
    pub max_output_tokens: u32,

    /// Block threshold applied to every harm category
    #[serde(default = "default_safety_threshold")]
    pub safety_threshold: String,
}

fn default_gemini_model() -> String {
    "gemini-1.5-pro".to_string()
}

fn default_gemini_api_base() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_gemini_temperature() -> f32 {
    0.7
}

fn default_gemini_top_p() -> f32 {
    0.8
}

fn default_gemini_top_k() -> u32 {
    40
}

fn default_gemini_max_output_tokens() -> u32 {
    2048
}

fn default_safety_threshold() -> String {
    "BLOCK_NONE".to_string()
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_gemini_model(),
            api_base: default_gemini_api_base(),
            temperature: default_gemini_temperature(),
            top_p: default_gemini_top_p(),
            top_k: default_gemini_top_k(),
            max_output_tokens: default_gemini_max_output_tokens(),
            safety_threshold: default_safety_threshold(),
        }
    }
}

/// OpenAI provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiConfig {
    /// API key; absent means the provider is unavailable
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,

    /// Model to use
    #[serde(default = "default_openai_model")]
    pub model: String,

    /// API base URL including the version segment
    #[serde(default = "default_openai_api_base")]
    pub api_base: String,

    /// Sampling temperature; provider default when unset
    #[serde(default)]
    pub temperature: Option<f32>,
}

fn default_openai_model() -> String {
    "gpt-4".to_string()
}

fn default_openai_api_base() -> String {
    "https://api.openai.com/v1".to_string()
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_openai_model(),
            api_base: default_openai_api_base(),
            temperature: None,
        }
    }
}

/// GitHub activity configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GithubConfig {
    /// Enable `/github/*` endpoints and prompt enrichment
    #[serde(default = "default_github_enabled")]
    pub enabled: bool,

    /// Optional token, raises the REST rate limit
    #[serde(default, skip_serializing)]
    pub token: Option<String>,

    /// REST API base URL
    #[serde(default = "default_github_api_base")]
    pub api_base: String,

    /// Number of commits and forks fetched per repository
    #[serde(default = "default_commit_limit")]
    pub commit_limit: u32,

    /// Repositories exposed through `/github/*`
    #[serde(default = "default_tracked_projects")]
    pub tracked_projects: Vec<TrackedProject>,
}

/// A repository whose activity is reported
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedProject {
    /// Repository owner login
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Display name
    pub name: String,
}

impl TrackedProject {
    fn new(owner: &str, repo: &str, name: &str) -> Self {
        Self {
            owner: owner.to_string(),
            repo: repo.to_string(),
            name: name.to_string(),
        }
    }
}

fn default_github_enabled() -> bool {
    true
}

fn default_github_api_base() -> String {
    "https://api.github.com".to_string()
}

fn default_commit_limit() -> u32 {
    5
}

fn default_tracked_projects() -> Vec<TrackedProject> {
    vec![
        TrackedProject::new("Mazzz-zzz", "voca.fi", "VocaFI"),
        TrackedProject::new("Royleong31", "Clarity", "Clarity"),
        TrackedProject::new("azf20", "hello-world-computer", "Hello World Computer"),
        TrackedProject::new("thisyearnofear", "mammothon-swarm", "Mammothon"),
    ]
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            enabled: default_github_enabled(),
            token: None,
            api_base: default_github_api_base(),
            commit_limit: default_commit_limit(),
            tracked_projects: default_tracked_projects(),
        }
    }
}

/// Agent catalog configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgentsConfig {
    /// YAML catalog replacing the built-in one
    #[serde(default)]
    pub catalog_path: Option<String>,

    /// Slugs to mount; empty mounts every catalog entry
    #[serde(default)]
    pub enabled: Vec<String>,
}

impl Config {
    /// Load configuration from file with environment and CLI overrides
    ///
    /// # Arguments
    ///
    /// * `path` - Path to configuration file
    /// * `cli` - CLI arguments for overrides
    ///
    /// # Returns
    ///
    /// Returns the loaded and merged configuration
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read or parsed
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| SwarmError::Config(format!("Failed to read config file: {}", e)))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| SwarmError::Config(format!("Failed to parse config: {}", e)).into())
    }

    fn apply_env_vars(&mut self) {
        // Credentials
        if let Some(key) = non_empty_env("GEMINI_API_KEY") {
            self.providers.gemini.api_key = Some(key);
        }

        if let Some(key) = non_empty_env("OPENAI_API_KEY") {
            self.providers.openai.api_key = Some(key);
        }

        if let Some(token) = non_empty_env("GITHUB_TOKEN") {
            self.github.token = Some(token);
        }

        // Provider overrides
        if let Some(model) = non_empty_env("AGENTSWARM_GEMINI_MODEL") {
            self.providers.gemini.model = model;
        }

        if let Some(model) = non_empty_env("AGENTSWARM_OPENAI_MODEL") {
            self.providers.openai.model = model;
        }

        if let Some(timeout) = non_empty_env("AGENTSWARM_PROVIDER_TIMEOUT") {
            if let Ok(value) = timeout.parse() {
                self.providers.timeout_seconds = value;
            } else {
                tracing::warn!("Invalid AGENTSWARM_PROVIDER_TIMEOUT: {}", timeout);
            }
        }

        // Server overrides; the hosting platform's PORT wins over ours
        if let Some(host) = non_empty_env("AGENTSWARM_HOST") {
            self.server.host = host;
        }

        for var in ["AGENTSWARM_PORT", "PORT"] {
            if let Some(port) = non_empty_env(var) {
                if let Ok(value) = port.parse() {
                    self.server.port = value;
                } else {
                    tracing::warn!("Invalid {}: {}", var, port);
                }
            }
        }

        if let Some(path) = non_empty_env("AGENTSWARM_CATALOG") {
            self.agents.catalog_path = Some(path);
        }

        // Empty strings from YAML count as absent too
        for key in [
            &mut self.providers.gemini.api_key,
            &mut self.providers.openai.api_key,
            &mut self.github.token,
        ] {
            if key.as_deref().is_some_and(|k| k.trim().is_empty()) {
                *key = None;
            }
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if cli.verbose {
            tracing::debug!("Verbose mode enabled");
        }

        if let crate::cli::Commands::Serve { host, port } = &cli.command {
            if let Some(host) = host {
                self.server.host = host.clone();
            }
            if let Some(port) = port {
                self.server.port = *port;
            }
        }
    }

    /// Validate the configuration
    ///
    /// Ensures all configuration values are within acceptable ranges
    /// and that required fields are properly set. Missing credentials are
    /// not an error: the affected provider is simply unavailable.
    ///
    /// # Errors
    ///
    /// Returns error if any validation check fails
    pub fn validate(&self) -> Result<()> {
        if self.server.host.trim().is_empty() {
            return Err(SwarmError::Config("server.host cannot be empty".to_string()).into());
        }

        if self.server.port == 0 {
            return Err(
                SwarmError::Config("server.port must be greater than 0".to_string()).into(),
            );
        }

        if self.providers.timeout_seconds == 0 {
            return Err(SwarmError::Config(
                "providers.timeout_seconds must be greater than 0".to_string(),
            )
            .into());
        }

        let gemini = &self.providers.gemini;
        if gemini.model.trim().is_empty() || gemini.api_base.trim().is_empty() {
            return Err(SwarmError::Config(
                "providers.gemini.model and api_base cannot be empty".to_string(),
            )
            .into());
        }

        if !(0.0..=2.0).contains(&gemini.temperature) {
            return Err(SwarmError::Config(
                "providers.gemini.temperature must be between 0.0 and 2.0".to_string(),
            )
            .into());
        }

        if gemini.top_p <= 0.0 || gemini.top_p > 1.0 {
            return Err(SwarmError::Config(
                "providers.gemini.top_p must be between 0.0 and 1.0".to_string(),
            )
            .into());
        }

        if gemini.top_k == 0 || gemini.max_output_tokens == 0 {
            return Err(SwarmError::Config(
                "providers.gemini.top_k and max_output_tokens must be greater than 0".to_string(),
            )
            .into());
        }

        let openai = &self.providers.openai;
        if openai.model.trim().is_empty() || openai.api_base.trim().is_empty() {
            return Err(SwarmError::Config(
                "providers.openai.model and api_base cannot be empty".to_string(),
            )
            .into());
        }

        if let Some(temperature) = openai.temperature {
            if !(0.0..=2.0).contains(&temperature) {
                return Err(SwarmError::Config(
                    "providers.openai.temperature must be between 0.0 and 2.0".to_string(),
                )
                .into());
            }
        }

        if self.github.commit_limit == 0 || self.github.commit_limit > 100 {
            return Err(SwarmError::Config(
                "github.commit_limit must be between 1 and 100".to_string(),
            )
            .into());
        }

        if self.github.enabled && self.github.api_base.trim().is_empty() {
            return Err(
                SwarmError::Config("github.api_base cannot be empty".to_string()).into(),
            );
        }

        Ok(())
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
