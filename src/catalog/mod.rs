//! Agent catalog
//!
//! The catalog is the list of agent definitions the server mounts: slug,
//! display name, persona prompt and project profile. A built-in catalog is
//! compiled into the binary; `agents.catalog_path` replaces it and
//! `agents.enabled` narrows it down.

use crate::agent::{Agent, ProjectProfile, ResponseGenerator};
use crate::config::AgentsConfig;
use crate::error::{Result, SwarmError};
use crate::github::GithubClient;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

/// Catalog shipped with the binary
const BUILTIN_CATALOG: &str = include_str!("agents.yaml");

/// One catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentDefinition {
    /// URL path segment, unique within the catalog
    pub slug: String,
    /// Display name
    pub name: String,
    /// One-line summary for listings
    #[serde(default)]
    pub description: String,
    /// Persona prompt
    pub persona: String,
    /// Free-form project metadata
    #[serde(default)]
    pub profile: ProjectProfile,
}

/// Validated, ordered set of agent definitions
#[derive(Debug, Clone)]
pub struct Catalog {
    definitions: Vec<AgentDefinition>,
}

impl Catalog {
    /// The catalog compiled into the binary
    ///
    /// # Examples
    ///
    /// ```
    /// use agentswarm::catalog::Catalog;
    ///
    /// let catalog = Catalog::builtin().unwrap();
    /// assert!(catalog.get("wooly").is_some());
    /// ```
    pub fn builtin() -> Result<Self> {
        Self::from_yaml(BUILTIN_CATALOG)
    }

    /// Parses and validates a YAML catalog
    ///
    /// # Errors
    ///
    /// Returns `SwarmError::Catalog` if the document does not parse or an
    /// entry is invalid
    pub fn from_yaml(contents: &str) -> Result<Self> {
        let definitions: Vec<AgentDefinition> = serde_yaml::from_str(contents)
            .map_err(|e| SwarmError::Catalog(format!("Failed to parse catalog: {}", e)))?;
        let catalog = Self { definitions };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Reads a catalog file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            SwarmError::Catalog(format!(
                "Failed to read catalog {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_yaml(&contents)
    }

    /// Loads the configured catalog and applies the `enabled` filter
    ///
    /// # Errors
    ///
    /// Returns error if the catalog file is unreadable or invalid, or if
    /// `enabled` names a slug the catalog does not define
    pub fn load(config: &AgentsConfig) -> Result<Self> {
        let catalog = match &config.catalog_path {
            Some(path) => {
                tracing::info!("Loading agent catalog from {}", path);
                Self::from_file(path)?
            }
            None => Self::builtin()?,
        };

        catalog.select(&config.enabled)
    }

    fn validate(&self) -> Result<()> {
        if self.definitions.is_empty() {
            return Err(SwarmError::Catalog("catalog defines no agents".to_string()).into());
        }

        let mut seen = HashSet::new();
        for def in &self.definitions {
            let valid_slug = !def.slug.is_empty()
                && def
                    .slug
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
            if !valid_slug {
                return Err(SwarmError::Catalog(format!(
                    "invalid agent slug '{}': use letters, digits, '-' or '_'",
                    def.slug
                ))
                .into());
            }

            if !seen.insert(def.slug.as_str()) {
                return Err(
                    SwarmError::Catalog(format!("duplicate agent slug '{}'", def.slug)).into(),
                );
            }

            if def.name.trim().is_empty() {
                return Err(
                    SwarmError::Catalog(format!("agent '{}' has an empty name", def.slug)).into(),
                );
            }

            if def.persona.trim().is_empty() {
                return Err(SwarmError::Catalog(format!(
                    "agent '{}' has an empty persona",
                    def.slug
                ))
                .into());
            }
        }

        Ok(())
    }

    /// Keeps only the listed slugs, in catalog order; empty keeps everything
    fn select(self, enabled: &[String]) -> Result<Self> {
        if enabled.is_empty() {
            return Ok(self);
        }

        if let Some(unknown) = enabled.iter().find(|slug| self.get(slug).is_none()) {
            return Err(SwarmError::Config(format!(
                "agents.enabled lists unknown agent '{}'",
                unknown
            ))
            .into());
        }

        let definitions = self
            .definitions
            .into_iter()
            .filter(|def| enabled.contains(&def.slug))
            .collect();

        Ok(Self { definitions })
    }

    pub fn definitions(&self) -> &[AgentDefinition] {
        &self.definitions
    }

    /// Finds a definition by slug
    pub fn get(&self, slug: &str) -> Option<&AgentDefinition> {
        self.definitions.iter().find(|def| def.slug == slug)
    }

    /// Instantiates one agent per definition
    ///
    /// All agents share the same generator and, when present, the same
    /// GitHub client.
    pub fn build_agents(
        &self,
        generator: Arc<ResponseGenerator>,
        github: Option<Arc<GithubClient>>,
    ) -> AgentDirectory {
        let agents = self
            .definitions
            .iter()
            .map(|def| {
                let agent = Agent::new(
                    def.slug.clone(),
                    def.name.clone(),
                    def.description.clone(),
                    def.persona.clone(),
                    def.profile.clone(),
                    generator.clone(),
                );
                let agent = match &github {
                    Some(client) => agent.with_github(client.clone()),
                    None => agent,
                };
                Arc::new(agent)
            })
            .collect();

        AgentDirectory { agents }
    }
}

/// The mounted agents, in catalog order
#[derive(Clone, Default)]
pub struct AgentDirectory {
    agents: Vec<Arc<Agent>>,
}

impl AgentDirectory {
    /// Looks up a mounted agent by slug
    pub fn get(&self, slug: &str) -> Option<&Arc<Agent>> {
        self.agents.iter().find(|a| a.slug() == slug)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Agent>> {
        self.agents.iter()
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}
