//! Agent module for the swarm
//!
//! An agent binds a project profile and a persona prompt to a shared
//! response generator. Agents are immutable after construction and are
//! shared across request handlers behind `Arc`.

pub mod conversation;
pub mod generator;
pub mod profile;
pub mod prompt;

pub use conversation::{
    is_first_turn, latest_user_message, transcript, ChatRequest, ChatResponse, Message, Role,
};
pub use generator::{ResponseGenerator, FALLBACK_REPLY};
pub use profile::{ProjectProfile, LINK_MARKER};

use crate::error::Result;
use crate::github::{mentions_activity, GithubClient};
use crate::providers::ProviderKind;
use std::sync::Arc;

/// A chat agent representing one project
pub struct Agent {
    slug: String,
    name: String,
    description: String,
    persona: String,
    profile: ProjectProfile,
    links_html: Option<String>,
    generator: Arc<ResponseGenerator>,
    github: Option<Arc<GithubClient>>,
}

impl Agent {
    /// Create a new agent
    ///
    /// The first-turn link block is rendered once here from the profile.
    ///
    /// # Arguments
    ///
    /// * `slug` - URL path segment and catalog key
    /// * `name` - Display name the providers speak as
    /// * `description` - One-line summary for the directory listing
    /// * `persona` - Persona prompt
    /// * `profile` - Project metadata echoed on first turns
    /// * `generator` - Shared response generator
    pub fn new(
        slug: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        persona: impl Into<String>,
        profile: ProjectProfile,
        generator: Arc<ResponseGenerator>,
    ) -> Self {
        let links_html = profile.links_html();
        Self {
            slug: slug.into(),
            name: name.into(),
            description: description.into(),
            persona: persona.into(),
            profile,
            links_html,
            generator,
            github: None,
        }
    }

    /// Enables live GitHub activity in prompts that ask about progress
    pub fn with_github(mut self, github: Arc<GithubClient>) -> Self {
        self.github = Some(github);
        self
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn persona(&self) -> &str {
        &self.persona
    }

    pub fn profile(&self) -> &ProjectProfile {
        &self.profile
    }

    /// Path prefix the agent is mounted under
    pub fn endpoint(&self) -> String {
        format!("/agents/{}", self.slug)
    }

    /// Answers one conversation turn
    ///
    /// # Arguments
    ///
    /// * `messages` - Full conversation so far, oldest first
    /// * `selection` - Requested provider, `gemini` or `openai`
    ///
    /// # Errors
    ///
    /// Returns `SwarmError::InvalidArgument` for an unknown selection,
    /// before any provider is contacted. Provider failures never surface
    /// here; they end in fallback text.
    pub async fn converse(&self, messages: &[Message], selection: &str) -> Result<ChatResponse> {
        let kind: ProviderKind = selection.parse()?;
        Ok(self.converse_with(messages, kind).await)
    }

    /// Answers one conversation turn with an already-validated provider
    pub async fn converse_with(&self, messages: &[Message], kind: ProviderKind) -> ChatResponse {
        let first_turn = is_first_turn(messages);
        tracing::debug!(
            "Agent {} handling {} messages via {}",
            self.slug,
            messages.len(),
            kind
        );

        let activity = self.github_activity(latest_user_message(messages)).await;
        let request = prompt::build_request(&self.name, &self.persona, messages, activity.as_deref());
        let mut response = self.generator.generate(&request, kind).await;

        if first_turn && !response.contains(LINK_MARKER) {
            if let Some(links) = &self.links_html {
                response.push_str(links);
            }
        }

        ChatResponse {
            response,
            project_info: first_turn.then(|| self.profile.clone()),
        }
    }

    async fn github_activity(&self, latest: &str) -> Option<String> {
        let github = self.github.as_ref()?;
        if !mentions_activity(latest) {
            return None;
        }
        let repo_url = self.profile.repository_url()?;
        github.summary_for(repo_url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SwarmError;
    use crate::test_utils::ScriptedProvider;
    use serde_json::json;

    fn profile() -> ProjectProfile {
        ProjectProfile::from_value(json!({
            "title": "VocaFI",
            "github_repo": "https://github.com/Mazzz-zzz/voca.fi",
            "project_url": "https://voca.fi"
        }))
        .unwrap()
    }

    fn agent_with(primary: Arc<ScriptedProvider>, secondary: Arc<ScriptedProvider>) -> Agent {
        Agent::new(
            "vocafi",
            "VocaFI",
            "Voice-controlled DeFi trading",
            "You are VocaFI.",
            profile(),
            Arc::new(ResponseGenerator::new(primary, secondary)),
        )
    }

    #[tokio::test]
    async fn test_first_turn_appends_links_and_echoes_profile() {
        let primary = ScriptedProvider::configured(ProviderKind::Gemini, vec![Ok("Hi there".into())]);
        let secondary = ScriptedProvider::unconfigured(ProviderKind::OpenAi);
        let agent = agent_with(primary.clone(), secondary);

        let reply = agent
            .converse(&[Message::user("hello")], "gemini")
            .await
            .unwrap();

        assert_eq!(
            reply.response,
            format!("Hi there{}", profile().links_html().unwrap())
        );
        assert_eq!(reply.project_info, Some(profile()));

        let request = primary.last_request().unwrap();
        assert_eq!(request.agent_name, "VocaFI");
        assert_eq!(request.latest_user_message, "hello");
        assert!(request.system_prompt.starts_with("You are VocaFI."));
    }

    #[tokio::test]
    async fn test_first_turn_keeps_existing_links() {
        let text = "Check out <a href='https://voca.fi'>the project</a>";
        let primary = ScriptedProvider::configured(ProviderKind::Gemini, vec![Ok(text.into())]);
        let agent = agent_with(primary, ScriptedProvider::unconfigured(ProviderKind::OpenAi));

        let reply = agent.converse(&[Message::user("hi")], "gemini").await.unwrap();
        assert_eq!(reply.response, text);
        assert!(reply.project_info.is_some());
    }

    #[tokio::test]
    async fn test_later_turns_have_no_links_or_profile() {
        let primary = ScriptedProvider::configured(ProviderKind::Gemini, vec![Ok("Sure".into())]);
        let agent = agent_with(primary, ScriptedProvider::unconfigured(ProviderKind::OpenAi));

        let messages = vec![
            Message::user("hello"),
            Message::assistant("Hi there"),
            Message::user("tell me more"),
        ];
        let reply = agent.converse(&messages, "gemini").await.unwrap();

        assert_eq!(reply.response, "Sure");
        assert_eq!(reply.project_info, None);
    }

    #[tokio::test]
    async fn test_empty_conversation_is_a_first_turn() {
        let primary = ScriptedProvider::configured(ProviderKind::Gemini, vec![Ok("Welcome".into())]);
        let agent = agent_with(primary.clone(), ScriptedProvider::unconfigured(ProviderKind::OpenAi));

        let reply = agent.converse(&[], "gemini").await.unwrap();
        assert!(reply.response.starts_with("Welcome<div class=\"agent-links\">"));
        assert!(reply.project_info.is_some());
        assert_eq!(primary.last_request().unwrap().latest_user_message, "");
    }

    #[tokio::test]
    async fn test_invalid_selection_is_rejected_before_any_call() {
        let primary = ScriptedProvider::configured(ProviderKind::Gemini, vec![Ok("x".into())]);
        let secondary = ScriptedProvider::configured(ProviderKind::OpenAi, vec![Ok("y".into())]);
        let agent = agent_with(primary.clone(), secondary.clone());

        let err = agent
            .converse(&[Message::user("hi")], "foo")
            .await
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<SwarmError>(),
            Some(SwarmError::InvalidArgument(_))
        ));
        assert_eq!(primary.calls(), 0);
        assert_eq!(secondary.calls(), 0);
    }

    #[tokio::test]
    async fn test_total_failure_still_gets_links_on_first_turn() {
        let agent = agent_with(
            ScriptedProvider::unconfigured(ProviderKind::Gemini),
            ScriptedProvider::unconfigured(ProviderKind::OpenAi),
        );

        let reply = agent.converse(&[Message::user("hi")], "openai").await.unwrap();
        assert!(reply.response.starts_with(FALLBACK_REPLY));
        assert!(reply.response.contains(LINK_MARKER));
    }

    #[tokio::test]
    async fn test_profile_without_links_appends_nothing() {
        let primary = ScriptedProvider::configured(ProviderKind::Gemini, vec![Ok("Hello".into())]);
        let agent = Agent::new(
            "bare",
            "Bare",
            "No links",
            "You are Bare.",
            ProjectProfile::default(),
            Arc::new(ResponseGenerator::new(
                primary,
                ScriptedProvider::unconfigured(ProviderKind::OpenAi),
            )),
        );

        let reply = agent.converse(&[Message::user("hi")], "gemini").await.unwrap();
        assert_eq!(reply.response, "Hello");
    }

    #[test]
    fn test_endpoint() {
        let agent = agent_with(
            ScriptedProvider::unconfigured(ProviderKind::Gemini),
            ScriptedProvider::unconfigured(ProviderKind::OpenAi),
        );
        assert_eq!(agent.endpoint(), "/agents/vocafi");
        assert_eq!(agent.slug(), "vocafi");
    }
}
