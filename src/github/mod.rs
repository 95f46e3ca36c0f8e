//! GitHub activity client
//!
//! Fetches repository counters, recent commits and recent forks from the
//! GitHub REST API. Every fetch degrades independently: a failure is logged
//! and that part of the activity is left absent or empty.

pub mod types;

pub use types::{Commit, Fork, ProjectActivity, RepoInfo};

use crate::config::{GithubConfig, TrackedProject};
use crate::error::{Result, SwarmError};
use types::{RawCommit, RawFork, RawRepo};

use reqwest::Client;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::time::Duration;
use url::Url;

/// Per-request timeout for GitHub calls
const GITHUB_TIMEOUT_SECONDS: u64 = 10;

/// Words in a user message that pull live activity into the prompt
const ACTIVITY_KEYWORDS: [&str; 9] = [
    "progress",
    "activity",
    "github",
    "fork",
    "commit",
    "star",
    "contributor",
    "development",
    "momentum",
];

/// Whether a user message asks about project progress
///
/// # Examples
///
/// ```
/// use agentswarm::github::mentions_activity;
///
/// assert!(mentions_activity("How many STARS does it have?"));
/// assert!(!mentions_activity("What does it do?"));
/// ```
pub fn mentions_activity(message: &str) -> bool {
    let lowered = message.to_lowercase();
    ACTIVITY_KEYWORDS.iter().any(|k| lowered.contains(k))
}

/// Extracts `(owner, repo)` from a github.com repository URL
///
/// # Examples
///
/// ```
/// use agentswarm::github::parse_repo_url;
///
/// assert_eq!(
///     parse_repo_url("https://github.com/Royleong31/Clarity/"),
///     Some(("Royleong31".to_string(), "Clarity".to_string()))
/// );
/// assert_eq!(parse_repo_url("https://voca.fi"), None);
/// ```
pub fn parse_repo_url(url: &str) -> Option<(String, String)> {
    let parsed = Url::parse(url.trim()).ok()?;
    match parsed.host_str()? {
        "github.com" | "www.github.com" => {}
        _ => return None,
    }

    let mut segments = parsed.path_segments()?.filter(|s| !s.is_empty());
    let owner = segments.next()?;
    let repo = segments.next()?;
    let repo = repo.strip_suffix(".git").unwrap_or(repo);
    if repo.is_empty() {
        return None;
    }

    Some((owner.to_string(), repo.to_string()))
}

/// GitHub REST client
pub struct GithubClient {
    client: Client,
    config: GithubConfig,
}

impl GithubClient {
    /// Create a new client
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails
    pub fn new(config: GithubConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(GITHUB_TIMEOUT_SECONDS))
            .user_agent(concat!("agentswarm/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SwarmError::Github(format!("Failed to create HTTP client: {}", e)))?;

        tracing::info!(
            "Initialized GitHub client: {} tracked projects, authenticated={}",
            config.tracked_projects.len(),
            config.token.is_some()
        );

        Ok(Self { client, config })
    }

    /// Repositories exposed through the activity endpoints
    pub fn tracked_projects(&self) -> &[TrackedProject] {
        &self.config.tracked_projects
    }

    /// Looks up a tracked repository by owner and name
    pub fn find_tracked(&self, owner: &str, repo: &str) -> Option<&TrackedProject> {
        self.config
            .tracked_projects
            .iter()
            .find(|p| p.owner == owner && p.repo == repo)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T> {
        let url = format!("{}{}", self.config.api_base.trim_end_matches('/'), path);

        let mut request = self
            .client
            .get(&url)
            .header("Accept", "application/vnd.github+json")
            .query(query);
        if let Some(token) = &self.config.token {
            request = request.header("Authorization", format!("token {}", token));
        }

        let response = request
            .send()
            .await
            .map_err(|e| SwarmError::Github(format!("Request to {} failed: {}", path, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SwarmError::Github(format!("{} returned {}", path, status)).into());
        }

        response
            .json()
            .await
            .map_err(|e| SwarmError::Github(format!("Failed to parse {}: {}", path, e)).into())
    }

    /// Repository counters, or `None` if they cannot be fetched
    pub async fn repo_info(&self, owner: &str, repo: &str) -> Option<RepoInfo> {
        match self
            .get_json::<RawRepo>(&format!("/repos/{}/{}", owner, repo), &[])
            .await
        {
            Ok(raw) => Some(raw.into_info(owner, repo)),
            Err(e) => {
                tracing::warn!("Error fetching repo info for {}/{}: {}", owner, repo, e);
                None
            }
        }
    }

    /// Most recent commits, newest first
    pub async fn recent_commits(&self, owner: &str, repo: &str) -> Vec<Commit> {
        let query = [("per_page", self.config.commit_limit.to_string())];
        match self
            .get_json::<Vec<RawCommit>>(&format!("/repos/{}/{}/commits", owner, repo), &query)
            .await
        {
            Ok(raw) => raw.into_iter().map(Commit::from).collect(),
            Err(e) => {
                tracing::warn!("Error fetching commits for {}/{}: {}", owner, repo, e);
                Vec::new()
            }
        }
    }

    /// Most recent forks, newest first
    pub async fn recent_forks(&self, owner: &str, repo: &str) -> Vec<Fork> {
        let query = [
            ("per_page", self.config.commit_limit.to_string()),
            ("sort", "newest".to_string()),
        ];
        match self
            .get_json::<Vec<RawFork>>(&format!("/repos/{}/{}/forks", owner, repo), &query)
            .await
        {
            Ok(raw) => raw.into_iter().map(Fork::from).collect(),
            Err(e) => {
                tracing::warn!("Error fetching forks for {}/{}: {}", owner, repo, e);
                Vec::new()
            }
        }
    }

    /// Fetches all three parts of a repository's activity concurrently
    pub async fn project_activity(&self, owner: &str, repo: &str) -> ProjectActivity {
        let (repo_info, recent_commits, recent_forks) = tokio::join!(
            self.repo_info(owner, repo),
            self.recent_commits(owner, repo),
            self.recent_forks(owner, repo)
        );

        ProjectActivity {
            repo_info,
            recent_commits,
            recent_forks,
        }
    }

    /// Activity for every tracked project, keyed by display name
    pub async fn all_activity(&self) -> BTreeMap<String, ProjectActivity> {
        let fetches = self.config.tracked_projects.iter().map(|p| async move {
            (p.name.clone(), self.project_activity(&p.owner, &p.repo).await)
        });

        futures::future::join_all(fetches).await.into_iter().collect()
    }

    /// Activity summary for the repository behind `repo_url`
    ///
    /// Returns `None` when the URL is not a GitHub repository or nothing
    /// could be fetched.
    pub async fn summary_for(&self, repo_url: &str) -> Option<String> {
        let (owner, repo) = parse_repo_url(repo_url)?;
        let activity = self.project_activity(&owner, &repo).await;
        let summary = activity.summary();
        if summary.is_empty() {
            tracing::debug!("No GitHub activity available for {}/{}", owner, repo);
            None
        } else {
            Some(summary)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mentions_activity_keywords() {
        assert!(mentions_activity("Any recent commits?"));
        assert!(mentions_activity("who are the contributors"));
        assert!(mentions_activity("Show me development MOMENTUM"));
        assert!(!mentions_activity("hello"));
        assert!(!mentions_activity(""));
    }

    #[test]
    fn test_parse_repo_url_variants() {
        let expected = Some(("Mazzz-zzz".to_string(), "voca.fi".to_string()));
        assert_eq!(parse_repo_url("https://github.com/Mazzz-zzz/voca.fi"), expected);
        assert_eq!(parse_repo_url("https://github.com/Mazzz-zzz/voca.fi.git"), expected);
        assert_eq!(
            parse_repo_url("https://www.github.com/Mazzz-zzz/voca.fi/tree/main"),
            expected
        );
    }

    #[test]
    fn test_parse_repo_url_rejects_non_repositories() {
        assert_eq!(parse_repo_url("https://github.com/helloworldcomputer"), None);
        assert_eq!(parse_repo_url("https://gitlab.com/a/b"), None);
        assert_eq!(parse_repo_url("not a url"), None);
    }

    #[test]
    fn test_find_tracked() {
        let client = GithubClient::new(GithubConfig::default()).unwrap();
        assert_eq!(
            client.find_tracked("Royleong31", "Clarity").map(|p| p.name.as_str()),
            Some("Clarity")
        );
        assert!(client.find_tracked("royleong31", "clarity").is_none());
        assert_eq!(client.tracked_projects().len(), 4);
    }

    #[tokio::test]
    async fn test_unreachable_api_degrades_to_empty_activity() {
        let client = GithubClient::new(GithubConfig {
            api_base: "http://127.0.0.1:1".to_string(),
            ..Default::default()
        })
        .unwrap();

        let activity = client.project_activity("a", "b").await;
        assert!(activity.is_empty());
        assert_eq!(client.summary_for("https://github.com/a/b").await, None);
    }
}
