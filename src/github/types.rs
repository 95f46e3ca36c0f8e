//! GitHub activity types
//!
//! `Raw*` structs mirror the REST payloads and tolerate missing fields; the
//! public types are what the `/github/*` endpoints return.

use serde::{Deserialize, Serialize};

/// Repository counters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoInfo {
    pub name: String,
    pub owner: String,
    pub repo: String,
    pub stars: u64,
    pub forks: u64,
    pub watchers: u64,
    pub open_issues: u64,
    pub last_updated: String,
}

/// A recent commit, first line of the message only
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    pub sha: String,
    pub message: String,
    pub author: String,
    pub date: String,
}

/// A recent fork
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fork {
    pub owner: String,
    pub full_name: String,
    pub created_at: String,
    pub url: String,
}

/// Everything known about one repository's recent activity
///
/// Each part is fetched independently; a failed fetch leaves its part
/// absent or empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectActivity {
    pub repo_info: Option<RepoInfo>,
    #[serde(default)]
    pub recent_commits: Vec<Commit>,
    #[serde(default)]
    pub recent_forks: Vec<Fork>,
}

impl ProjectActivity {
    /// Whether no part of the activity could be fetched
    pub fn is_empty(&self) -> bool {
        self.repo_info.is_none() && self.recent_commits.is_empty() && self.recent_forks.is_empty()
    }

    /// Renders the plain-text summary injected into system prompts
    ///
    /// Returns an empty string when there is nothing to report.
    ///
    /// # Examples
    ///
    /// ```
    /// use agentswarm::github::{Fork, ProjectActivity};
    ///
    /// let activity = ProjectActivity {
    ///     recent_forks: vec![Fork {
    ///         owner: "alice".to_string(),
    ///         full_name: "alice/repo".to_string(),
    ///         created_at: String::new(),
    ///         url: String::new(),
    ///     }],
    ///     ..Default::default()
    /// };
    /// assert_eq!(
    ///     activity.summary(),
    ///     "Recent Forks: 1 developer recently forked this project"
    /// );
    /// ```
    pub fn summary(&self) -> String {
        let mut lines = Vec::new();

        if let Some(info) = &self.repo_info {
            lines.push(format!(
                "GitHub Stats: {} stars, {} forks, {} open issues",
                info.stars, info.forks, info.open_issues
            ));
        }

        if !self.recent_commits.is_empty() {
            lines.push("Recent Activity:".to_string());
            lines.extend(
                self.recent_commits
                    .iter()
                    .take(3)
                    .filter(|c| !c.author.is_empty() && !c.message.is_empty())
                    .map(|c| format!("- {}: {}", c.author, c.message)),
            );
        }

        if !self.recent_forks.is_empty() {
            let count = self.recent_forks.len();
            lines.push(format!(
                "Recent Forks: {} developer{} recently forked this project",
                count,
                if count == 1 { "" } else { "s" }
            ));
        }

        lines.join("\n")
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawRepo {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub forks_count: u64,
    #[serde(default)]
    pub watchers_count: u64,
    #[serde(default)]
    pub open_issues_count: u64,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl RawRepo {
    pub fn into_info(self, owner: &str, repo: &str) -> RepoInfo {
        RepoInfo {
            name: self.name.unwrap_or_else(|| repo.to_string()),
            owner: owner.to_string(),
            repo: repo.to_string(),
            stars: self.stargazers_count,
            forks: self.forks_count,
            watchers: self.watchers_count,
            open_issues: self.open_issues_count,
            last_updated: self.updated_at.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawCommit {
    #[serde(default)]
    pub sha: String,
    #[serde(default)]
    pub commit: RawCommitDetail,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawCommitDetail {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub author: Option<RawSignature>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawSignature {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub date: String,
}

impl From<RawCommit> for Commit {
    fn from(raw: RawCommit) -> Self {
        let author = raw.commit.author.unwrap_or_default();
        Self {
            sha: raw.sha.chars().take(7).collect(),
            message: raw.commit.message.lines().next().unwrap_or("").to_string(),
            author: author.name,
            date: author.date,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawFork {
    #[serde(default)]
    pub owner: Option<RawOwner>,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub html_url: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawOwner {
    #[serde(default)]
    pub login: String,
}

impl From<RawFork> for Fork {
    fn from(raw: RawFork) -> Self {
        Self {
            owner: raw.owner.map(|o| o.login).unwrap_or_default(),
            full_name: raw.full_name,
            created_at: raw.created_at,
            url: raw.html_url,
        }
    }
}
