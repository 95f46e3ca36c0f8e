//! Project profiles
//!
//! A profile is the free-form metadata document describing the project an
//! agent represents. It is echoed to clients on the first turn and is the
//! source of the HTML link block appended to first replies.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Marker whose presence means a reply already carries a hyperlink
pub const LINK_MARKER: &str = "<a href";

/// Immutable project metadata
///
/// Profiles come in two shapes: flat (`github_repo`, `project_url`,
/// `hackathon_link`) and nested under `links` (`github`, `website`,
/// `frontend_demo1`, `hackathon`). Link lookups accept both.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectProfile(Map<String, Value>);

impl ProjectProfile {
    /// Wraps a JSON object
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Builds a profile from a JSON value, or `None` if it is not an object
    ///
    /// # Examples
    ///
    /// ```
    /// use agentswarm::agent::ProjectProfile;
    /// use serde_json::json;
    ///
    /// let profile = ProjectProfile::from_value(json!({"github_repo": "https://github.com/a/b"}));
    /// assert!(profile.is_some());
    /// assert!(ProjectProfile::from_value(json!("nope")).is_none());
    /// ```
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self(fields)),
            _ => None,
        }
    }

    /// Raw field access
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Whether the profile has no fields
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Source repository URL
    pub fn repository_url(&self) -> Option<&str> {
        self.lookup(&["github_repo"], &["github"])
    }

    /// Live project URL
    pub fn project_url(&self) -> Option<&str> {
        self.lookup(&["project_url"], &["website", "frontend_demo1"])
    }

    /// Hackathon submission URL
    pub fn submission_url(&self) -> Option<&str> {
        self.lookup(&["hackathon_link"], &["hackathon"])
    }

    fn lookup(&self, flat: &[&str], nested: &[&str]) -> Option<&str> {
        fn non_empty(v: &Value) -> Option<&str> {
            v.as_str().filter(|s| !s.trim().is_empty())
        }

        flat.iter()
            .find_map(|key| self.0.get(*key).and_then(non_empty))
            .or_else(|| {
                let links = self.0.get("links")?.as_object()?;
                nested
                    .iter()
                    .find_map(|key| links.get(*key).and_then(non_empty))
            })
    }

    /// Renders the link block appended to first-turn replies
    ///
    /// Returns `None` when the profile carries none of the three links.
    ///
    /// # Examples
    ///
    /// ```
    /// use agentswarm::agent::ProjectProfile;
    /// use serde_json::json;
    ///
    /// let profile = ProjectProfile::from_value(json!({
    ///     "github_repo": "https://github.com/a/b"
    /// }))
    /// .unwrap();
    /// let html = profile.links_html().unwrap();
    /// assert!(html.starts_with("<div class=\"agent-links\">"));
    /// assert!(html.contains("href=\"https://github.com/a/b\""));
    /// ```
    pub fn links_html(&self) -> Option<String> {
        let mut items = Vec::new();

        if let Some(url) = self.repository_url() {
            items.push(link_paragraph("GitHub", url, url));
        }
        if let Some(url) = self.project_url() {
            items.push(link_paragraph("Project", url, url));
        }
        if let Some(url) = self.submission_url() {
            items.push(link_paragraph("Hackathon", url, "View Submission"));
        }

        if items.is_empty() {
            return None;
        }

        Some(format!(
            "<div class=\"agent-links\">{}</div>",
            items.concat()
        ))
    }
}

fn link_paragraph(label: &str, url: &str, text: &str) -> String {
    let href = escape_html(url);
    format!(
        "<p><strong>{}:</strong> <a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a></p>",
        label,
        href,
        escape_html(text)
    )
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn flat_profile() -> ProjectProfile {
        ProjectProfile::from_value(json!({
            "title": "VocaFI",
            "github_repo": "https://github.com/Mazzz-zzz/voca.fi",
            "project_url": "https://voca.fi",
            "hackathon_link": "https://devfolio.co/projects/vocafi-8aba"
        }))
        .unwrap()
    }

    #[test]
    fn test_flat_links() {
        let profile = flat_profile();
        assert_eq!(
            profile.repository_url(),
            Some("https://github.com/Mazzz-zzz/voca.fi")
        );
        assert_eq!(profile.project_url(), Some("https://voca.fi"));
        assert_eq!(
            profile.submission_url(),
            Some("https://devfolio.co/projects/vocafi-8aba")
        );
    }

    #[test]
    fn test_nested_links() {
        let profile = ProjectProfile::from_value(json!({
            "name": "Clarity",
            "links": {
                "github": "https://github.com/Royleong31/Clarity",
                "frontend_demo1": "https://d3e8hw77ywlb9l.cloudfront.net/",
                "hackathon": "https://ethglobal.com/showcase/clarity-c2us8"
            }
        }))
        .unwrap();
        assert_eq!(
            profile.repository_url(),
            Some("https://github.com/Royleong31/Clarity")
        );
        assert_eq!(
            profile.project_url(),
            Some("https://d3e8hw77ywlb9l.cloudfront.net/")
        );
        assert_eq!(
            profile.submission_url(),
            Some("https://ethglobal.com/showcase/clarity-c2us8")
        );
    }

    #[test]
    fn test_website_preferred_over_demo() {
        let profile = ProjectProfile::from_value(json!({
            "links": {"frontend_demo1": "https://demo", "website": "https://site"}
        }))
        .unwrap();
        assert_eq!(profile.project_url(), Some("https://site"));
    }

    #[test]
    fn test_empty_link_values_are_ignored() {
        let profile = ProjectProfile::from_value(json!({"github_repo": "  "})).unwrap();
        assert_eq!(profile.repository_url(), None);
        assert_eq!(profile.links_html(), None);
    }

    #[test]
    fn test_blank_flat_link_falls_back_to_nested() {
        let profile = ProjectProfile::from_value(json!({
            "github_repo": "",
            "project_url": 42,
            "links": {"github": "https://github.com/a/b", "website": "https://b.dev"}
        }))
        .unwrap();
        assert_eq!(profile.repository_url(), Some("https://github.com/a/b"));
        assert_eq!(profile.project_url(), Some("https://b.dev"));
        assert_eq!(profile.submission_url(), None);
    }

    #[test]
    fn test_links_html_contains_each_present_link() {
        let html = flat_profile().links_html().unwrap();
        assert_eq!(
            html,
            "<div class=\"agent-links\">\
             <p><strong>GitHub:</strong> <a href=\"https://github.com/Mazzz-zzz/voca.fi\" target=\"_blank\" rel=\"noopener noreferrer\">https://github.com/Mazzz-zzz/voca.fi</a></p>\
             <p><strong>Project:</strong> <a href=\"https://voca.fi\" target=\"_blank\" rel=\"noopener noreferrer\">https://voca.fi</a></p>\
             <p><strong>Hackathon:</strong> <a href=\"https://devfolio.co/projects/vocafi-8aba\" target=\"_blank\" rel=\"noopener noreferrer\">View Submission</a></p>\
             </div>"
        );
        assert!(html.contains(LINK_MARKER));
    }

    #[test]
    fn test_links_html_only_repository() {
        let profile =
            ProjectProfile::from_value(json!({"github_repo": "https://github.com/a/b"})).unwrap();
        let html = profile.links_html().unwrap();
        assert!(html.contains("GitHub:"));
        assert!(!html.contains("Project:"));
        assert!(!html.contains("Hackathon:"));
    }

    #[test]
    fn test_links_html_escapes_urls() {
        let profile =
            ProjectProfile::from_value(json!({"project_url": "https://x.io/?a=1&b=\"2\""}))
                .unwrap();
        let html = profile.links_html().unwrap();
        assert!(html.contains("href=\"https://x.io/?a=1&amp;b=&quot;2&quot;\""));
    }

    #[test]
    fn test_serializes_as_plain_object() {
        let value = serde_json::to_value(flat_profile()).unwrap();
        assert_eq!(value["title"], "VocaFI");
    }
}
