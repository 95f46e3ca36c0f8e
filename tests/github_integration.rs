//! GitHub client tests against a wiremock REST API

use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use agentswarm::config::{GithubConfig, TrackedProject};
use agentswarm::github::GithubClient;

fn client(server: &MockServer, token: Option<&str>) -> GithubClient {
    GithubClient::new(GithubConfig {
        api_base: server.uri(),
        token: token.map(str::to_string),
        tracked_projects: vec![
            TrackedProject {
                owner: "Royleong31".to_string(),
                repo: "Clarity".to_string(),
                name: "Clarity".to_string(),
            },
            TrackedProject {
                owner: "azf20".to_string(),
                repo: "hello-world-computer".to_string(),
                name: "Hello World Computer".to_string(),
            },
        ],
        ..Default::default()
    })
    .expect("client builds")
}

async fn mount_clarity(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/repos/Royleong31/Clarity"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "Clarity",
            "stargazers_count": 12,
            "forks_count": 3,
            "watchers_count": 12,
            "open_issues_count": 0,
            "updated_at": "2025-02-21T09:30:00Z"
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/repos/Royleong31/Clarity/commits"))
        .and(query_param("per_page", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"sha": "0123456789abcdef", "commit": {"message": "Verify receipts on-chain\n\nLong body", "author": {"name": "roy", "date": "2025-02-20T00:00:00Z"}}},
            {"sha": "fedcba9876543210", "commit": {"message": "Fix review form", "author": {"name": "jo", "date": "2025-02-19T00:00:00Z"}}}
        ])))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/repos/Royleong31/Clarity/forks"))
        .and(query_param("sort", "newest"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"owner": {"login": "alice"}, "full_name": "alice/Clarity", "created_at": "2025-02-18T00:00:00Z", "html_url": "https://github.com/alice/Clarity"}
        ])))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_project_activity_maps_payloads() {
    let server = MockServer::start().await;
    mount_clarity(&server).await;

    let activity = client(&server, None)
        .project_activity("Royleong31", "Clarity")
        .await;

    let info = activity.repo_info.as_ref().unwrap();
    assert_eq!(info.stars, 12);
    assert_eq!(info.forks, 3);
    assert_eq!(info.owner, "Royleong31");
    assert_eq!(info.last_updated, "2025-02-21T09:30:00Z");

    assert_eq!(activity.recent_commits.len(), 2);
    assert_eq!(activity.recent_commits[0].sha, "0123456");
    assert_eq!(activity.recent_commits[0].message, "Verify receipts on-chain");
    assert_eq!(activity.recent_commits[1].author, "jo");

    assert_eq!(activity.recent_forks.len(), 1);
    assert_eq!(activity.recent_forks[0].owner, "alice");
    assert_eq!(activity.recent_forks[0].url, "https://github.com/alice/Clarity");
}

#[tokio::test]
async fn test_token_is_sent_when_configured() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/Royleong31/Clarity"))
        .and(header("authorization", "token ghp_test"))
        .and(header("accept", "application/vnd.github+json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"stargazers_count": 1})))
        .expect(1)
        .mount(&server)
        .await;

    let info = client(&server, Some("ghp_test"))
        .repo_info("Royleong31", "Clarity")
        .await
        .unwrap();

    assert_eq!(info.stars, 1);
    assert_eq!(info.name, "Clarity");
}

#[tokio::test]
async fn test_each_part_degrades_independently() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/azf20/hello-world-computer"))
        .respond_with(ResponseTemplate::new(403).set_body_string("rate limited"))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/repos/azf20/hello-world-computer/commits"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/repos/azf20/hello-world-computer/forks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"owner": {"login": "bob"}, "full_name": "bob/hwc"},
            {"owner": null, "full_name": "carol/hwc"}
        ])))
        .mount(&server)
        .await;

    let activity = client(&server, None)
        .project_activity("azf20", "hello-world-computer")
        .await;

    assert!(activity.repo_info.is_none());
    assert!(activity.recent_commits.is_empty());
    assert_eq!(activity.recent_forks.len(), 2);
    assert_eq!(
        activity.summary(),
        "Recent Forks: 2 developers recently forked this project"
    );
}

#[tokio::test]
async fn test_summary_for_repository_url() {
    let server = MockServer::start().await;
    mount_clarity(&server).await;

    let summary = client(&server, None)
        .summary_for("https://github.com/Royleong31/Clarity")
        .await
        .unwrap();

    assert_eq!(
        summary,
        "GitHub Stats: 12 stars, 3 forks, 0 open issues\n\
         Recent Activity:\n\
         - roy: Verify receipts on-chain\n\
         - jo: Fix review form\n\
         Recent Forks: 1 developer recently forked this project"
    );
}

#[tokio::test]
async fn test_summary_for_non_github_url_makes_no_calls() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    assert_eq!(
        client(&server, None).summary_for("https://voca-fi.vercel.app/").await,
        None
    );
}

#[tokio::test]
async fn test_all_activity_is_keyed_by_display_name() {
    let server = MockServer::start().await;
    mount_clarity(&server).await;

    let all = client(&server, None).all_activity().await;

    assert_eq!(all.len(), 2);
    assert_eq!(all["Clarity"].repo_info.as_ref().unwrap().stars, 12);
    assert!(all["Hello World Computer"].is_empty());
}
