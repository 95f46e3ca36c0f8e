//! GitHub activity endpoints

use crate::config::TrackedProject;
use crate::github::{GithubClient, ProjectActivity};
use crate::server::ApiError;

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use std::collections::BTreeMap;
use std::sync::Arc;

pub fn github_routes() -> Router<Arc<GithubClient>> {
    Router::new()
        .route("/github/projects", get(list_projects))
        .route("/github/project/:owner/:repo", get(project_activity))
        .route("/github/activity", get(all_activity))
}

async fn list_projects(State(github): State<Arc<GithubClient>>) -> Json<Vec<TrackedProject>> {
    Json(github.tracked_projects().to_vec())
}

async fn project_activity(
    State(github): State<Arc<GithubClient>>,
    Path((owner, repo)): Path<(String, String)>,
) -> Result<Json<ProjectActivity>, ApiError> {
    if github.find_tracked(&owner, &repo).is_none() {
        return Err(ApiError::NotFound(
            "Project not found in tracked projects".to_string(),
        ));
    }

    Ok(Json(github.project_activity(&owner, &repo).await))
}

async fn all_activity(
    State(github): State<Arc<GithubClient>>,
) -> Json<BTreeMap<String, ProjectActivity>> {
    Json(github.all_activity().await)
}
