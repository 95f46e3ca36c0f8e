//! Agent directory and per-agent endpoints

use crate::agent::{Agent, ChatRequest, ChatResponse, ProjectProfile};
use crate::error::SwarmError;
use crate::providers::ProviderKind;
use crate::server::{ApiError, AppState};

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;

pub fn agent_routes() -> Router<AppState> {
    Router::new()
        .route("/agents", get(list_agents))
        .route("/agents/:slug", get(agent_root))
        .route("/agents/:slug/health", get(agent_health))
        .route("/agents/:slug/info", get(agent_info))
        .route("/agents/:slug/chat", post(chat))
}

/// Directory entry returned by `GET /agents`
#[derive(Debug, Serialize)]
struct AgentSummary<'a> {
    name: &'a str,
    #[serde(rename = "type")]
    kind: &'a str,
    description: &'a str,
    endpoint: String,
    project_info: &'a ProjectProfile,
}

impl<'a> From<&'a Agent> for AgentSummary<'a> {
    fn from(agent: &'a Agent) -> Self {
        Self {
            name: agent.name(),
            kind: agent.slug(),
            description: agent.description(),
            endpoint: agent.endpoint(),
            project_info: agent.profile(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatQuery {
    model_type: Option<String>,
}

fn find_agent(state: &AppState, slug: &str) -> Result<Arc<Agent>, ApiError> {
    state
        .agents
        .get(slug)
        .cloned()
        .ok_or_else(|| SwarmError::AgentNotFound(slug.to_string()).into())
}

async fn list_agents(State(state): State<AppState>) -> Json<Value> {
    let agents: Vec<AgentSummary<'_>> = state
        .agents
        .iter()
        .map(|a| AgentSummary::from(&**a))
        .collect();
    Json(json!({ "agents": agents }))
}

async fn agent_root(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let agent = find_agent(&state, &slug)?;
    Ok(Json(json!({
        "name": format!("{} Agent API", agent.name()),
        "version": env!("CARGO_PKG_VERSION"),
        "description": format!("API for the {} AI agent", agent.name()),
    })))
}

async fn agent_health(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Value>, ApiError> {
    find_agent(&state, &slug)?;
    Ok(Json(json!({ "status": "healthy" })))
}

async fn agent_info(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<ProjectProfile>, ApiError> {
    let agent = find_agent(&state, &slug)?;
    Ok(Json(agent.profile().clone()))
}

async fn chat(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(query): Query<ChatQuery>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let agent = find_agent(&state, &slug)?;
    let Json(request) = payload?;
    let selection = query
        .model_type
        .unwrap_or_else(|| ProviderKind::default().to_string());

    tracing::info!(
        "Chat request for {}: {} messages, model_type={}",
        slug,
        request.messages.len(),
        selection
    );

    let response = agent.converse(&request.messages, &selection).await?;
    Ok(Json(response))
}
