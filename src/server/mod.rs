//! HTTP router for the agent swarm
//!
//! Mounts every catalog agent under `/agents/<slug>`, the directory listing,
//! health checks and, when enabled, the GitHub activity endpoints.

pub mod error;
pub mod routes;

pub use error::ApiError;

use crate::agent::ResponseGenerator;
use crate::catalog::{AgentDirectory, Catalog};
use crate::config::{Config, ServerConfig};
use crate::error::{Result, SwarmError};
use crate::github::GithubClient;
use routes::{agent_routes, github_routes, health_routes};

use axum::http::{header, request::Parts, HeaderValue, Method};
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, AllowOrigin, Any, CorsLayer};

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    /// Mounted agents
    pub agents: AgentDirectory,
    /// GitHub client, absent when GitHub tracking is disabled
    pub github: Option<Arc<GithubClient>>,
}

impl AppState {
    /// Builds providers, the GitHub client and every catalog agent
    ///
    /// # Errors
    ///
    /// Returns error if an HTTP client cannot be built or the catalog is
    /// invalid
    pub fn from_config(config: &Config) -> Result<Self> {
        let generator = Arc::new(ResponseGenerator::from_config(&config.providers)?);
        if !generator.has_credentials() {
            tracing::warn!(
                "Neither GEMINI_API_KEY nor OPENAI_API_KEY is set; agents will answer with an apology"
            );
        }

        let github = if config.github.enabled {
            Some(Arc::new(GithubClient::new(config.github.clone())?))
        } else {
            None
        };

        let catalog = Catalog::load(&config.agents)?;
        let agents = catalog.build_agents(generator, github.clone());

        Ok(Self { agents, github })
    }
}

/// Assembles the full router
pub fn build_router(state: AppState, server: &ServerConfig) -> Router {
    let mut app = Router::new()
        .merge(agent_routes())
        .with_state(state.clone())
        .merge(health_routes());

    if let Some(github) = state.github {
        app = app.merge(github_routes().with_state(github));
    }

    app.fallback(error::not_found)
        .layer(cors_layer(&server.allowed_origins))
}

/// CORS policy for the configured origins
///
/// `*` allows any origin without credentials. Other entries are matched
/// exactly, or as globs when they contain `*`, and any requested header is
/// allowed.
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let methods = [
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::DELETE,
        Method::OPTIONS,
    ];

    if allowed_origins.iter().any(|o| o == "*") {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(methods)
            .allow_headers(Any);
    }

    let patterns = allowed_origins.to_vec();
    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(
            move |origin: &HeaderValue, _parts: &Parts| {
                origin
                    .to_str()
                    .map(|origin| origin_allowed(&patterns, origin))
                    .unwrap_or(false)
            },
        ))
        .allow_methods(methods)
        .allow_headers(AllowHeaders::mirror_request())
        .expose_headers([header::CONTENT_TYPE, header::X_CONTENT_TYPE_OPTIONS])
        .allow_credentials(true)
}

fn origin_allowed(patterns: &[String], origin: &str) -> bool {
    patterns.iter().any(|pattern| {
        if pattern.contains('*') {
            glob_match::glob_match(pattern, origin)
        } else {
            pattern == origin
        }
    })
}

/// Binds the configured address and serves until Ctrl-C
///
/// # Errors
///
/// Returns error if the application state cannot be built or the address
/// cannot be bound
pub async fn start_server(config: &Config) -> Result<()> {
    let state = AppState::from_config(config)?;
    for agent in state.agents.iter() {
        tracing::info!("Mounted {} agent at {}", agent.slug(), agent.endpoint());
    }

    let app = build_router(state, &config.server);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .map_err(|e| SwarmError::Config(format!("Invalid address: {}", e)))?;

    tracing::info!("Starting agent router on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| SwarmError::Server(format!("Failed to bind {}: {}", addr, e)))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(SwarmError::Io)?;

    tracing::info!("Agent router stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
