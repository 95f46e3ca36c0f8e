mod agents;
mod github;
mod health;

pub use agents::agent_routes;
pub use github::github_routes;
pub use health::health_routes;
