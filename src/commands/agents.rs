use crate::catalog::{AgentDefinition, Catalog};
use crate::config::Config;
use crate::error::Result;
use colored::Colorize;
use prettytable::{format, Table};
use serde::Serialize;

const DESCRIPTION_WIDTH: usize = 48;

/// Machine-readable directory entry for `agents --json`
#[derive(Debug, Serialize)]
struct AgentListing<'a> {
    slug: &'a str,
    name: &'a str,
    description: &'a str,
    endpoint: String,
    repository: Option<&'a str>,
    project_url: Option<&'a str>,
    submission_url: Option<&'a str>,
}

impl<'a> From<&'a AgentDefinition> for AgentListing<'a> {
    fn from(def: &'a AgentDefinition) -> Self {
        Self {
            slug: &def.slug,
            name: &def.name,
            description: &def.description,
            endpoint: format!("/agents/{}", def.slug),
            repository: def.profile.repository_url(),
            project_url: def.profile.project_url(),
            submission_url: def.profile.submission_url(),
        }
    }
}

/// Print the configured agent catalog
///
/// # Errors
///
/// Returns error if the catalog cannot be loaded
pub fn list_agents(config: &Config, json: bool) -> Result<()> {
    let catalog = Catalog::load(&config.agents)?;

    if json {
        let listings: Vec<AgentListing<'_>> =
            catalog.definitions().iter().map(AgentListing::from).collect();
        println!("{}", serde_json::to_string_pretty(&listings)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BORDERS_ONLY);
    table.add_row(prettytable::row![
        "Slug".bold(),
        "Name".bold(),
        "Description".bold(),
        "Repository".bold()
    ]);

    for def in catalog.definitions() {
        table.add_row(prettytable::row![
            def.slug.cyan(),
            def.name,
            truncate(&def.description, DESCRIPTION_WIDTH),
            def.profile.repository_url().unwrap_or("-")
        ]);
    }

    println!("\nAgents:");
    table.printstd();
    println!();
    println!(
        "Use {} to talk to one from the terminal.",
        "agentswarm chat --agent <SLUG>".cyan()
    );
    println!();

    Ok(())
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let head: String = text.chars().take(width.saturating_sub(3)).collect();
        format!("{}...", head.trim_end())
    }
}
