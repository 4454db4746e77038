//! CLI command definitions and dispatch.

pub mod diff;
pub mod plan;
pub mod snapshot;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};

use ciplan_common::config::PlanConfig;

/// ciplan: Dependency graph planner for CI pipeline steps.
#[derive(Parser, Debug)]
#[command(name = "ciplan", version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,

    /// Path to a YAML planning configuration file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    pub log_json: bool,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve the step graph and print it as a tree.
    Plan(plan::PlanArgs),
    /// Write the step graph snapshot artifact.
    Snapshot(snapshot::SnapshotArgs),
    /// Compare two step graph snapshots.
    Diff(diff::DiffArgs),
}

/// Dispatches the parsed CLI command to its handler.
///
/// # Errors
///
/// Returns an error if the command execution fails.
pub fn execute(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(cli.config.as_deref())?;
    match cli.command {
        Command::Plan(args) => plan::execute(args, &config),
        Command::Snapshot(args) => snapshot::execute(args, config),
        Command::Diff(args) => diff::execute(args),
    }
}

/// Loads the planning configuration, falling back to defaults when no
/// file is given.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<PlanConfig> {
    let Some(path) = path else {
        return Ok(PlanConfig::default());
    };
    tracing::info!(path = %path.display(), "loading planning configuration");
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    serde_yaml::from_str(&content)
        .with_context(|| format!("failed to parse config {}", path.display()))
}
