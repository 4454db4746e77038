//! `ciplan snapshot`: Write the step graph snapshot artifact.

use std::path::PathBuf;

use clap::Args;

use ciplan_common::config::PlanConfig;
use ciplan_common::constants::DEFAULT_MANIFEST_FILE;
use ciplan_graph::{build_partial_graph, step_graph_json_url};

/// Arguments for the `snapshot` command.
#[derive(Args, Debug)]
pub struct SnapshotArgs {
    /// Path to the step manifest.
    #[arg(default_value = DEFAULT_MANIFEST_FILE)]
    pub manifest: PathBuf,

    /// Only include these steps and what they depend on. May be repeated.
    #[arg(short, long)]
    pub target: Vec<String>,

    /// Directory to write the snapshot into, overriding the configuration.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Base job URL used to report where the snapshot is published.
    #[arg(long)]
    pub base_job_url: Option<String>,
}

/// Executes the `snapshot` command.
///
/// # Errors
///
/// Returns an error if the graph cannot be built, is cyclic while
/// verification is enabled, or the snapshot cannot be written.
pub fn execute(args: SnapshotArgs, config: PlanConfig) -> anyhow::Result<()> {
    let config = apply_overrides(config, args.output, args.base_job_url);
    let steps = crate::manifest::load_steps(&args.manifest)?;
    let graph = build_partial_graph(&steps, &args.target)?;
    if config.verify_acyclic {
        let _ = graph.execution_order()?;
    }

    let path = graph.snapshot().write_to(&config.artifact_dir)?;
    println!("Wrote {} step(s) to {}", graph.len(), path.display());
    if let Some(url) = published_url(&config) {
        println!("Published at {url}");
    }
    Ok(())
}

fn apply_overrides(
    mut config: PlanConfig,
    output: Option<PathBuf>,
    base_job_url: Option<String>,
) -> PlanConfig {
    if let Some(dir) = output {
        config.artifact_dir = dir;
    }
    if base_job_url.is_some() {
        config.base_job_url = base_job_url;
    }
    config
}

fn published_url(config: &PlanConfig) -> Option<String> {
    config.base_job_url.as_deref().map(step_graph_json_url)
}
