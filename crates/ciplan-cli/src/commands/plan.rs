//! `ciplan plan`: Resolve the step graph and print it.

use std::path::PathBuf;

use clap::Args;

use ciplan_common::config::PlanConfig;
use ciplan_common::constants::DEFAULT_MANIFEST_FILE;
use ciplan_graph::{Step, build_partial_graph};

use crate::output::{display_name, render_forest};

/// Arguments for the `plan` command.
#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Path to the step manifest.
    #[arg(default_value = DEFAULT_MANIFEST_FILE)]
    pub manifest: PathBuf,

    /// Only plan these steps and what they depend on. May be repeated.
    #[arg(short, long)]
    pub target: Vec<String>,

    /// Print the graph snapshot as JSON instead of a tree.
    #[arg(long)]
    pub json: bool,
}

/// Executes the `plan` command.
///
/// Loads the manifest, builds the (partial) graph, and prints the forest
/// followed by an execution order when acyclicity is verified.
///
/// # Errors
///
/// Returns an error if the manifest is invalid, a target is unknown, or
/// the graph is cyclic while verification is enabled.
pub fn execute(args: PlanArgs, config: &PlanConfig) -> anyhow::Result<()> {
    let steps = crate::manifest::load_steps(&args.manifest)?;
    let graph = build_partial_graph(&steps, &args.target)?;
    let order = if config.verify_acyclic {
        Some(graph.execution_order()?)
    } else {
        None
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&graph.snapshot())?);
        return Ok(());
    }

    println!("Step graph for: {}", args.manifest.display());
    println!();
    print!("{}", render_forest(&graph));
    println!();
    println!("  {} step(s) planned, {} root(s).", graph.len(), graph.roots().len());

    if let Some(order) = order {
        println!();
        println!("  Execution order:");
        for (position, step) in order.iter().enumerate() {
            println!("    {}. {}", position + 1, display_name(step.name()));
        }
    }

    Ok(())
}
