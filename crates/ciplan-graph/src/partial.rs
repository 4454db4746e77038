//! Targeted graphs covering a subset of steps and their dependencies.

use tracing::{debug, info};

use ciplan_common::error::{CiplanError, Result};

use crate::graph::{StepGraph, build_graph};
use crate::link::{StepLink, has_any_links};
use crate::step::Step;

/// Builds the graph of the named steps plus every step they transitively
/// depend on.
///
/// An empty `names` list builds the full graph. Each step consumes at most
/// one matching name, so a name requested twice needs two steps carrying
/// it. Steps with an empty name are never targeted.
///
/// # Errors
///
/// Returns [`CiplanError::StepsNotFound`] listing every unmatched name and
/// all available step names when a name is missing or duplicated.
pub fn build_partial_graph<'a, S, N>(steps: &'a [S], names: &[N]) -> Result<StepGraph<'a, S>>
where
    S: Step,
    N: AsRef<str>,
{
    if names.is_empty() {
        return Ok(build_graph(steps));
    }

    let mut remaining: Vec<&str> = names.iter().map(AsRef::as_ref).collect();
    let mut selected = vec![false; steps.len()];
    let mut required: Vec<StepLink> = Vec::new();
    for (index, step) in steps.iter().enumerate() {
        let name = step.name();
        if name.is_empty() {
            continue;
        }
        if let Some(position) = remaining.iter().position(|wanted| *wanted == name) {
            let _ = remaining.remove(position);
            selected[index] = true;
            required.extend(step.requires());
        }
    }
    if !remaining.is_empty() {
        return Err(CiplanError::StepsNotFound {
            missing: remaining.into_iter().map(str::to_string).collect(),
            available: steps.iter().map(|step| step.name().to_string()).collect(),
        });
    }

    // pull in creators of anything required until a full pass adds nothing
    let mut pass = 0_usize;
    loop {
        pass += 1;
        let mut added = 0_usize;
        for (index, step) in steps.iter().enumerate() {
            if selected[index] {
                continue;
            }
            if has_any_links(&required, &step.creates()) {
                debug!(pass, step = step.name(), "step provides a required link");
                selected[index] = true;
                added += 1;
                required.extend(step.requires());
            }
        }
        if added == 0 {
            break;
        }
    }

    let targeted: Vec<&'a S> = steps
        .iter()
        .zip(&selected)
        .filter_map(|(step, &keep)| keep.then_some(step))
        .collect();
    info!(
        requested = names.len(),
        selected = targeted.len(),
        passes = pass,
        "resolved partial step graph"
    );
    Ok(StepGraph::from_steps(targeted))
}
