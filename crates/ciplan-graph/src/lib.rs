//! # ciplan-graph
//!
//! Dependency resolution for CI pipeline steps.
//!
//! Handles:
//! - **Link**: Typed resource references and the satisfiability relation.
//! - **Naming**: Conventions between releases and their image streams.
//! - **Step**: The contract steps expose to resolution.
//! - **Graph**: Full dependency forest construction.
//! - **Partial**: Targeted graphs over a subset of steps.
//! - **Snapshot**: JSON export of a computed graph.

pub mod graph;
pub mod link;
pub mod naming;
pub mod partial;
pub mod snapshot;
pub mod step;

pub use graph::{StepGraph, StepNode, build_graph};
pub use link::{StepLink, has_all_links, has_any_links};
pub use partial::build_partial_graph;
pub use petgraph::graph::NodeIndex;
pub use snapshot::{StepGraphSnapshot, StepWithDependencies, step_graph_json_url};
pub use step::{DeclaredStep, Step};
