//! Step dependency forest built on `petgraph`.
//!
//! Every step becomes a node. An edge runs from a step creating a link to
//! each step requiring something that link satisfies, so the creator is a
//! parent that runs first. Steps with no satisfied requirement are roots.

use std::fmt;

use petgraph::graph::{DiGraph, NodeIndex};
use tracing::{debug, info};

use ciplan_common::error::{CiplanError, Result};

use crate::link::StepLink;
use crate::step::Step;

/// A step in the graph together with the steps that must run after it.
pub struct StepNode<'a, S: ?Sized> {
    step: &'a S,
    children: Vec<NodeIndex>,
}

impl<'a, S: ?Sized> StepNode<'a, S> {
    /// Returns the wrapped step.
    #[must_use]
    pub const fn step(&self) -> &'a S {
        self.step
    }

    /// Returns the direct children, in step input order.
    #[must_use]
    pub fn children(&self) -> &[NodeIndex] {
        &self.children
    }
}

impl<S: Step + ?Sized> fmt::Debug for StepNode<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepNode")
            .field("step", &self.step.name())
            .field("children", &self.children)
            .finish()
    }
}

/// A forest of step nodes produced by one graph construction.
///
/// Node indices follow the order in which steps were supplied.
pub struct StepGraph<'a, S: ?Sized> {
    graph: DiGraph<StepNode<'a, S>, ()>,
    roots: Vec<NodeIndex>,
}

impl<'a, S: Step + ?Sized> StepGraph<'a, S> {
    /// Builds the forest over `steps`, comparing every requirement of each
    /// step against every creation of every other step.
    pub(crate) fn from_steps(steps: Vec<&'a S>) -> Self {
        let requires: Vec<Vec<StepLink>> = steps.iter().map(|s| s.requires()).collect();
        let creates: Vec<Vec<StepLink>> = steps.iter().map(|s| s.creates()).collect();

        let mut graph = DiGraph::with_capacity(steps.len(), steps.len());
        for step in steps {
            let _ = graph.add_node(StepNode {
                step,
                children: Vec::new(),
            });
        }
        let indices: Vec<NodeIndex> = graph.node_indices().collect();

        let mut roots = Vec::new();
        for &node in &indices {
            let mut is_root = true;
            for &other in &indices {
                if node == other {
                    continue;
                }
                let satisfied = requires[node.index()].iter().any(|needed| {
                    creates[other.index()]
                        .iter()
                        .any(|created| needed.satisfied_by(created))
                });
                if satisfied {
                    is_root = false;
                    add_child(&mut graph, other, node);
                }
            }
            if is_root {
                roots.push(node);
            }
        }

        info!(
            steps = graph.node_count(),
            edges = graph.edge_count(),
            roots = roots.len(),
            "built step graph"
        );
        Self { graph, roots }
    }

    /// Returns the root nodes, in step input order.
    #[must_use]
    pub fn roots(&self) -> &[NodeIndex] {
        &self.roots
    }

    /// Returns the node at `index`, if it belongs to this graph.
    #[must_use]
    pub fn node(&self, index: NodeIndex) -> Option<&StepNode<'a, S>> {
        self.graph.node_weight(index)
    }

    /// Iterates over every node in step input order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeIndex, &StepNode<'a, S>)> {
        self.graph
            .node_indices()
            .map(move |index| (index, &self.graph[index]))
    }

    /// Number of steps in the graph.
    #[must_use]
    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns `true` if the graph holds no steps.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Returns the name of the step at `index`.
    #[must_use]
    pub fn name_of(&self, index: NodeIndex) -> Option<&'a str> {
        self.node(index).map(|node| node.step().name())
    }

    /// Names of every step in the graph, in input order.
    #[must_use]
    pub fn step_names(&self) -> Vec<&'a str> {
        self.nodes().map(|(_, node)| node.step().name()).collect()
    }

    /// Names of the root steps, in input order.
    #[must_use]
    pub fn root_names(&self) -> Vec<&'a str> {
        self.roots
            .iter()
            .filter_map(|&index| self.name_of(index))
            .collect()
    }

    /// Nodes that list `index` as a child, in step input order.
    #[must_use]
    pub fn parents_of(&self, index: NodeIndex) -> Vec<NodeIndex> {
        self.nodes()
            .filter(|(_, node)| node.children.contains(&index))
            .map(|(parent, _)| parent)
            .collect()
    }

    /// Returns the steps in an order where every parent precedes its
    /// children.
    ///
    /// # Errors
    ///
    /// Returns [`CiplanError::CyclicDependency`] if steps depend on each
    /// other in a cycle.
    pub fn execution_order(&self) -> Result<Vec<&'a S>> {
        match petgraph::algo::toposort(&self.graph, None) {
            Ok(indices) => Ok(indices
                .into_iter()
                .map(|index| self.graph[index].step)
                .collect()),
            Err(cycle) => Err(CiplanError::CyclicDependency {
                step: self.graph[cycle.node_id()].step.name().to_string(),
            }),
        }
    }
}

impl<S: Step + ?Sized> fmt::Debug for StepGraph<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepGraph")
            .field("nodes", &self.graph.node_weights().collect::<Vec<_>>())
            .field("roots", &self.roots)
            .finish()
    }
}

/// Attaches `child` under `parent` unless it is already there.
fn add_child<S: Step + ?Sized>(
    graph: &mut DiGraph<StepNode<'_, S>, ()>,
    parent: NodeIndex,
    child: NodeIndex,
) {
    if graph[parent].children.contains(&child) {
        return;
    }
    debug!(
        parent = graph[parent].step.name(),
        child = graph[child].step.name(),
        "linking steps"
    );
    graph[parent].children.push(child);
    let _ = graph.add_edge(parent, child, ());
}

/// Builds the forest of every step given.
///
/// Roots and children follow the order of `steps`. A requirement that no
/// other step creates is left unsatisfied without error.
#[must_use]
pub fn build_graph<S: Step>(steps: &[S]) -> StepGraph<'_, S> {
    StepGraph::from_steps(steps.iter().collect())
}
