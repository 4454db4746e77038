//! Text rendering of step graphs for CLI output.

use std::fmt::Write as _;

use ciplan_graph::{NodeIndex, Step, StepGraph};

/// Renders the forest as an indented tree, one line per step occurrence.
///
/// A step with several parents appears under each of them. A step that
/// would repeat one of its own ancestors is marked and not expanded.
#[must_use]
pub fn render_forest<S: Step + ?Sized>(graph: &StepGraph<'_, S>) -> String {
    let mut out = String::new();
    let mut path = Vec::new();
    for &root in graph.roots() {
        render_node(graph, root, 0, &mut path, &mut out);
    }
    out
}

fn render_node<S: Step + ?Sized>(
    graph: &StepGraph<'_, S>,
    index: NodeIndex,
    depth: usize,
    path: &mut Vec<NodeIndex>,
    out: &mut String,
) {
    let Some(node) = graph.node(index) else {
        return;
    };
    let indent = "  ".repeat(depth);
    let name = display_name(node.step().name());
    if path.contains(&index) {
        let _ = writeln!(out, "{indent}- {name} (cycle)");
        return;
    }
    let description = node.step().description();
    if description.is_empty() {
        let _ = writeln!(out, "{indent}- {name}");
    } else {
        let _ = writeln!(out, "{indent}- {name}: {description}");
    }
    path.push(index);
    for &child in node.children() {
        render_node(graph, child, depth + 1, path, out);
    }
    let _ = path.pop();
}

/// Substitutes a placeholder for steps that carry no name.
#[must_use]
pub fn display_name(name: &str) -> &str {
    if name.is_empty() { "<unnamed>" } else { name }
}
