//! Script-friendly output: one value per line, no headers.

use super::grid::Grid;
use super::options::Format;
use super::render::{unsupported, Render, View};
use crate::diff::GraphDiff;
use crate::errors::Result;
use crate::graph::{Graph, Node, NodeRef};

#[derive(Debug, Clone, Copy)]
pub struct PorcelainRenderer;

impl Render for PorcelainRenderer {
    fn render(&self, view: &View) -> Result<String> {
        match view {
            View::Grid(grid) => Ok(render_grid(grid)),
            View::Ids(lines) => Ok(lines.join("\n")),
            other => Err(unsupported(Format::Porcelain, other)),
        }
    }
}

/// Every cell in row order; grouping blanks of multi-type listings are skipped
fn render_grid(grid: &Grid) -> String {
    let mut lines = Vec::new();
    for row in &grid.rows {
        for cell in row {
            if grid.sparse && cell.is_empty() {
                continue;
            }
            lines.push(cell.joined());
        }
    }
    lines.join("\n")
}

fn push_node(lines: &mut Vec<String>, node: &Node) {
    lines.push(node.id().to_string());
    if let Some(name) = node.name() {
        lines.push(name);
    }
}

/// Id then non-empty name for every node, types alphabetically, ids ascending
pub fn graph_ids(graph: &Graph) -> Vec<String> {
    let mut lines = Vec::new();
    for resource_type in graph.types() {
        for node in graph.nodes_of_type(resource_type) {
            push_node(&mut lines, node);
        }
    }
    lines
}

/// Id then non-empty name for every changed node
pub fn diff_ids(diff: &GraphDiff) -> Vec<String> {
    let mut changed: Vec<&NodeRef> = diff
        .inserted_nodes()
        .iter()
        .chain(diff.deleted_nodes())
        .chain(diff.modified_nodes().iter().map(|d| &d.node))
        .collect();
    changed.sort();

    let mut lines = Vec::new();
    for reference in changed {
        if let Some(node) = diff.node(reference) {
            push_node(&mut lines, node);
        }
    }
    lines
}
