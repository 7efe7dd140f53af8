//! Hierarchical listing following `parent_of` edges from a root node.

use std::collections::{BTreeMap, BTreeSet};

use super::options::Source;
use crate::diff::GraphDiff;
use crate::errors::{Result, StratusError};
use crate::graph::{Graph, Node, NodeRef};

/// One printed node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeLine {
    /// `+` or `-` for subtrees present on one side of a diff only
    pub mark: Option<char>,
    pub depth: usize,
    pub label: String,
}

impl TreeLine {
    fn new(node: &Node, depth: usize, mark: Option<char>) -> Self {
        Self {
            mark,
            depth,
            label: format!("{}, {}", node.resource_type(), node.id()),
        }
    }

    /// `<mark><tabs><type>, <id>` without the newline
    pub fn render(&self) -> String {
        let mut out = String::new();
        if let Some(mark) = self.mark {
            out.push(mark);
        }
        out.push_str(&"\t".repeat(self.depth));
        out.push_str(&self.label);
        out
    }
}

fn not_found(root: &NodeRef) -> StratusError {
    StratusError::RootNotFound {
        node: format!("{}/{}", root.resource_type, root.id),
    }
}

/// Depth-first lines starting at `root`
pub fn build(source: Source<'_>, root: &NodeRef) -> Result<Vec<TreeLine>> {
    let mut out = Vec::new();
    match source {
        Source::Graph(graph) => {
            let node = graph.node(root).ok_or_else(|| not_found(root))?;
            walk_graph(graph, node, 0, &mut BTreeSet::new(), &mut out);
        }
        Source::Diff(diff) => {
            let mark = match (diff.local().contains(root), diff.remote().contains(root)) {
                (true, true) => None,
                (false, true) => Some('+'),
                (true, false) => Some('-'),
                (false, false) => return Err(not_found(root)),
            };
            walk_diff(diff, root, 0, mark, &mut BTreeSet::new(), &mut out);
        }
    }
    Ok(out)
}

fn walk_graph<'g>(
    graph: &'g Graph,
    node: &'g Node,
    depth: usize,
    path: &mut BTreeSet<&'g NodeRef>,
    out: &mut Vec<TreeLine>,
) {
    if !path.insert(node.reference()) {
        return;
    }
    out.push(TreeLine::new(node, depth, None));
    for child in graph.children_of(node.reference()) {
        walk_graph(graph, child, depth + 1, path, out);
    }
    path.remove(node.reference());
}

/// Children on either side of the diff with the mark their edge implies,
/// ordered by type then id
fn diff_children<'d>(diff: &'d GraphDiff, parent: &NodeRef) -> Vec<(&'d Node, Option<char>)> {
    let mut sides: BTreeMap<&NodeRef, (bool, bool)> = BTreeMap::new();
    for child in diff.local().children_of(parent) {
        sides.entry(child.reference()).or_default().0 = true;
    }
    for child in diff.remote().children_of(parent) {
        sides.entry(child.reference()).or_default().1 = true;
    }

    sides
        .into_iter()
        .filter_map(|(reference, (in_local, in_remote))| {
            let mark = match (in_local, in_remote) {
                (true, false) => Some('-'),
                (false, true) => Some('+'),
                _ => None,
            };
            diff.node(reference).map(|node| (node, mark))
        })
        .collect()
}

fn walk_diff(
    diff: &GraphDiff,
    reference: &NodeRef,
    depth: usize,
    mark: Option<char>,
    path: &mut BTreeSet<NodeRef>,
    out: &mut Vec<TreeLine>,
) {
    let Some(node) = diff.node(reference) else {
        return;
    };
    if !path.insert(reference.clone()) {
        return;
    }
    out.push(TreeLine::new(node, depth, mark));
    for (child, edge_mark) in diff_children(diff, reference) {
        walk_diff(diff, child.reference(), depth + 1, mark.or(edge_mark), path, out);
    }
    path.remove(reference);
}
