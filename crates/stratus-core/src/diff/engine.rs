//! Graph diff computation engine.
//!
//! The core entry point is [`compute_diff`], which compares two graphs as sets
//! of canonical assertions and groups the raw delta per node.

use std::collections::{BTreeMap, BTreeSet};
use std::time::Instant;

use crate::diff::model::{DiffClassification, GraphDiff, NodeDelta, PropertyChange, Relation};
use crate::graph::{Graph, NodeRef, Predicate, Triple};
use crate::{log_op_end, log_op_start};

/// Assertions of `a` absent from `b`, in canonical order.
fn subtract(a: &Graph, b: &Graph) -> Vec<Triple> {
    a.triples()
        .filter(|t| !b.contains_triple(&t.key()))
        .cloned()
        .collect()
}

fn relations_of(triples: &[Triple]) -> Vec<Relation> {
    triples
        .iter()
        .filter_map(|t| match &t.predicate {
            Predicate::ParentOf { child } => Some(Relation {
                parent: t.subject.clone(),
                child: child.clone(),
            }),
            _ => None,
        })
        .collect()
}

/// Nodes mentioned by `a` but not by `b`, ordered by type then id.
fn missing_nodes(a: &Graph, b: &Graph) -> Vec<NodeRef> {
    a.nodes()
        .map(|n| n.reference())
        .filter(|r| !b.contains(r))
        .cloned()
        .collect()
}

/// Property-level deltas for nodes that exist on both sides.
///
/// Only nodes touched by a raw property insertion or deletion are inspected.
/// Old and new values come from the node state in each graph, so a key whose
/// effective value did not change is not reported.
fn modified_nodes(
    local: &Graph,
    remote: &Graph,
    inserted: &[Triple],
    deleted: &[Triple],
) -> Vec<NodeDelta> {
    let mut touched: BTreeMap<&NodeRef, BTreeSet<&str>> = BTreeMap::new();
    for triple in inserted.iter().chain(deleted.iter()) {
        if let Predicate::Property { key, .. } = &triple.predicate {
            if local.contains(&triple.subject) && remote.contains(&triple.subject) {
                touched
                    .entry(&triple.subject)
                    .or_default()
                    .insert(key.as_str());
            }
        }
    }

    touched
        .into_iter()
        .filter_map(|(node, keys)| {
            let old_props = local.properties_of(node);
            let new_props = remote.properties_of(node);
            let changes: Vec<PropertyChange> = keys
                .into_iter()
                .filter_map(|key| {
                    let old = old_props.and_then(|p| p.get(key)).cloned();
                    let new = new_props.and_then(|p| p.get(key)).cloned();
                    (old != new).then(|| PropertyChange {
                        key: key.to_string(),
                        old,
                        new,
                    })
                })
                .collect();
            (!changes.is_empty()).then(|| NodeDelta {
                node: node.clone(),
                changes,
            })
        })
        .collect()
}

/// Compute a structured, deterministic diff between a local and a remote graph.
///
/// Insertions are assertions in `remote` but not in `local`; deletions the
/// reverse. Equality is exact on the canonical assertion form. Nodes are then
/// classified as inserted, deleted or modified; a node removed and re-added
/// under the same key is never folded into a modification, and relation-only
/// changes do not mark a node modified.
pub fn compute_diff(local: &Graph, remote: &Graph) -> GraphDiff {
    let start = Instant::now();
    log_op_start!("compute_diff", local_triples = local.len(), remote_triples = remote.len());

    let local_digest = local.digest();
    let remote_digest = remote.digest();

    // Fast-path: identical assertion sets
    if local_digest == remote_digest {
        let relations = local
            .relations()
            .map(|(parent, child)| Relation {
                parent: parent.clone(),
                child: child.clone(),
            })
            .collect();
        log_op_end!(
            "compute_diff",
            duration_ms = start.elapsed().as_millis() as u64,
            inserted_count = 0usize,
            deleted_count = 0usize
        );
        return GraphDiff {
            classification: DiffClassification::Identical,
            local_digest,
            remote_digest,
            inserted: Vec::new(),
            deleted: Vec::new(),
            inserted_nodes: Vec::new(),
            deleted_nodes: Vec::new(),
            modified_nodes: Vec::new(),
            unchanged_relations: relations,
            inserted_relations: Vec::new(),
            deleted_relations: Vec::new(),
            local: local.clone(),
            remote: remote.clone(),
        };
    }

    let inserted = subtract(remote, local);
    let deleted = subtract(local, remote);

    let unchanged_relations = local
        .relations()
        .filter(|(parent, child)| {
            remote.contains_triple(&Triple::parent_of((*parent).clone(), (*child).clone()).key())
        })
        .map(|(parent, child)| Relation {
            parent: parent.clone(),
            child: child.clone(),
        })
        .collect();

    let diff = GraphDiff {
        classification: DiffClassification::Changed,
        inserted_nodes: missing_nodes(remote, local),
        deleted_nodes: missing_nodes(local, remote),
        modified_nodes: modified_nodes(local, remote, &inserted, &deleted),
        unchanged_relations,
        inserted_relations: relations_of(&inserted),
        deleted_relations: relations_of(&deleted),
        local_digest,
        remote_digest,
        inserted,
        deleted,
        local: local.clone(),
        remote: remote.clone(),
    };

    log_op_end!(
        "compute_diff",
        duration_ms = start.elapsed().as_millis() as u64,
        inserted_count = diff.inserted.len(),
        deleted_count = diff.deleted.len()
    );
    diff
}
