//! Graph diff output types.
//!
//! Collections are sorted `Vec`s built from `BTreeMap`/`BTreeSet` iteration so
//! serialization is deterministic.

use serde::{Deserialize, Serialize};

use crate::graph::{Graph, Node, NodeRef, PropertyValue, ResourceType, Triple};

/// High-level classification of the diff result.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DiffClassification {
    /// Both graphs hold the same assertions
    Identical,
    /// At least one assertion was inserted or deleted
    Changed,
}

/// A single property whose value differs between local and remote.
///
/// `old` is the local value, `new` the remote one; either may be absent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PropertyChange {
    pub key: String,
    pub old: Option<PropertyValue>,
    pub new: Option<PropertyValue>,
}

/// A node present in both graphs with at least one changed property
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NodeDelta {
    pub node: NodeRef,
    /// Ordered by property key
    pub changes: Vec<PropertyChange>,
}

/// A `parent_of` edge
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub struct Relation {
    pub parent: NodeRef,
    pub child: NodeRef,
}

/// The structured difference between a local and a remote graph.
///
/// Built once by [`compute_diff`](crate::diff::compute_diff) and read-only
/// afterwards. Both input graphs are retained (but not serialized) so the
/// display engine can resolve names and walk hierarchies.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GraphDiff {
    pub(crate) classification: DiffClassification,
    pub(crate) local_digest: String,
    pub(crate) remote_digest: String,
    /// Assertions in remote but not local, canonical order
    pub(crate) inserted: Vec<Triple>,
    /// Assertions in local but not remote, canonical order
    pub(crate) deleted: Vec<Triple>,
    pub(crate) inserted_nodes: Vec<NodeRef>,
    pub(crate) deleted_nodes: Vec<NodeRef>,
    pub(crate) modified_nodes: Vec<NodeDelta>,
    pub(crate) unchanged_relations: Vec<Relation>,
    pub(crate) inserted_relations: Vec<Relation>,
    pub(crate) deleted_relations: Vec<Relation>,
    #[serde(skip)]
    pub(crate) local: Graph,
    #[serde(skip)]
    pub(crate) remote: Graph,
}

impl GraphDiff {
    pub fn classification(&self) -> DiffClassification {
        self.classification
    }

    pub fn has_changes(&self) -> bool {
        self.classification == DiffClassification::Changed
    }

    pub fn local_digest(&self) -> &str {
        &self.local_digest
    }

    pub fn remote_digest(&self) -> &str {
        &self.remote_digest
    }

    /// Raw inserted assertions
    pub fn inserted(&self) -> &[Triple] {
        &self.inserted
    }

    /// Raw deleted assertions
    pub fn deleted(&self) -> &[Triple] {
        &self.deleted
    }

    /// Nodes present only in the remote graph, ordered by type then id
    pub fn inserted_nodes(&self) -> &[NodeRef] {
        &self.inserted_nodes
    }

    /// Nodes present only in the local graph, ordered by type then id
    pub fn deleted_nodes(&self) -> &[NodeRef] {
        &self.deleted_nodes
    }

    /// Nodes present in both graphs whose properties changed
    pub fn modified_nodes(&self) -> &[NodeDelta] {
        &self.modified_nodes
    }

    /// Edges present in both graphs
    pub fn unchanged_relations(&self) -> &[Relation] {
        &self.unchanged_relations
    }

    pub fn inserted_relations(&self) -> &[Relation] {
        &self.inserted_relations
    }

    pub fn deleted_relations(&self) -> &[Relation] {
        &self.deleted_relations
    }

    pub fn local(&self) -> &Graph {
        &self.local
    }

    pub fn remote(&self) -> &Graph {
        &self.remote
    }

    /// Resolve a node, preferring its remote state
    pub fn node(&self, reference: &NodeRef) -> Option<&Node> {
        self.remote
            .node(reference)
            .or_else(|| self.local.node(reference))
    }

    /// Resource types touched by a node-level change, alphabetically
    pub fn changed_types(&self) -> Vec<ResourceType> {
        let mut types: Vec<ResourceType> = self
            .inserted_nodes
            .iter()
            .chain(self.deleted_nodes.iter())
            .chain(self.modified_nodes.iter().map(|d| &d.node))
            .map(|r| r.resource_type)
            .collect();
        types.sort();
        types.dedup();
        types
    }
}
