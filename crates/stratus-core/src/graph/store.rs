use sha2::{Digest as _, Sha256};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use super::model::{Node, NodeRef, Predicate, PropertyValue, ResourceType, Triple};

/// In-memory triple store for one inventory snapshot
///
/// Triples are kept as a set keyed by their canonical text form. Node,
/// parent and child indexes are maintained on insert so that the read
/// accessors used by the display engine never rescan the triple set.
/// When several assertions give the same property key, the one first in
/// canonical order decides the node's value, whatever the insertion order.
/// Not thread-safe for mutation; once built it is only read.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Graph {
    triples: BTreeMap<String, Triple>,
    nodes: BTreeMap<NodeRef, Node>,
    assignments: BTreeMap<(NodeRef, String), BTreeMap<String, Option<PropertyValue>>>,
    children: BTreeMap<NodeRef, BTreeSet<NodeRef>>,
    parents: BTreeMap<NodeRef, NodeRef>,
}

impl Graph {
    /// Create a new empty Graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from a sequence of assertions
    pub fn from_triples<I>(triples: I) -> Self
    where
        I: IntoIterator<Item = Triple>,
    {
        let mut graph = Self::new();
        for triple in triples {
            graph.add(triple);
        }
        graph
    }

    /// Insert an assertion; returns false when it was already present
    pub fn add(&mut self, triple: Triple) -> bool {
        let key = triple.key();
        if self.triples.contains_key(&key) {
            return false;
        }

        let subject = triple.subject.clone();
        self.node_entry(&subject);

        match &triple.predicate {
            Predicate::HasType { .. } => {}
            Predicate::Property { key: prop, value } => {
                let candidates = self
                    .assignments
                    .entry((subject.clone(), prop.clone()))
                    .or_default();
                candidates.insert(key.clone(), value.clone());
                let effective = candidates.values().next().cloned().flatten();
                if let Some(node) = self.nodes.get_mut(&subject) {
                    match effective {
                        Some(v) => {
                            node.properties.insert(prop.clone(), v);
                        }
                        None => {
                            node.properties.remove(prop);
                        }
                    }
                }
            }
            Predicate::ParentOf { child } => {
                self.node_entry(child);
                self.children
                    .entry(subject.clone())
                    .or_default()
                    .insert(child.clone());
                self.parents.insert(child.clone(), subject);
            }
        }

        self.triples.insert(key, triple);
        true
    }

    /// Declare a typed node
    pub fn add_resource(&mut self, node: &NodeRef) {
        self.add(Triple::has_type(node.clone()));
    }

    /// Attach a property value to a node
    pub fn set_property(&mut self, node: &NodeRef, key: &str, value: impl Into<PropertyValue>) {
        self.add(Triple::property(node.clone(), key, Some(value.into())));
    }

    /// Record a `parent_of` edge
    pub fn link(&mut self, parent: &NodeRef, child: &NodeRef) {
        self.add(Triple::parent_of(parent.clone(), child.clone()));
    }

    fn node_entry(&mut self, reference: &NodeRef) {
        if !self.nodes.contains_key(reference) {
            self.nodes
                .insert(reference.clone(), Node::new(reference.clone()));
        }
    }

    /// Resource types present, alphabetically
    pub fn types(&self) -> Vec<ResourceType> {
        let set: BTreeSet<ResourceType> = self.nodes.keys().map(|r| r.resource_type).collect();
        set.into_iter().collect()
    }

    /// Nodes of one type, ordered by id
    pub fn nodes_of_type(&self, resource_type: ResourceType) -> Vec<&Node> {
        self.nodes
            .values()
            .filter(|n| n.resource_type() == resource_type)
            .collect()
    }

    /// All nodes, ordered by type then id
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn node(&self, reference: &NodeRef) -> Option<&Node> {
        self.nodes.get(reference)
    }

    /// True when the node is mentioned by any assertion
    pub fn contains(&self, reference: &NodeRef) -> bool {
        self.nodes.contains_key(reference)
    }

    pub fn properties_of(&self, reference: &NodeRef) -> Option<&BTreeMap<String, PropertyValue>> {
        self.nodes.get(reference).map(Node::properties)
    }

    /// Children via `parent_of`, ordered by type, then id
    pub fn children_of(&self, reference: &NodeRef) -> Vec<&Node> {
        self.children
            .get(reference)
            .map(|set| set.iter().filter_map(|c| self.nodes.get(c)).collect())
            .unwrap_or_default()
    }

    pub fn parent_of(&self, reference: &NodeRef) -> Option<&Node> {
        self.parents.get(reference).and_then(|p| self.nodes.get(p))
    }

    /// Every `(parent, child)` edge, in canonical order
    pub fn relations(&self) -> impl Iterator<Item = (&NodeRef, &NodeRef)> {
        self.children
            .iter()
            .flat_map(|(parent, kids)| kids.iter().map(move |child| (parent, child)))
    }

    /// Every assertion, in canonical order
    pub fn triples(&self) -> impl Iterator<Item = &Triple> {
        self.triples.values()
    }

    pub fn contains_triple(&self, key: &str) -> bool {
        self.triples.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.triples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    /// SHA-256 over the canonical assertion list; equal graphs share a digest
    pub fn digest(&self) -> String {
        let mut hasher = Sha256::new();
        for key in self.triples.keys() {
            hasher.update(key.as_bytes());
            hasher.update(b"\n");
        }
        hex::encode(hasher.finalize())
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for triple in self.triples.values() {
            writeln!(f, "{}", triple)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instance(id: &str) -> NodeRef {
        NodeRef::new(ResourceType::Instance, id)
    }

    #[test]
    fn test_add_is_set_semantics() {
        let mut g = Graph::new();
        assert!(g.add(Triple::has_type(instance("i1"))));
        assert!(!g.add(Triple::has_type(instance("i1"))));
        assert_eq!(g.len(), 1);
    }

    #[test]
    fn test_nodes_of_type_ordered_by_id() {
        let mut g = Graph::new();
        for id in ["i3", "i1", "i2"] {
            g.add_resource(&instance(id));
        }
        g.add_resource(&NodeRef::new(ResourceType::Subnet, "s1"));

        let ids: Vec<&str> = g
            .nodes_of_type(ResourceType::Instance)
            .iter()
            .map(|n| n.id())
            .collect();
        assert_eq!(ids, vec!["i1", "i2", "i3"]);
        assert_eq!(g.types(), vec![ResourceType::Instance, ResourceType::Subnet]);
    }

    #[test]
    fn test_children_ordered_by_type_then_id() {
        let mut g = Graph::new();
        let vpc = NodeRef::new(ResourceType::Vpc, "vpc_1");
        let sub = NodeRef::new(ResourceType::Subnet, "sub_9");
        let zed = instance("i_a");
        let alpha = instance("i_b");

        g.add_resource(&vpc);
        for child in [&sub, &zed, &alpha] {
            g.add_resource(child);
            g.link(&vpc, child);
        }
        g.set_property(&zed, "Name", "zed");
        g.set_property(&alpha, "Name", "alpha");

        let order: Vec<&str> = g.children_of(&vpc).iter().map(|n| n.id()).collect();
        assert_eq!(order, vec!["i_a", "i_b", "sub_9"]);
        assert_eq!(g.parent_of(&sub).map(|n| n.id()), Some("vpc_1"));
    }

    #[test]
    fn test_digest_ignores_insertion_order() {
        let a = Graph::from_triples(vec![
            Triple::has_type(instance("i1")),
            Triple::property(instance("i1"), "Name", Some("web".into())),
        ]);
        let b = Graph::from_triples(vec![
            Triple::property(instance("i1"), "Name", Some("web".into())),
            Triple::has_type(instance("i1")),
        ]);
        assert_eq!(a.digest(), b.digest());

        let mut c = b.clone();
        c.set_property(&instance("i1"), "State", "running");
        assert_ne!(a.digest(), c.digest());
    }

    #[test]
    fn test_conflicting_property_resolved_in_canonical_order() {
        let low = Triple::property(instance("i1"), "State", Some("running".into()));
        let high = Triple::property(instance("i1"), "State", Some("stopped".into()));
        assert!(low.key() < high.key());

        let forward = Graph::from_triples(vec![low.clone(), high.clone()]);
        let backward = Graph::from_triples(vec![high, low]);

        let state = |g: &Graph| g.node(&instance("i1")).and_then(|n| n.property("State")).cloned();
        assert_eq!(state(&forward), Some(PropertyValue::Text("running".to_string())));
        assert_eq!(state(&forward), state(&backward));
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_missing_node_has_no_properties() {
        let g = Graph::new();
        assert!(g.properties_of(&instance("ghost")).is_none());
        assert!(g.children_of(&instance("ghost")).is_empty());
    }
}
