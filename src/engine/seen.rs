//! Seen-set tracking.
//!
//! Membership is keyed by [`NodeId`], which is a plain arena index: holding
//! one never keeps a node alive and never lets the engine reach a node the
//! document has dropped. Entries for detached nodes are pruned after each scan.

use std::collections::HashSet;

use crate::dom::{Document, NodeId};

/// Nodes already evaluated by the classifier.
#[derive(Debug, Default)]
pub struct SeenSet {
    nodes: HashSet<NodeId>,
}

impl SeenSet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a node as evaluated.
    ///
    /// Returns `false` when it was already present.
    pub fn insert(&mut self, node_id: NodeId) -> bool {
        self.nodes.insert(node_id)
    }

    /// Check if a node has been evaluated
    #[must_use]
    pub fn contains(&self, node_id: NodeId) -> bool {
        self.nodes.contains(&node_id)
    }

    /// Number of tracked nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when nothing has been evaluated yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Drop every entry whose node is no longer attached to `doc`.
    ///
    /// Returns how many entries were dropped.
    pub fn prune_detached(&mut self, doc: &Document) -> usize {
        if self.nodes.is_empty() {
            return 0;
        }
        let live: HashSet<NodeId> = doc.select("*").nodes().iter().map(|n| n.id).collect();
        let before = self.nodes.len();
        self.nodes.retain(|id| live.contains(id));
        before - self.nodes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom;

    #[test]
    fn test_insert_and_contains() {
        let doc = dom::parse("<div><p>one</p><p>two</p><p>three</p></div>");
        let nodes: Vec<_> = doc.select("p").nodes().iter().map(|n| n.id).collect();

        let mut seen = SeenSet::new();
        assert!(seen.insert(nodes[0]));
        assert!(!seen.insert(nodes[0]));
        seen.insert(nodes[2]);

        assert!(seen.contains(nodes[0]));
        assert!(!seen.contains(nodes[1]));
        assert!(seen.contains(nodes[2]));
        assert_eq!(seen.len(), 2);
    }

    #[test]
    fn test_prune_drops_detached_nodes() {
        let doc = dom::parse("<html><body><ul><li>a</li><li>b</li></ul></body></html>");
        let items: Vec<_> = doc.select("li").nodes().to_vec();

        let mut seen = SeenSet::new();
        seen.insert(items[0].id);
        seen.insert(items[1].id);

        dom::remove(&items[0]);
        assert_eq!(seen.prune_detached(&doc), 1);
        assert!(!seen.contains(items[0].id));
        assert!(seen.contains(items[1].id));
    }

    #[test]
    fn test_replacement_node_is_unseen() {
        let doc = dom::parse("<html><body><ul><li>a</li></ul></body></html>");
        let old = doc.select("li").nodes()[0];

        let mut seen = SeenSet::new();
        seen.insert(old.id);
        dom::remove(&old);
        doc.select("ul").append_html("<li>a</li>");

        let new = doc.select("li").nodes()[0];
        assert_ne!(new.id, old.id);
        assert!(!seen.contains(new.id));
    }
}
