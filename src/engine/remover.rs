//! Container-boundary search and removal.

use log::{debug, info};

use crate::dom::{self, Document, NodeRef};
use crate::keywords::KeywordHit;
use crate::notify::RemovalEvent;

/// Finds the whole-card ancestor of a flagged node and detaches it.
#[derive(Debug, Clone)]
pub struct Remover {
    max_depth: usize,
    markers: Vec<String>,
}

impl Remover {
    /// Build a remover testing at most `max_depth` elements per walk.
    #[must_use]
    pub fn new(max_depth: usize, markers: &[String]) -> Self {
        Self {
            max_depth,
            markers: markers.iter().map(|m| m.to_lowercase()).collect(),
        }
    }

    /// Does this element look like a whole result card?
    #[must_use]
    pub fn is_container(&self, node: &NodeRef) -> bool {
        let class = dom::class_lower(node);
        self.markers.iter().any(|m| class.contains(m.as_str()))
            || dom::tag_name(node).as_deref() == Some("li")
            || dom::role(node) == "listitem"
    }

    /// Walk upward from `node` to the deletion target.
    ///
    /// The first element (the node itself included) that looks like a
    /// container wins. The walk tests at most `max_depth` elements and stops at
    /// the content root; without a qualifying ancestor it falls back to `node`.
    #[must_use]
    pub fn find_container<'a>(&self, node: NodeRef<'a>, root: &NodeRef) -> NodeRef<'a> {
        let mut current = Some(node);
        let mut steps = 0;

        while let Some(candidate) = current {
            if candidate.id == root.id || steps >= self.max_depth {
                break;
            }
            if self.is_container(&candidate) {
                return candidate;
            }
            current = dom::parent_element(&candidate);
            steps += 1;
        }

        node
    }

    /// Detach the container of a flagged node.
    ///
    /// Returns `None` when the node is already detached or the target is not
    /// strictly inside the content root.
    pub fn remove(&self, doc: &Document, node: NodeRef, hit: &KeywordHit) -> Option<RemovalEvent> {
        let root = dom::content_root(doc)?;
        if !dom::is_attached(doc, &node) {
            return None;
        }

        let target = self.find_container(node, &root);
        if !dom::is_inside(&target, &root) {
            debug!(
                "Refusing to remove <{}> outside the content root",
                dom::tag_name(&target).unwrap_or_default()
            );
            return None;
        }

        let tag = dom::tag_name(&target).unwrap_or_default();
        dom::remove(&target);
        info!(
            "Removed {} flight <{}> from DOM (matched {:?})",
            hit.reason, tag, hit.keyword
        );

        Some(RemovalEvent {
            node: target.id,
            reason: hit.reason,
            keyword: hit.keyword.clone(),
            tag,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keywords::Reason;
    use crate::Options;

    fn remover() -> Remover {
        let opts = Options::default();
        Remover::new(opts.max_container_depth, &opts.container_markers)
    }

    fn hit() -> KeywordHit {
        KeywordHit {
            reason: Reason::Airline,
            keyword: "vistara".to_string(),
        }
    }

    #[test]
    fn test_container_predicates() {
        let doc = dom::parse(
            r#"<html><body>
                <div id="a" class="Search-RESULT">x</div>
                <ul><li id="b">x</li></ul>
                <div id="c" role="listitem">x</div>
                <div id="d" class="price">x</div>
            </body></html>"#,
        );
        let r = remover();
        for id in ["#a", "#b", "#c"] {
            assert!(r.is_container(&doc.select(id).nodes()[0]), "{id} should be a container");
        }
        assert!(!r.is_container(&doc.select("#d").nodes()[0]));
    }

    #[test]
    fn test_walk_finds_card_five_levels_up() {
        let doc = dom::parse(
            r#"<html><body><section class="results-wrapper"><div class="flight-card" id="card">
                <div><div><div><div><span id="leaf">Vistara</span></div></div></div></div>
            </div></section></body></html>"#,
        );
        let leaf = doc.select("#leaf").nodes()[0];
        let root = dom::content_root(&doc).unwrap();

        let target = remover().find_container(leaf, &root);
        assert_eq!(dom::attr(&target, "id").as_deref(), Some("card"));
    }

    #[test]
    fn test_walk_is_bounded() {
        let doc = dom::parse(
            r#"<html><body><div class="flight-card">
                <div><div><div><div><div><div><div><div><span id="leaf">x</span></div></div></div></div></div></div></div></div>
            </div></body></html>"#,
        );
        let leaf = doc.select("#leaf").nodes()[0];
        let root = dom::content_root(&doc).unwrap();

        let target = remover().find_container(leaf, &root);
        assert_eq!(target.id, leaf.id);
    }

    #[test]
    fn test_walk_stops_at_content_root() {
        let doc = dom::parse(r#"<html><body class="flight-card"><div><p id="leaf">x</p></div></body></html>"#);
        let leaf = doc.select("#leaf").nodes()[0];
        let root = dom::content_root(&doc).unwrap();

        let target = remover().find_container(leaf, &root);
        assert_eq!(target.id, leaf.id);
    }

    #[test]
    fn test_remove_detaches_container_and_reports() {
        let doc = dom::parse(
            r#"<html><body><ul><li id="card"><div><span id="leaf">Vistara</span></div></li></ul></body></html>"#,
        );
        let leaf = doc.select("#leaf").nodes()[0];

        let event = remover().remove(&doc, leaf, &hit()).unwrap();
        assert_eq!(event.tag, "li");
        assert_eq!(event.reason, Reason::Airline);
        assert!(doc.select("#card").is_empty());
        assert_eq!(doc.select("ul").length(), 1);
    }

    #[test]
    fn test_remove_never_deletes_body() {
        let doc = dom::parse(r#"<html><body role="listitem"><p id="x">x</p></body></html>"#);
        let body = dom::content_root(&doc).unwrap();

        assert!(remover().remove(&doc, body, &hit()).is_none());
        assert_eq!(doc.select("body").length(), 1);
    }

    #[test]
    fn test_remove_never_deletes_document_element() {
        let doc = dom::parse(
            r#"<html class="flight-app"><body><p>Vistara, Economy, ₹5400</p></body></html>"#,
        );
        let html = doc.select("html").nodes()[0];

        assert!(remover().remove(&doc, html, &hit()).is_none());
        assert_eq!(doc.select("body").length(), 1);
    }

    #[test]
    fn test_remove_stale_node_is_noop() {
        let doc = dom::parse(r#"<html><body><ul><li id="card">x</li></ul></body></html>"#);
        let li = doc.select("#card").nodes()[0];
        dom::remove(&li);

        assert!(remover().remove(&doc, li, &hit()).is_none());
    }
}
