//! DOM Operations Adapter
//!
//! Thin helpers over the `dom_query` crate covering what the engine needs:
//! attribute access, node identity, attachment tests, the content root and
//! text extraction. Everything works on [`NodeRef`] so node identity stays
//! explicit.

// Re-export core types for external use
pub use dom_query::{Document, NodeId, NodeRef, Selection};

// Re-export StrTendril for external use
pub use tendril::StrTendril;

// === Parsing ===

/// Parse an HTML document.
#[inline]
#[must_use]
pub fn parse(html: &str) -> Document {
    Document::from(html)
}

// === Attribute Operations ===

/// Get any attribute value
#[inline]
#[must_use]
pub fn attr(node: &NodeRef, name: &str) -> Option<StrTendril> {
    node.attr(name)
}

/// Get the class attribute, lowercased (empty when absent)
#[must_use]
pub fn class_lower(node: &NodeRef) -> String {
    node.attr("class")
        .map(|c| c.to_lowercase())
        .unwrap_or_default()
}

/// Get the ARIA role attribute (empty when absent)
#[must_use]
pub fn role(node: &NodeRef) -> String {
    node.attr("role").map(|r| r.to_string()).unwrap_or_default()
}

// === Tag/Node Information ===

/// Get tag name (lowercase)
#[must_use]
pub fn tag_name(node: &NodeRef) -> Option<String> {
    node.node_name().map(|t| t.to_lowercase())
}

// === Tree Navigation ===

/// Get the parent element, skipping the document node itself.
#[must_use]
pub fn parent_element<'a>(node: &NodeRef<'a>) -> Option<NodeRef<'a>> {
    node.parent().filter(NodeRef::is_element)
}

/// The document's top-level content root (`<body>`), if present.
#[must_use]
pub fn content_root(doc: &Document) -> Option<NodeRef<'_>> {
    doc.select("body").nodes().first().copied()
}

/// Check whether a node is still reachable from the document root.
///
/// Nodes removed by either the host page or the engine keep their identity
/// in the arena but lose their path to the root.
#[must_use]
pub fn is_attached(doc: &Document, node: &NodeRef) -> bool {
    let root = doc.root().id;
    let mut current = *node;
    while let Some(parent) = current.parent() {
        current = parent;
    }
    current.id == root && node.id != root
}

/// Whether `ancestor` is a proper ancestor of `node`.
#[must_use]
pub fn is_inside(node: &NodeRef, ancestor: &NodeRef) -> bool {
    let mut current = node.parent();
    while let Some(parent) = current {
        if parent.id == ancestor.id {
            return true;
        }
        current = parent.parent();
    }
    false
}

/// Count element nodes in a node and all its descendants.
#[must_use]
pub fn count_elements(node: &NodeRef) -> usize {
    let own = usize::from(node.is_element());
    own + node.children().iter().map(count_elements).sum::<usize>()
}

// === Text Content ===

/// Get all text content of node and descendants
#[inline]
#[must_use]
pub fn text_content(node: &NodeRef) -> StrTendril {
    node.text()
}

/// Get inner HTML content
#[inline]
#[must_use]
pub fn inner_html(node: &NodeRef) -> StrTendril {
    node.inner_html()
}

// === Tree Manipulation ===

/// Detach a node and its subtree from the tree.
#[inline]
pub fn remove(node: &NodeRef) {
    node.remove_from_parent();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_and_class() {
        let doc = parse(r#"<div class="Flight-Card Big" role="listitem">x</div>"#);
        let node = doc.select("div").nodes()[0];

        assert_eq!(tag_name(&node).as_deref(), Some("div"));
        assert_eq!(class_lower(&node), "flight-card big");
        assert_eq!(role(&node), "listitem");
        assert!(attr(&node, "missing").is_none());
    }

    #[test]
    fn test_content_root_and_parent_element() {
        let doc = parse("<html><body><ul><li>a</li></ul></body></html>");
        let body = content_root(&doc).unwrap();
        let li = doc.select("li").nodes()[0];
        let ul = parent_element(&li).unwrap();

        assert_eq!(tag_name(&ul).as_deref(), Some("ul"));
        assert_eq!(parent_element(&ul).unwrap().id, body.id);
    }

    #[test]
    fn test_parent_element_stops_below_document() {
        let doc = parse("<html><body></body></html>");
        let html = doc.select("html").nodes()[0];
        assert!(parent_element(&html).is_none());
    }

    #[test]
    fn test_is_inside_is_strict() {
        let doc = parse("<html><body><ul><li>a</li></ul></body></html>");
        let body = content_root(&doc).unwrap();
        let li = doc.select("li").nodes()[0];
        let html = doc.select("html").nodes()[0];

        assert!(is_inside(&li, &body));
        assert!(!is_inside(&body, &body));
        assert!(!is_inside(&html, &body));
    }

    #[test]
    fn test_is_attached_after_remove() {
        let doc = parse("<html><body><ul><li>a</li><li>b</li></ul></body></html>");
        let items: Vec<_> = doc.select("li").nodes().to_vec();

        assert!(is_attached(&doc, &items[0]));
        remove(&items[0]);
        assert!(!is_attached(&doc, &items[0]));
        assert!(is_attached(&doc, &items[1]));
        assert_eq!(doc.select("li").length(), 1);
    }

    #[test]
    fn test_descendant_of_removed_subtree_is_detached() {
        let doc = parse(r#"<html><body><div id="a"><p id="b">x</p></div></body></html>"#);
        let outer = doc.select("#a").nodes()[0];
        let inner = doc.select("#b").nodes()[0];

        remove(&outer);
        assert!(!is_attached(&doc, &inner));
    }

    #[test]
    fn test_count_elements() {
        let doc = parse("<html><body><div><p>one</p><p>two <b>x</b></p></div></body></html>");
        let div = doc.select("div").nodes()[0];
        assert_eq!(count_elements(&div), 4);
    }

    #[test]
    fn test_text_and_inner_html() {
        let doc = parse(r#"<html><body><div><span title="t">Hello</span></div></body></html>"#);
        let div = doc.select("div").nodes()[0];

        assert_eq!(&*text_content(&div), "Hello");
        assert!(inner_html(&div).contains(r#"title="t""#));
    }
}
