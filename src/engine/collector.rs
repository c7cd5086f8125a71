//! Candidate collection.
//!
//! Candidate patterns compile once into selector matchers. A pattern the
//! selector parser rejects is dropped on its own; the remaining patterns keep
//! working.

use std::fmt;

use dom_query::Matcher;
use log::warn;

use crate::dom::{self, Document, NodeRef};
use crate::engine::seen::SeenSet;
use crate::Error;

struct CompiledPattern {
    source: String,
    matcher: Matcher,
}

/// Enumerates possible flight-result containers.
pub struct CandidateCollector {
    patterns: Vec<CompiledPattern>,
    rejected: Vec<Error>,
}

impl fmt::Debug for CandidateCollector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CandidateCollector")
            .field("patterns", &self.patterns())
            .field("rejected", &self.rejected)
            .finish()
    }
}

impl CandidateCollector {
    /// Compile the given patterns, skipping any that fail to parse.
    #[must_use]
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Self {
        let mut compiled = Vec::with_capacity(patterns.len());
        let mut rejected = Vec::new();

        for pattern in patterns {
            let pattern = pattern.as_ref();
            match Matcher::new(pattern) {
                Ok(matcher) => compiled.push(CompiledPattern {
                    source: pattern.to_string(),
                    matcher,
                }),
                Err(e) => {
                    let err = Error::Selector {
                        pattern: pattern.to_string(),
                        reason: format!("{e:?}"),
                    };
                    warn!("Skipping candidate pattern: {err}");
                    rejected.push(err);
                }
            }
        }

        Self {
            patterns: compiled,
            rejected,
        }
    }

    /// Patterns in use, in query order.
    #[must_use]
    pub fn patterns(&self) -> Vec<&str> {
        self.patterns.iter().map(|p| p.source.as_str()).collect()
    }

    /// Patterns that failed to compile, with their diagnostics.
    #[must_use]
    pub fn rejected(&self) -> &[Error] {
        &self.rejected
    }

    /// Collect unseen candidates from `doc`, in pattern order.
    ///
    /// Only elements strictly inside the content root qualify, so `<html>`,
    /// `<head>` and `<body>` are never candidates. A node matched by several
    /// patterns appears once. The seen set is only read here; the engine marks
    /// nodes after classifying them.
    #[must_use]
    pub fn collect<'a>(&self, doc: &'a Document, seen: &SeenSet) -> Vec<NodeRef<'a>> {
        let mut out: Vec<NodeRef<'a>> = Vec::new();
        let Some(root) = dom::content_root(doc) else {
            return out;
        };
        let mut queued = std::collections::HashSet::new();

        for pattern in &self.patterns {
            let matched = doc.select_matcher(&pattern.matcher);
            for node in matched.nodes() {
                if !node.is_element() || seen.contains(node.id) || !dom::is_inside(node, &root) {
                    continue;
                }
                if queued.insert(node.id) {
                    out.push(*node);
                }
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns::CANDIDATE_PATTERNS;

    #[test]
    fn test_invalid_pattern_is_isolated() {
        let collector = CandidateCollector::new(&["li", "[[[", "article"]);

        assert_eq!(collector.patterns(), vec!["li", "article"]);
        assert_eq!(collector.rejected().len(), 1);
        assert!(matches!(
            &collector.rejected()[0],
            Error::Selector { pattern, .. } if pattern == "[[["
        ));
    }

    #[test]
    fn test_multiply_matched_node_collected_once() {
        let doc = dom::parse(
            r#"<html><body><ul><li class="flight-card result-item">x</li></ul></body></html>"#,
        );
        let collector = CandidateCollector::new(CANDIDATE_PATTERNS);
        let found = collector.collect(&doc, &SeenSet::new());

        assert_eq!(found.len(), 1);
        assert_eq!(dom::tag_name(&found[0]).as_deref(), Some("li"));
    }

    #[test]
    fn test_seen_nodes_are_skipped() {
        let doc = dom::parse("<html><body><ul><li>a</li><li>b</li></ul></body></html>");
        let collector = CandidateCollector::new(&["li"]);
        let mut seen = SeenSet::new();
        seen.insert(doc.select("li").nodes()[0].id);

        let found = collector.collect(&doc, &seen);
        assert_eq!(found.len(), 1);
        assert_eq!(&*dom::text_content(&found[0]), "b");
    }

    #[test]
    fn test_document_shell_is_never_a_candidate() {
        let doc = dom::parse(
            r#"<html class="flight-app"><head class="flight-meta"></head><body class="results-page"><li>a</li></body></html>"#,
        );
        let collector = CandidateCollector::new(CANDIDATE_PATTERNS);
        let found = collector.collect(&doc, &SeenSet::new());

        let tags: Vec<_> = found.iter().filter_map(dom::tag_name).collect();
        assert_eq!(tags, vec!["li"]);
    }

    #[test]
    fn test_no_matches_is_empty() {
        let doc = dom::parse("<html><body><p>nothing here</p></body></html>");
        let collector = CandidateCollector::new(CANDIDATE_PATTERNS);
        assert!(collector.collect(&doc, &SeenSet::new()).is_empty());
    }

    #[test]
    fn test_pattern_order_is_kept() {
        let doc = dom::parse(
            r#"<html><body><article>a</article><div class="offer">b</div></body></html>"#,
        );
        let collector = CandidateCollector::new(&["article", r#"[class*="offer"]"#]);
        let found = collector.collect(&doc, &SeenSet::new());

        let tags: Vec<_> = found.iter().filter_map(dom::tag_name).collect();
        assert_eq!(tags, vec!["article", "div"]);
    }
}
