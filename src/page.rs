//! Host page model.
//!
//! The page owns the live document. The host site changes it through
//! [`PageMutation`]s (infinite scroll appends, client-side re-renders,
//! removals) and every applied mutation yields a [`MutationRecord`], the
//! observation feed the scheduler reacts to.

use dom_query::Matcher;

use crate::dom::{self, Document};
use crate::{Error, Result};

/// A structural change made by the host page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageMutation {
    /// Append markup to every element matching `target`.
    Append {
        /// Selection pattern for the parent elements.
        target: String,
        /// Markup to insert.
        html: String,
    },
    /// Replace every element matching `target` with markup.
    Replace {
        /// Selection pattern for the replaced elements.
        target: String,
        /// Replacement markup.
        html: String,
    },
    /// Replace the children of every element matching `target`.
    SetInner {
        /// Selection pattern for the re-rendered elements.
        target: String,
        /// New inner markup.
        html: String,
    },
    /// Detach every element matching `target`.
    Remove {
        /// Selection pattern for the removed elements.
        target: String,
    },
}

impl PageMutation {
    /// Shorthand for [`PageMutation::Append`].
    pub fn append(target: impl Into<String>, html: impl Into<String>) -> Self {
        Self::Append {
            target: target.into(),
            html: html.into(),
        }
    }

    /// Shorthand for [`PageMutation::Replace`].
    pub fn replace(target: impl Into<String>, html: impl Into<String>) -> Self {
        Self::Replace {
            target: target.into(),
            html: html.into(),
        }
    }

    /// Shorthand for [`PageMutation::SetInner`].
    pub fn set_inner(target: impl Into<String>, html: impl Into<String>) -> Self {
        Self::SetInner {
            target: target.into(),
            html: html.into(),
        }
    }

    /// Shorthand for [`PageMutation::Remove`].
    pub fn remove(target: impl Into<String>) -> Self {
        Self::Remove {
            target: target.into(),
        }
    }

    fn target(&self) -> &str {
        match self {
            Self::Append { target, .. }
            | Self::Replace { target, .. }
            | Self::SetInner { target, .. }
            | Self::Remove { target } => target,
        }
    }
}

/// Summary of one applied mutation batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MutationRecord {
    /// Element nodes inserted into the tree.
    pub added_elements: usize,
    /// Element nodes detached from the tree.
    pub removed_elements: usize,
}

impl MutationRecord {
    /// True when the batch inserted at least one element, the scan trigger condition.
    #[must_use]
    pub fn added_any(&self) -> bool {
        self.added_elements > 0
    }
}

/// A live document plus the host-side operations that change it.
pub struct Page {
    doc: Document,
}

impl Page {
    /// Parse a page from markup.
    #[must_use]
    pub fn parse(html: &str) -> Self {
        Self {
            doc: dom::parse(html),
        }
    }

    /// The live document.
    #[must_use]
    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// Serialize the current document.
    #[must_use]
    pub fn html(&self) -> String {
        self.doc.html().to_string()
    }

    /// Apply a host mutation and report what it added and removed.
    ///
    /// A pattern matching nothing is a no-op; an unparsable pattern is an error.
    pub fn apply(&self, mutation: &PageMutation) -> Result<MutationRecord> {
        let pattern = mutation.target();
        let matcher = Matcher::new(pattern).map_err(|e| Error::Selector {
            pattern: pattern.to_string(),
            reason: format!("{e:?}"),
        })?;
        let targets = self.doc.select_matcher(&matcher);
        if targets.is_empty() {
            return Ok(MutationRecord::default());
        }

        let before = self.element_count();
        let removed_elements: usize = match mutation {
            PageMutation::Append { .. } => 0,
            PageMutation::Replace { .. } | PageMutation::Remove { .. } => {
                targets.nodes().iter().map(dom::count_elements).sum()
            }
            PageMutation::SetInner { .. } => targets
                .nodes()
                .iter()
                .map(|n| dom::count_elements(n) - 1)
                .sum(),
        };

        match mutation {
            PageMutation::Append { html, .. } => targets.append_html(html.as_str()),
            PageMutation::Replace { html, .. } => targets.replace_with_html(html.as_str()),
            PageMutation::SetInner { html, .. } => targets.set_html(html.as_str()),
            PageMutation::Remove { .. } => targets.remove(),
        }

        let after = self.element_count();
        Ok(MutationRecord {
            added_elements: (after + removed_elements).saturating_sub(before),
            removed_elements,
        })
    }

    fn element_count(&self) -> usize {
        self.doc.select("*").length()
    }
}
