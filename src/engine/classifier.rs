//! Candidate classification.
//!
//! Two stages per candidate:
//!
//! 1. **Shape**: the rendered box must be card-sized. Icons, spacers and
//!    full-page wrappers fail here before any text is touched.
//! 2. **Content**: a lowercase blob of text, inner markup and selected
//!    attribute values must carry a flight-content signal, then match a
//!    blocked keyword from an enabled set.
//!
//! The verdict is binary. A flagged verdict names the literal keyword so a
//! removal can always be traced back to the text that caused it.

use crate::dom::{self, NodeRef};
use crate::keywords::{KeywordHit, KeywordMatcher};
use crate::layout::{Layout, Rect};
use crate::{Options, Settings};

/// Outcome of classifying one candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Box size outside the card range.
    WrongShape,
    /// No flight-content signal in the blob.
    NotFlight,
    /// Flight-like, but no enabled keyword set matched.
    Keep,
    /// Flight-like and carrying a blocked keyword.
    Remove(KeywordHit),
}

impl Verdict {
    /// True for [`Verdict::Remove`].
    #[must_use]
    pub fn is_flagged(&self) -> bool {
        matches!(self, Self::Remove(_))
    }
}

/// Shape and content classifier.
#[derive(Debug, Clone)]
pub struct Classifier {
    min_height: f64,
    max_height: f64,
    min_width: f64,
    inspected_attributes: Vec<String>,
    flight_signals: Vec<String>,
    keywords: KeywordMatcher,
}

impl Classifier {
    /// Build a classifier from options and an already compiled keyword matcher.
    #[must_use]
    pub fn new(options: &Options, keywords: KeywordMatcher) -> Self {
        Self {
            min_height: options.min_height,
            max_height: options.max_height,
            min_width: options.min_width,
            inspected_attributes: options.inspected_attributes.clone(),
            flight_signals: options.flight_signals.iter().map(|s| s.to_lowercase()).collect(),
            keywords,
        }
    }

    /// Stage A: does the box have card proportions?
    #[must_use]
    pub fn has_card_shape(&self, rect: Rect) -> bool {
        !(rect.height < self.min_height || rect.height > self.max_height || rect.width < self.min_width)
    }

    /// Build the lowercase text blob for a node.
    ///
    /// Rendered text, then inner markup (catches text in attributes and hidden
    /// children), then the values of the inspected attributes, space-separated.
    #[must_use]
    pub fn text_blob(&self, node: &NodeRef) -> String {
        let text = dom::text_content(node);
        let markup = dom::inner_html(node);
        let mut blob = String::with_capacity(text.len() + markup.len() + 1);

        blob.push_str(&text.to_lowercase());
        blob.push(' ');
        blob.push_str(&markup.to_lowercase());

        for name in &self.inspected_attributes {
            if let Some(value) = dom::attr(node, name) {
                if !value.is_empty() {
                    blob.push(' ');
                    blob.push_str(&value.to_lowercase());
                }
            }
        }

        blob
    }

    /// Stage B gate: does the blob look like an itinerary at all?
    #[must_use]
    pub fn has_flight_content(&self, blob: &str) -> bool {
        self.flight_signals.iter().any(|token| blob.contains(token.as_str()))
    }

    /// Classify a candidate under the current settings.
    ///
    /// Callers are expected to have checked `settings.enabled`; a disabled
    /// keyword set is simply not consulted.
    pub fn classify(&self, node: &NodeRef, layout: &dyn Layout, settings: &Settings) -> Verdict {
        let rect = layout.rect(node).unwrap_or_default();
        if !self.has_card_shape(rect) {
            return Verdict::WrongShape;
        }

        let blob = self.text_blob(node);
        if !self.has_flight_content(&blob) {
            return Verdict::NotFlight;
        }

        match self
            .keywords
            .check(&blob, settings.block_airline, settings.block_aircraft)
        {
            Some(hit) => Verdict::Remove(hit),
            None => Verdict::Keep,
        }
    }
}
