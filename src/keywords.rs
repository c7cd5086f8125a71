//! Precompiled keyword matchers.
//!
//! Each keyword list compiles once into a single case-insensitive alternation
//! with every keyword escaped literally and wrapped in word-boundary anchors.
//! Matching then needs no per-call pattern construction.

use std::fmt;

use log::warn;
use regex::Regex;

use crate::Result;

/// Why a candidate was flagged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reason {
    /// A blocked-airline phrase matched.
    Airline,
    /// A blocked-aircraft phrase matched.
    Aircraft,
}

impl Reason {
    /// Lowercase tag used in logs and notifications.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Airline => "airline",
            Self::Aircraft => "aircraft",
        }
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A word-boundary matcher over one keyword list.
#[derive(Debug, Clone)]
pub struct KeywordSet {
    regex: Option<Regex>,
    unmatchable: Vec<String>,
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// A `\b` anchor next to a non-word character needs a word character on the
/// outside, so such a keyword can never match on its own.
fn has_word_edges(keyword: &str) -> bool {
    keyword.chars().next().is_some_and(is_word_char)
        && keyword.chars().next_back().is_some_and(is_word_char)
}

impl KeywordSet {
    /// Compile a keyword list.
    ///
    /// Empty and whitespace-only keywords are ignored. An empty list yields a
    /// set that never matches.
    ///
    /// Keywords must start and end on a word character. A keyword such as
    /// `(x)` cannot satisfy the boundary anchors; it is compiled anyway, logged
    /// with a warning and listed by [`unmatchable`](Self::unmatchable).
    pub fn new<S: AsRef<str>>(keywords: &[S]) -> Result<Self> {
        let mut unmatchable = Vec::new();
        let alternatives: Vec<String> = keywords
            .iter()
            .map(|kw| kw.as_ref().trim())
            .filter(|kw| !kw.is_empty())
            .inspect(|kw| {
                if !has_word_edges(kw) {
                    warn!("Keyword {kw:?} starts or ends on a non-word character and will never match");
                    unmatchable.push((*kw).to_string());
                }
            })
            .map(|kw| format!(r"\b{}\b", regex::escape(kw)))
            .collect();

        if alternatives.is_empty() {
            return Ok(Self {
                regex: None,
                unmatchable,
            });
        }

        let regex = Regex::new(&format!("(?i)(?:{})", alternatives.join("|")))?;
        Ok(Self {
            regex: Some(regex),
            unmatchable,
        })
    }

    /// Keywords whose edges defeat the word-boundary anchors.
    #[must_use]
    pub fn unmatchable(&self) -> &[String] {
        &self.unmatchable
    }

    /// Return the first keyword occurrence in `text`, if any.
    ///
    /// The returned slice is the matched text, useful for auditing which
    /// literal triggered a removal.
    #[must_use]
    pub fn find<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.regex.as_ref()?.find(text).map(|m| m.as_str())
    }

    /// Check whether any keyword occurs in `text`.
    #[must_use]
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.as_ref().is_some_and(|re| re.is_match(text))
    }
}

/// Both blocked-keyword sets, compiled.
#[derive(Debug, Clone)]
pub struct KeywordMatcher {
    airline: KeywordSet,
    aircraft: KeywordSet,
}

/// A positive keyword match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordHit {
    /// Which set matched.
    pub reason: Reason,
    /// The literal text that matched.
    pub keyword: String,
}

impl KeywordMatcher {
    /// Compile both sets.
    pub fn new<S: AsRef<str>>(airline: &[S], aircraft: &[S]) -> Result<Self> {
        Ok(Self {
            airline: KeywordSet::new(airline)?,
            aircraft: KeywordSet::new(aircraft)?,
        })
    }

    /// Test `text` against the enabled sets.
    ///
    /// Airline takes precedence when both sets match.
    #[must_use]
    pub fn check(&self, text: &str, airline: bool, aircraft: bool) -> Option<KeywordHit> {
        let hit = |reason, set: &KeywordSet| {
            set.find(text).map(|kw| KeywordHit {
                reason,
                keyword: kw.to_lowercase(),
            })
        };

        if airline {
            if let Some(found) = hit(Reason::Airline, &self.airline) {
                return Some(found);
            }
        }
        if aircraft {
            return hit(Reason::Aircraft, &self.aircraft);
        }
        None
    }

    /// The blocked-airline set.
    #[must_use]
    pub fn airline(&self) -> &KeywordSet {
        &self.airline
    }

    /// The blocked-aircraft set.
    #[must_use]
    pub fn aircraft(&self) -> &KeywordSet {
        &self.aircraft
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns::{AIRCRAFT_KEYWORDS, AIRLINE_KEYWORDS};

    fn matcher() -> KeywordMatcher {
        KeywordMatcher::new(AIRLINE_KEYWORDS, AIRCRAFT_KEYWORDS).unwrap()
    }

    #[test]
    fn test_word_boundary_match() {
        let m = matcher();
        assert!(m.airline().is_match("vistara airlines flight"));
        assert!(!m.airline().is_match("vistarama"));
        assert!(!m.aircraft().is_match("flight 17870"));
        assert!(m.aircraft().is_match("operated by a b-787 aircraft"));
    }

    #[test]
    fn test_case_insensitive() {
        let m = matcher();
        assert!(m.airline().is_match("Flying AIR INDIA today"));
        assert!(m.aircraft().is_match("Boeing DREAMLINER"));
    }

    #[test]
    fn test_regex_metacharacters_are_literal() {
        let set = KeywordSet::new(&["a.b", "c+", "(x)"]).unwrap();
        assert!(set.is_match("see a.b here"));
        assert!(!set.is_match("see axb here"));
        assert!(!set.is_match("ccc"));
        assert!(set.find("call (x) now").is_none());
    }

    #[test]
    fn test_non_word_edges_are_reported() {
        let set = KeywordSet::new(&["vistara", "(x)", "a-", "787-900"]).unwrap();
        assert_eq!(set.unmatchable(), ["(x)", "a-"]);

        let defaults = KeywordSet::new(AIRLINE_KEYWORDS).unwrap();
        assert!(defaults.unmatchable().is_empty());
        assert!(KeywordSet::new(AIRCRAFT_KEYWORDS).unwrap().unmatchable().is_empty());
    }

    #[test]
    fn test_airline_takes_precedence() {
        let m = matcher();
        let hit = m.check("vistara boeing 787 economy", true, true).unwrap();
        assert_eq!(hit.reason, Reason::Airline);
        assert_eq!(hit.keyword, "vistara");
    }

    #[test]
    fn test_disabled_sets_are_skipped() {
        let m = matcher();
        assert!(m.check("air india economy", false, true).is_none());
        let hit = m.check("air india 787-900", false, true).unwrap();
        assert_eq!(hit.reason, Reason::Aircraft);
        assert!(m.check("air india 787-900", false, false).is_none());
    }

    #[test]
    fn test_empty_list_never_matches() {
        let set = KeywordSet::new::<&str>(&[]).unwrap();
        assert!(!set.is_match("anything at all"));
        assert!(set.find("anything").is_none());
    }

    #[test]
    fn test_display_reason() {
        assert_eq!(Reason::Airline.to_string(), "airline");
        assert_eq!(Reason::Aircraft.to_string(), "aircraft");
    }
}
