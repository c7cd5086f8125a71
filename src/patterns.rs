//! Static pattern tables for flight-result detection.
//!
//! Keyword lists, flight-content signal tokens, candidate selection patterns
//! and container markers. Everything here is lowercase plain data; compiled
//! matchers live in [`crate::keywords`].

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// Blocked Keywords
// =============================================================================

/// Phrases identifying a blocked carrier.
pub const AIRLINE_KEYWORDS: &[&str] = &[
    "air india",
    "airindia",
    "air india express",
    "air india regional",
    "alliance air",
    "vistara",
];

/// Phrases identifying a blocked aircraft type.
///
/// Matched case-insensitively, so "dreamliner" also catches "Dreamliner".
pub const AIRCRAFT_KEYWORDS: &[&str] = &[
    "boeing 787",
    "b787",
    "787",
    "boeing787",
    "b-787",
    "787-800",
    "787-900",
    "787 max",
    "787max",
    "dreamliner",
];

// =============================================================================
// Flight-Content Signals
// =============================================================================

/// Generic tokens suggesting a text blob describes an itinerary.
///
/// These are substring tests, not word matches: "min" also hits "mins" and
/// "book" also hits "booking". The gate is deliberately loose.
pub const FLIGHT_SIGNALS: &[&str] = &[
    // Currency
    "₹", "$", "€", "£",
    // Duration
    "hr", "min", "hours", "minutes",
    // Flight type
    "stop", "nonstop", "direct", "layover",
    // Times
    "departure", "arrival", "depart", "arrive",
    // Cabin class
    "economy", "business", "first", "premium",
    // Baggage
    "kg", "baggage", "checked",
    // Actions
    "book", "select", "choose",
];

// =============================================================================
// Candidate Selection
// =============================================================================

/// Selection patterns enumerating possible flight-result containers, broadest first.
pub const CANDIDATE_PATTERNS: &[&str] = &[
    // Generic flight containers
    r#"[class*="flight"]"#,
    r#"[id*="flight"]"#,
    r#"[class*="result"]"#,
    r#"[id*="result"]"#,
    r#"[class*="card"]"#,
    r#"[class*="item"]"#,
    r#"[class*="listing"]"#,
    r#"[class*="offer"]"#,
    // Common list structures
    r#"[role="listitem"]"#,
    "li",
    "article",
    // Booking-UI specific
    r#"[data-testid*="flight"]"#,
    r#"[data-test-id*="flight"]"#,
    ".flight-card",
    ".trip-card",
    ".result-card",
    ".search-result",
    ".flight-option",
    ".flight-item",
];

// =============================================================================
// Container Boundary
// =============================================================================

/// Class-attribute substrings marking an element as a whole result card.
pub const CONTAINER_CLASS_MARKERS: &[&str] = &["flight", "result", "card", "item", "listing"];

/// Attributes whose values are folded into the text blob.
pub const INSPECTED_ATTRIBUTES: &[&str] = &["title", "alt", "aria-label", "data-airline", "data-carrier"];

// =============================================================================
// Geometry
// =============================================================================

/// Matches a single `height`/`width` declaration from an inline style attribute.
///
/// Applied per declaration (the style split on `;`). Captures the property
/// name and its numeric value; the unit must be `px` or absent. Percentages
/// and relative units are not resolvable without layout.
pub static STYLE_DIMENSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(height|width)\s*:\s*([0-9]+(?:\.[0-9]+)?)\s*(?:px)?\s*(?:!important)?\s*$")
        .expect("STYLE_DIMENSION regex")
});
