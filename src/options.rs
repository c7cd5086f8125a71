//! Configuration options for the filter engine.
//!
//! The `Options` struct holds every tunable of detection, removal and
//! scheduling. Runtime toggles live separately in [`crate::Settings`].

use std::time::Duration;

use crate::patterns::{
    AIRCRAFT_KEYWORDS, AIRLINE_KEYWORDS, CANDIDATE_PATTERNS, CONTAINER_CLASS_MARKERS,
    FLIGHT_SIGNALS, INSPECTED_ATTRIBUTES,
};

/// Configuration options for the filter engine.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings.
///
/// # Example
///
/// ```rust
/// use flight_filter::Options;
/// use std::time::Duration;
///
/// let options = Options {
///     min_width: 150.0,
///     scan_interval: Duration::from_secs(5),
///     ..Options::default()
/// };
/// assert_eq!(options.max_container_depth, 8);
/// ```
#[derive(Debug, Clone)]
pub struct Options {
    /// Minimum rendered height of a candidate, in pixels.
    ///
    /// Default: `30.0`
    pub min_height: f64,

    /// Maximum rendered height of a candidate, in pixels.
    ///
    /// Default: `800.0`
    pub max_height: f64,

    /// Minimum rendered width of a candidate, in pixels.
    ///
    /// Default: `200.0`
    pub min_width: f64,

    /// How many elements the container walk may test, starting at the flagged node.
    ///
    /// Default: `8`
    pub max_container_depth: usize,

    /// Period of the fallback scan timer.
    ///
    /// Default: 2 seconds
    pub scan_interval: Duration,

    /// Delay between a mutation batch that added elements and its scan.
    ///
    /// Default: 500 ms
    pub mutation_debounce: Duration,

    /// Delay between a click, scroll or key release and its scan.
    ///
    /// Default: 800 ms
    pub interaction_debounce: Duration,

    /// Selection patterns enumerating candidates, in query order.
    pub candidate_patterns: Vec<String>,

    /// Class-attribute substrings that mark a container boundary.
    pub container_markers: Vec<String>,

    /// Attributes folded into the text blob.
    pub inspected_attributes: Vec<String>,

    /// Blocked-airline phrases.
    pub airline_keywords: Vec<String>,

    /// Blocked-aircraft phrases.
    pub aircraft_keywords: Vec<String>,

    /// Tokens gating whether a candidate is flight-like at all.
    pub flight_signals: Vec<String>,
}

fn owned(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| (*s).to_string()).collect()
}

impl Default for Options {
    fn default() -> Self {
        Self {
            min_height: 30.0,
            max_height: 800.0,
            min_width: 200.0,
            max_container_depth: 8,
            scan_interval: Duration::from_secs(2),
            mutation_debounce: Duration::from_millis(500),
            interaction_debounce: Duration::from_millis(800),
            candidate_patterns: owned(CANDIDATE_PATTERNS),
            container_markers: owned(CONTAINER_CLASS_MARKERS),
            inspected_attributes: owned(INSPECTED_ATTRIBUTES),
            airline_keywords: owned(AIRLINE_KEYWORDS),
            aircraft_keywords: owned(AIRCRAFT_KEYWORDS),
            flight_signals: owned(FLIGHT_SIGNALS),
        }
    }
}
