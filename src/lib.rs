//! # flight-filter
//!
//! Heuristic detection and permanent removal of blocked flight search results
//! from an HTML document the filter does not control.
//!
//! The engine infers "this subtree is a flight result card" and "this card
//! mentions a blocked carrier or aircraft" from raw text and markup alone,
//! then detaches the whole card from the tree. A scheduler keeps re-scanning
//! as the host page appends, re-renders and lazily reveals results.
//!
//! ## Quick Start
//!
//! ```rust
//! use flight_filter::filter_html;
//!
//! let html = r#"<html><body><ul>
//!     <li style="height:120px;width:400px">Vistara UK955, Economy, 2h 15m, ₹5400, Book now</li>
//!     <li style="height:120px;width:400px">IndiGo 6E204, Economy, 1h 50m, ₹3200, Book now</li>
//! </ul></body></html>"#;
//!
//! let output = filter_html(html)?;
//! assert_eq!(output.removals.len(), 1);
//! assert!(!output.html.contains("Vistara"));
//! assert!(output.html.contains("IndiGo"));
//! # Ok::<(), flight_filter::Error>(())
//! ```
//!
//! ## Pipeline
//!
//! - **Collect**: broad selection patterns enumerate unseen candidates
//! - **Classify**: shape gate, flight-content gate, word-boundary keyword match
//! - **Remove**: walk up to the card boundary and detach that subtree
//! - **Schedule**: periodic timer, mutation debounce, interaction debounce

mod error;
mod options;
mod settings;

/// DOM operations adapter over `dom_query`.
pub mod dom;

/// Static keyword lists, flight signals and candidate patterns.
pub mod patterns;

/// Precompiled word-boundary keyword matchers.
pub mod keywords;

/// Rendered geometry providers.
pub mod layout;

/// Collect, classify and remove.
pub mod engine;

/// Removal events and their sinks.
pub mod notify;

/// Host page model and mutation records.
pub mod page;

/// Timer, mutation and interaction driven scan scheduling.
pub mod scheduler;

// Public API - re-exports
pub use engine::{FilterEngine, LifecyclePoint, ScanReport, Verdict};
pub use error::{Error, Result};
pub use keywords::Reason;
pub use notify::{RemovalCounter, RemovalEvent, RemovalSink};
pub use options::Options;
pub use page::{MutationRecord, Page, PageMutation};
pub use scheduler::{HostEvent, InteractionKind, RunSummary, Scheduler};
pub use settings::Settings;

/// Result of filtering a standalone document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOutput {
    /// The document after removal, serialized.
    pub html: String,
    /// Removals performed, in order.
    pub removals: Vec<RemovalEvent>,
}

/// Runs a single scan over an HTML document using default options and settings.
///
/// Geometry comes from sizes declared in the markup (see
/// [`layout::DeclaredLayout`]), so cards without declared dimensions are never
/// removed.
pub fn filter_html(html: &str) -> Result<FilterOutput> {
    filter_html_with(html, &Options::default(), Settings::default())
}

/// Runs a single scan over an HTML document with custom options and settings.
///
/// # Example
///
/// ```rust
/// use flight_filter::{filter_html_with, Options, Settings};
///
/// let html = r#"<html><body><article style="height:90px;width:300px">
///     Boeing 787-900 Dreamliner, Nonstop, Economy
/// </article></body></html>"#;
/// let settings = Settings { block_aircraft: false, ..Settings::default() };
///
/// let output = filter_html_with(html, &Options::default(), settings)?;
/// assert!(output.removals.is_empty());
/// # Ok::<(), flight_filter::Error>(())
/// ```
pub fn filter_html_with(html: &str, options: &Options, settings: Settings) -> Result<FilterOutput> {
    let doc = dom::parse(html);
    let mut engine = FilterEngine::new(options.clone())?.with_settings(settings);
    engine.start(LifecyclePoint::ScriptLoad);
    let report = engine.scan(&doc)?;

    Ok(FilterOutput {
        html: doc.html().to_string(),
        removals: report.removals,
    })
}
