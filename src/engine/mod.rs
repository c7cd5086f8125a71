//! The filter engine.
//!
//! One scan pass runs collect, classify, then remove over the document:
//!
//! - `collector`: enumerates unseen candidates from broad selection patterns
//! - `classifier`: shape gate, flight-content gate, keyword match
//! - `remover`: container-boundary walk and subtree removal
//! - `seen`: identity-keyed record of evaluated nodes
//!
//! # Usage
//!
//! ```rust
//! use flight_filter::{dom, FilterEngine, LifecyclePoint, Options};
//!
//! let doc = dom::parse(r#"<html><body><ul>
//!     <li style="height:120px;width:400px">Vistara UK955, Economy, 2h 15m, ₹5400, Book now</li>
//!     <li style="height:120px;width:400px">IndiGo 6E204, Economy, 1h 50m, ₹3200, Book now</li>
//! </ul></body></html>"#);
//!
//! let mut engine = FilterEngine::new(Options::default())?;
//! engine.start(LifecyclePoint::ScriptLoad);
//! let report = engine.scan(&doc)?;
//!
//! assert_eq!(report.removals.len(), 1);
//! assert_eq!(doc.select("li").length(), 1);
//! # Ok::<(), flight_filter::Error>(())
//! ```

pub mod classifier;
pub mod collector;
pub mod remover;
pub mod seen;

use std::fmt;

use log::{debug, info, warn};

use crate::dom::{self, Document};
use crate::keywords::KeywordMatcher;
use crate::layout::{DeclaredLayout, Layout};
use crate::notify::{NullSink, RemovalEvent, RemovalSink};
use crate::{Error, Options, Result, Settings};

pub use classifier::{Classifier, Verdict};
pub use collector::CandidateCollector;
pub use remover::Remover;
pub use seen::SeenSet;

/// Points in a page's life where the engine may be started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecyclePoint {
    /// The engine's code was loaded into the page.
    ScriptLoad,
    /// The document finished parsing.
    DomReady,
    /// The page and its subresources finished loading.
    WindowLoad,
}

impl fmt::Display for LifecyclePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::ScriptLoad => "script-load",
            Self::DomReady => "dom-ready",
            Self::WindowLoad => "window-load",
        })
    }
}

/// What one scan pass did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanReport {
    /// Unseen candidates collected.
    pub candidates: usize,
    /// Candidates rejected by the shape gate.
    pub wrong_shape: usize,
    /// Candidates without a flight-content signal.
    pub not_flight: usize,
    /// Flight-like candidates left in place.
    pub kept: usize,
    /// Candidates that disappeared before they could be processed.
    pub stale: usize,
    /// Removals performed, in order.
    pub removals: Vec<RemovalEvent>,
}

/// Detects and removes blocked flight results from a document.
pub struct FilterEngine {
    settings: Settings,
    collector: CandidateCollector,
    classifier: Classifier,
    remover: Remover,
    seen: SeenSet,
    layout: Box<dyn Layout>,
    sink: Box<dyn RemovalSink>,
    started: Option<LifecyclePoint>,
}

impl fmt::Debug for FilterEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterEngine")
            .field("settings", &self.settings)
            .field("collector", &self.collector)
            .field("seen", &self.seen.len())
            .field("started", &self.started)
            .finish_non_exhaustive()
    }
}

impl FilterEngine {
    /// Build an engine, compiling keyword matchers and candidate patterns once.
    ///
    /// Uses [`DeclaredLayout`] for geometry and discards removal events until
    /// configured otherwise.
    pub fn new(options: Options) -> Result<Self> {
        let keywords = KeywordMatcher::new(
            options.airline_keywords.as_slice(),
            options.aircraft_keywords.as_slice(),
        )?;

        Ok(Self {
            settings: Settings::default(),
            collector: CandidateCollector::new(options.candidate_patterns.as_slice()),
            classifier: Classifier::new(&options, keywords),
            remover: Remover::new(options.max_container_depth, &options.container_markers),
            seen: SeenSet::new(),
            layout: Box::new(DeclaredLayout),
            sink: Box::new(NullSink),
            started: None,
        })
    }

    /// Replace the geometry source.
    #[must_use]
    pub fn with_layout(mut self, layout: impl Layout + 'static) -> Self {
        self.layout = Box::new(layout);
        self
    }

    /// Replace the removal event sink.
    #[must_use]
    pub fn with_sink(mut self, sink: impl RemovalSink + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    /// Start with the given settings instead of the defaults.
    #[must_use]
    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    /// Current settings.
    #[must_use]
    pub fn settings(&self) -> Settings {
        self.settings
    }

    /// Replace the settings consulted by the next scan.
    ///
    /// The seen set is kept: cards already classified stay as they are, and
    /// the new settings apply to cards not yet seen.
    pub fn set_settings(&mut self, settings: Settings) {
        if settings != self.settings {
            debug!("Settings changed to {settings:?}; applies to unseen candidates");
        }
        self.settings = settings;
    }

    /// The seen set.
    #[must_use]
    pub fn seen(&self) -> &SeenSet {
        &self.seen
    }

    /// The candidate collector, including any rejected patterns.
    #[must_use]
    pub fn collector(&self) -> &CandidateCollector {
        &self.collector
    }

    /// Idempotent lifecycle hook.
    ///
    /// Safe to call from every lifecycle point; only the first call starts the
    /// engine and returns `true`.
    pub fn start(&mut self, point: LifecyclePoint) -> bool {
        if let Some(first) = self.started {
            debug!("Engine already started at {first}; ignoring {point}");
            return false;
        }
        info!("Flight filter engine started at {point}");
        self.started = Some(point);
        true
    }

    /// Whether [`start`](Self::start) has been called.
    #[must_use]
    pub fn is_started(&self) -> bool {
        self.started.is_some()
    }

    /// Run one collect, classify, remove pass over `doc`.
    ///
    /// Does nothing when the engine is disabled or both keyword sets are off,
    /// so no card is marked seen. Fails only when the document has no content
    /// root to attach to.
    pub fn scan(&mut self, doc: &Document) -> Result<ScanReport> {
        let mut report = ScanReport::default();

        if !self.settings.is_active() {
            debug!("Filter inactive; skipping scan");
            return Ok(report);
        }
        if dom::content_root(doc).is_none() {
            return Err(Error::NoContentRoot);
        }

        let candidates = self.collector.collect(doc, &self.seen);
        report.candidates = candidates.len();

        for node in candidates {
            if !dom::is_attached(doc, &node) {
                report.stale += 1;
                continue;
            }

            let verdict = self
                .classifier
                .classify(&node, self.layout.as_ref(), &self.settings);
            self.seen.insert(node.id);

            match verdict {
                Verdict::WrongShape => report.wrong_shape += 1,
                Verdict::NotFlight => report.not_flight += 1,
                Verdict::Keep => report.kept += 1,
                Verdict::Remove(hit) => match self.remover.remove(doc, node, &hit) {
                    Some(event) => {
                        if let Err(e) = self.sink.notify(&event) {
                            warn!("Dropping removal notification: {e}");
                        }
                        report.removals.push(event);
                    }
                    None => report.stale += 1,
                },
            }
        }

        let pruned = self.seen.prune_detached(doc);
        if report.candidates > 0 || pruned > 0 {
            debug!(
                "Scan: {} candidates, {} removed, {} kept, {} stale, {} seen entries pruned",
                report.candidates,
                report.removals.len(),
                report.kept,
                report.stale,
                pruned
            );
        }

        Ok(report)
    }
}
