//! Scan scheduling.
//!
//! Three independent cadences converge on one scan entry point:
//!
//! - a periodic timer, covering mutations nobody reported
//! - a debounced reaction to mutation batches that added elements
//! - a debounced reaction to clicks, scrolls and key releases, covering
//!   content revealed by user action
//!
//! A scan body runs to completion before the next one starts. Overlapping
//! triggers only cost a redundant pass, since the seen set makes every pass
//! idempotent per node.

use std::fmt;
use std::time::Duration;

use log::{debug, warn};
use tokio::sync::mpsc;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::engine::{FilterEngine, LifecyclePoint};
use crate::notify::RemovalEvent;
use crate::page::{Page, PageMutation};
use crate::{Options, Settings};

/// User interactions that may reveal lazily rendered results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionKind {
    /// Pointer click.
    Click,
    /// Page scroll.
    Scroll,
    /// Key release.
    KeyUp,
}

/// Something that happened on the host page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    /// The page changed its own structure.
    Mutate(PageMutation),
    /// The user interacted with the page.
    Interaction(InteractionKind),
    /// The page reached a lifecycle point.
    Lifecycle(LifecyclePoint),
    /// The settings collaborator pushed new toggles.
    Settings(Settings),
}

/// Why a scan ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanTrigger {
    /// First scan when the loop starts.
    Start,
    /// Periodic timer tick.
    Timer,
    /// Mutation debounce elapsed.
    Mutation,
    /// Interaction debounce elapsed.
    Interaction,
    /// A lifecycle point was reached.
    Lifecycle,
}

impl fmt::Display for ScanTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Start => "start",
            Self::Timer => "timer",
            Self::Mutation => "mutation",
            Self::Interaction => "interaction",
            Self::Lifecycle => "lifecycle",
        })
    }
}

/// Pending debounced scans.
///
/// Each source keeps at most one deadline; re-arming replaces it with a later one.
#[derive(Debug, Clone)]
pub struct PendingScans {
    mutation_delay: Duration,
    interaction_delay: Duration,
    mutation: Option<Instant>,
    interaction: Option<Instant>,
}

impl PendingScans {
    /// Create with the given debounce delays.
    #[must_use]
    pub fn new(mutation_delay: Duration, interaction_delay: Duration) -> Self {
        Self {
            mutation_delay,
            interaction_delay,
            mutation: None,
            interaction: None,
        }
    }

    /// A mutation batch added elements at `now`.
    pub fn arm_mutation(&mut self, now: Instant) {
        self.mutation = Some(now + self.mutation_delay);
    }

    /// An interaction happened at `now`.
    pub fn arm_interaction(&mut self, now: Instant) {
        self.interaction = Some(now + self.interaction_delay);
    }

    /// Earliest pending deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.mutation, self.interaction) {
            (Some(m), Some(i)) => Some(m.min(i)),
            (m, i) => m.or(i),
        }
    }

    /// Clear and return one trigger whose deadline has passed.
    ///
    /// Mutation is returned before interaction when both are due.
    pub fn take_due(&mut self, now: Instant) -> Option<ScanTrigger> {
        if self.mutation.is_some_and(|d| d <= now) {
            self.mutation = None;
            return Some(ScanTrigger::Mutation);
        }
        if self.interaction.is_some_and(|d| d <= now) {
            self.interaction = None;
            return Some(ScanTrigger::Interaction);
        }
        None
    }
}

/// What a scheduler run did before it stopped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Scan passes executed.
    pub scans: usize,
    /// Every removal, in order.
    pub removals: Vec<RemovalEvent>,
    /// The engine could not attach to the page and stopped early.
    pub gave_up: bool,
}

/// Drives a [`FilterEngine`] over a [`Page`] from host events and timers.
pub struct Scheduler {
    engine: FilterEngine,
    scan_interval: Duration,
    pending: PendingScans,
    summary: RunSummary,
}

impl fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scheduler")
            .field("engine", &self.engine)
            .field("scan_interval", &self.scan_interval)
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}

async fn sleep_until_opt(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

impl Scheduler {
    /// Wrap an engine with the cadences from `options`.
    #[must_use]
    pub fn new(engine: FilterEngine, options: &Options) -> Self {
        Self {
            engine,
            scan_interval: options.scan_interval.max(Duration::from_millis(1)),
            pending: PendingScans::new(options.mutation_debounce, options.interaction_debounce),
            summary: RunSummary::default(),
        }
    }

    /// Run until the host event channel closes or the engine cannot attach.
    ///
    /// Starts the engine at script load and scans once immediately. Returns
    /// the page in its final state along with a summary of the run.
    pub async fn run(
        mut self,
        page: Page,
        mut events: mpsc::UnboundedReceiver<HostEvent>,
    ) -> (Page, RunSummary) {
        self.engine.start(LifecyclePoint::ScriptLoad);
        if !self.scan(&page, ScanTrigger::Start) {
            return (page, self.summary);
        }

        let mut ticker = time::interval_at(Instant::now() + self.scan_interval, self.scan_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            let deadline = self.pending.next_deadline();
            let attached = tokio::select! {
                _ = ticker.tick() => self.scan(&page, ScanTrigger::Timer),
                event = events.recv() => match event {
                    Some(event) => self.handle(&page, event),
                    None => break,
                },
                () = sleep_until_opt(deadline) => {
                    let now = Instant::now();
                    let mut attached = true;
                    while let Some(trigger) = self.pending.take_due(now) {
                        attached &= self.scan(&page, trigger);
                    }
                    attached
                }
            };
            if !attached {
                break;
            }
        }

        debug!(
            "Scheduler stopped after {} scans, {} removals",
            self.summary.scans,
            self.summary.removals.len()
        );
        (page, self.summary)
    }

    /// React to one host event. Returns `false` if the engine gave up.
    fn handle(&mut self, page: &Page, event: HostEvent) -> bool {
        match event {
            HostEvent::Mutate(mutation) => match page.apply(&mutation) {
                Ok(record) if record.added_any() => {
                    self.pending.arm_mutation(Instant::now());
                }
                Ok(_) => {}
                Err(e) => debug!("Host mutation not applied: {e}"),
            },
            HostEvent::Interaction(kind) => {
                debug!("Interaction {kind:?}; scan pending");
                self.pending.arm_interaction(Instant::now());
            }
            HostEvent::Lifecycle(point) => {
                self.engine.start(point);
                return self.scan(page, ScanTrigger::Lifecycle);
            }
            HostEvent::Settings(settings) => self.engine.set_settings(settings),
        }
        true
    }

    /// Run one scan pass. Returns `false` if the engine cannot attach.
    fn scan(&mut self, page: &Page, trigger: ScanTrigger) -> bool {
        self.summary.scans += 1;
        match self.engine.scan(page.document()) {
            Ok(report) => {
                if !report.removals.is_empty() {
                    debug!("{trigger} scan removed {} results", report.removals.len());
                }
                self.summary.removals.extend(report.removals);
                true
            }
            Err(e) => {
                warn!("Flight filter cannot attach to this page, giving up: {e}");
                self.summary.gave_up = true;
                false
            }
        }
    }
}
