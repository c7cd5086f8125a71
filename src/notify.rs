//! Removal notifications.
//!
//! Every successful removal produces a [`RemovalEvent`]. The engine hands it
//! to a [`RemovalSink`] and forgets it; persistence and cross-context counting
//! belong to whoever receives the event.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::mpsc;

use crate::dom::NodeId;
use crate::keywords::Reason;
use crate::{Error, Result};

/// A single removal, produced by the remover and consumed immediately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovalEvent {
    /// The detached container (identity only; the node is gone from the tree).
    pub node: NodeId,
    /// Which keyword set triggered the removal.
    pub reason: Reason,
    /// The literal keyword text that matched.
    pub keyword: String,
    /// Tag name of the removed container.
    pub tag: String,
}

/// Receiver of removal events.
///
/// Delivery failures are reported but never stop a scan.
pub trait RemovalSink {
    /// Deliver one event.
    fn notify(&self, event: &RemovalEvent) -> Result<()>;
}

/// Sink that drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl RemovalSink for NullSink {
    fn notify(&self, _event: &RemovalEvent) -> Result<()> {
        Ok(())
    }
}

/// Shared running total of removals.
///
/// Clones share the same counter, so one handle can sit in the engine while
/// another is read elsewhere.
#[derive(Debug, Clone, Default)]
pub struct RemovalCounter {
    total: Arc<AtomicU64>,
}

impl RemovalCounter {
    /// New counter starting at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current total.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.total.load(Ordering::Relaxed)
    }
}

impl RemovalSink for RemovalCounter {
    fn notify(&self, _event: &RemovalEvent) -> Result<()> {
        self.total.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}

/// Sink forwarding events over an unbounded channel.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<RemovalEvent>,
}

impl ChannelSink {
    /// Create a sink and the receiving half.
    #[must_use]
    pub fn new() -> (Self, mpsc::UnboundedReceiver<RemovalEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl RemovalSink for ChannelSink {
    fn notify(&self, event: &RemovalEvent) -> Result<()> {
        self.tx
            .send(event.clone())
            .map_err(|_| Error::Notify("receiver dropped".to_string()))
    }
}

impl<S: RemovalSink + ?Sized> RemovalSink for Box<S> {
    fn notify(&self, event: &RemovalEvent) -> Result<()> {
        (**self).notify(event)
    }
}

/// Fan one event out to several sinks.
///
/// Every sink is tried; the first failure is returned after all have run.
impl<A: RemovalSink, B: RemovalSink> RemovalSink for (A, B) {
    fn notify(&self, event: &RemovalEvent) -> Result<()> {
        let first = self.0.notify(event);
        let second = self.1.notify(event);
        first.and(second)
    }
}
