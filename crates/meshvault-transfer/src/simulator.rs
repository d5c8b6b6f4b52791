//! Transfer simulator - the upload queue and its tick
//!
//! Items keep insertion order. A tick walks the queue once, so items that
//! finish on the same tick are reported front to back.

use meshvault_core::{CancelFlag, TransferId};
use tracing::{debug, info, warn};

use crate::{
    advance, Advance, CompletionEvent, CompletionSink, DigestMint, IncrementSource, NullSink,
    RandomIncrement, TransferItem, TransferRequest, MAX_INCREMENT,
};

/// Counters for the simulator
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TransferStats {
    pub ticks: u64,
    pub submitted: u64,
    pub completed: u64,
    pub failed: u64,
    pub removed: u64,
    /// Increments above MAX_INCREMENT that had to be clamped
    pub clamped_increments: u64,
    /// Increments that were zero, negative or NaN and left the item where it was
    pub stalled_increments: u64,
}

/// Result of one tick
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickSummary {
    /// Items whose progress moved
    pub advanced: usize,
    /// Items completed on this tick, in queue order
    pub completed: Vec<TransferId>,
    /// One event per completed item, in the same order
    pub events: Vec<CompletionEvent>,
}

/// Owns the transfer queue and evolves it one tick at a time
pub struct TransferSimulator<I: IncrementSource = RandomIncrement> {
    items: Vec<TransferItem>,
    next_id: TransferId,
    increments: I,
    digests: DigestMint,
    sink: Box<dyn CompletionSink + Send>,
    cancel: CancelFlag,
    stats: TransferStats,
}

impl TransferSimulator<RandomIncrement> {
    /// Simulator with entropy-seeded random increments
    pub fn new() -> Self {
        Self::with_increments(RandomIncrement::new())
    }

    /// Fully reproducible simulator: increments and digests derive from `seed`
    pub fn with_seed(seed: u64) -> Self {
        Self::with_increments(RandomIncrement::with_seed(seed))
            .with_digests(DigestMint::with_seed(seed.wrapping_add(1)))
    }
}

impl Default for TransferSimulator<RandomIncrement> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: IncrementSource> TransferSimulator<I> {
    pub fn with_increments(increments: I) -> Self {
        Self {
            items: Vec::new(),
            next_id: TransferId::new(1),
            increments,
            digests: DigestMint::new(),
            sink: Box::new(NullSink),
            cancel: CancelFlag::new(),
            stats: TransferStats::default(),
        }
    }

    pub fn with_digests(mut self, digests: DigestMint) -> Self {
        self.digests = digests;
        self
    }

    pub fn with_sink(mut self, sink: impl CompletionSink + Send + 'static) -> Self {
        self.set_sink(sink);
        self
    }

    pub fn set_sink(&mut self, sink: impl CompletionSink + Send + 'static) {
        self.sink = Box::new(sink);
    }

    /// Queue a new item at zero progress and return its handle
    pub fn submit(&mut self, request: TransferRequest) -> TransferId {
        let id = self.next_id;
        self.next_id = id.next();

        let mut item = TransferItem::new(id, request);
        item.begin();
        debug!(id = %id, name = %item.name(), size = item.size_bytes(), "transfer submitted");

        self.items.push(item);
        self.stats.submitted += 1;
        id
    }

    /// Advance every in-flight item once and notify the sink. No-op after `cancel`.
    pub fn tick(&mut self) -> TickSummary {
        let summary = self.step();
        for event in &summary.events {
            self.sink.on_complete(event);
        }
        summary
    }

    /// Advance every in-flight item once without touching the sink.
    /// Completion events come back in the summary, in queue order.
    pub fn step(&mut self) -> TickSummary {
        let mut summary = TickSummary::default();
        if self.cancel.is_cancelled() {
            return summary;
        }
        self.stats.ticks += 1;

        for item in self.items.iter_mut() {
            if item.is_terminal() {
                continue;
            }

            let raw = self.increments.next_increment(item.id());
            if raw > MAX_INCREMENT {
                warn!(id = %item.id(), increment = raw, "increment out of range, clamping");
                self.stats.clamped_increments += 1;
            } else if raw.is_nan() || raw <= 0.0 {
                warn!(id = %item.id(), increment = raw, "increment not positive, item stalled");
                self.stats.stalled_increments += 1;
            }

            let digests = &mut self.digests;
            match advance(item, raw, || digests.mint()) {
                Advance::Idle => {}
                Advance::Progressed => summary.advanced += 1,
                Advance::Completed => {
                    summary.advanced += 1;
                    summary.completed.push(item.id());
                    self.stats.completed += 1;

                    // advance() sets the digest whenever it reports Completed
                    if let Some(digest) = item.digest().cloned() {
                        let event = CompletionEvent {
                            id: item.id(),
                            name: item.name().to_string(),
                            digest,
                        };
                        info!(
                            id = %event.id,
                            name = %event.name,
                            digest = %event.digest,
                            "transfer completed"
                        );
                        summary.events.push(event);
                    }
                }
            }
        }

        summary
    }

    /// Hand the sink to the caller, leaving a [`NullSink`] in its place
    pub fn take_sink(&mut self) -> Box<dyn CompletionSink + Send> {
        std::mem::replace(&mut self.sink, Box::new(NullSink))
    }

    /// Drop an item from the queue whatever its status. Unknown ids are ignored.
    pub fn remove(&mut self, id: TransferId) -> Option<TransferItem> {
        let index = self.items.iter().position(|item| item.id() == id)?;
        self.stats.removed += 1;
        debug!(id = %id, "transfer removed");
        Some(self.items.remove(index))
    }

    /// Fault injection: move a non-terminal item to Failed.
    /// Returns false if the item is unknown or already terminal.
    pub fn fail(&mut self, id: TransferId) -> bool {
        let Some(item) = self.items.iter_mut().find(|item| item.id() == id) else {
            return false;
        };
        if !item.fail() {
            return false;
        }
        warn!(id = %id, name = %item.name(), progress = item.progress(), "transfer failed");
        self.stats.failed += 1;
        true
    }

    /// Stop the simulation. Idempotent; later ticks do nothing.
    pub fn cancel(&mut self) {
        if self.cancel.cancel() {
            info!(active = self.active_count(), "transfer simulator cancelled");
        }
    }

    /// Handle that cancels this simulator from elsewhere
    pub fn cancel_handle(&self) -> CancelFlag {
        self.cancel.clone()
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    pub fn get(&self, id: TransferId) -> Option<&TransferItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Queue contents in insertion order
    pub fn items(&self) -> &[TransferItem] {
        &self.items
    }

    /// Items still moving
    pub fn active_count(&self) -> usize {
        self.items.iter().filter(|item| !item.is_terminal()).count()
    }

    /// True when no item is still moving
    pub fn is_idle(&self) -> bool {
        self.active_count() == 0
    }

    pub fn stats(&self) -> &TransferStats {
        &self.stats
    }
}
