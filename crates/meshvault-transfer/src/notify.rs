//! Completion notifications
//!
//! The simulator reports each finished item exactly once. How that reaches a
//! person (toast, log line, status bar) is up to the sink.

use std::sync::{mpsc, Arc};

use meshvault_core::TransferId;
use parking_lot::Mutex;

use crate::Digest;

/// Emitted once per item, on the tick it reaches 100
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionEvent {
    pub id: TransferId,
    pub name: String,
    pub digest: Digest,
}

/// Receives completion events in queue order
pub trait CompletionSink {
    fn on_complete(&mut self, event: &CompletionEvent);
}

impl<F> CompletionSink for F
where
    F: FnMut(&CompletionEvent),
{
    fn on_complete(&mut self, event: &CompletionEvent) {
        self(event)
    }
}

/// Forwards events over a channel. A hung-up receiver is ignored.
impl CompletionSink for mpsc::Sender<CompletionEvent> {
    fn on_complete(&mut self, event: &CompletionEvent) {
        let _ = self.send(event.clone());
    }
}

/// Discards every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl CompletionSink for NullSink {
    fn on_complete(&mut self, _event: &CompletionEvent) {}
}

/// Collects events into a shared list. Clones append to the same list.
#[derive(Debug, Clone, Default)]
pub struct CompletionLog {
    events: Arc<Mutex<Vec<CompletionEvent>>>,
}

impl CompletionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Events received so far, oldest first
    pub fn events(&self) -> Vec<CompletionEvent> {
        self.events.lock().clone()
    }

    pub fn ids(&self) -> Vec<TransferId> {
        self.events.lock().iter().map(|e| e.id).collect()
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }

    /// Drain everything received so far
    pub fn take(&self) -> Vec<CompletionEvent> {
        std::mem::take(&mut *self.events.lock())
    }
}

impl CompletionSink for CompletionLog {
    fn on_complete(&mut self, event: &CompletionEvent) {
        self.events.lock().push(event.clone());
    }
}
