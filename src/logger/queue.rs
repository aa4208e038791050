//! Bounded hand-off between producers and the batch worker.
//!
//! # Responsibilities
//! - Accept entries from any number of producers, in arrival order
//! - Suspend producers while the queue is full (no drops, no timeout)
//! - Let the single consumer close the queue and drain what is left

use thiserror::Error;
use tokio::sync::mpsc;

use crate::logger::entry::LogEntry;

/// The queue was closed by the consumer; the entry was not accepted.
#[derive(Debug, Error)]
#[error("entry queue is closed")]
pub struct QueueClosed;

/// Create a queue holding at most `capacity` entries.
///
/// # Panics
/// Panics if `capacity` is zero; the logger validates it before calling.
pub fn bounded(capacity: usize) -> (EntryProducer, EntryConsumer) {
    let (tx, rx) = mpsc::channel(capacity);
    (EntryProducer { tx }, EntryConsumer { rx })
}

/// Producer half. Clone freely; every call site may hold one.
#[derive(Debug, Clone)]
pub struct EntryProducer {
    tx: mpsc::Sender<LogEntry>,
}

impl EntryProducer {
    /// Enqueue an entry, waiting for a free slot when the queue is full.
    pub async fn send(&self, entry: LogEntry) -> Result<(), QueueClosed> {
        self.tx.send(entry).await.map_err(|_| QueueClosed)
    }

    /// Configured capacity.
    pub fn capacity(&self) -> usize {
        self.tx.max_capacity()
    }

    /// Slots currently free.
    pub fn available(&self) -> usize {
        self.tx.capacity()
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Consumer half, owned by the batch worker.
#[derive(Debug)]
pub struct EntryConsumer {
    rx: mpsc::Receiver<LogEntry>,
}

impl EntryConsumer {
    /// Next entry in arrival order; `None` once closed and empty.
    pub async fn recv(&mut self) -> Option<LogEntry> {
        self.rx.recv().await
    }

    /// Refuse further entries. Entries already queued stay receivable.
    pub fn close(&mut self) {
        self.rx.close();
    }
}
