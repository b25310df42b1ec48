//! Metrics for store operations
//!
//! Counters for the listener (messages received, applied, dropped) and the
//! read path.
//!
//! ## Usage
//!
//! ```ignore
//! let store = EventBusConfigStore::new(source, options)?;
//! let snapshot = store.metrics().snapshot();
//! println!("decode failures: {}", snapshot.decode_failures);
//! ```

use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe counters for one store instance.
#[derive(Default, Debug)]
pub struct StoreMetrics {
    /// Messages delivered to the listener
    pub messages_received: AtomicU64,
    /// Messages decoded and applied to the cache
    pub updates_applied: AtomicU64,
    /// Messages dropped because they could not be decoded
    pub decode_failures: AtomicU64,
    /// Successful configuration reads
    pub reads_served: AtomicU64,
}

impl StoreMetrics {
    /// Create a new metrics collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message arriving at the listener
    pub fn record_received(&self) {
        self.messages_received.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a successful cache replacement
    pub fn record_applied(&self) {
        self.updates_applied.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a dropped, undecodable message
    pub fn record_decode_failure(&self) {
        self.decode_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a served read
    pub fn record_read(&self) {
        self.reads_served.fetch_add(1, Ordering::Relaxed);
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> StoreMetricsSnapshot {
        StoreMetricsSnapshot {
            messages_received: self.messages_received.load(Ordering::Relaxed),
            updates_applied: self.updates_applied.load(Ordering::Relaxed),
            decode_failures: self.decode_failures.load(Ordering::Relaxed),
            reads_served: self.reads_served.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of [`StoreMetrics`]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StoreMetricsSnapshot {
    pub messages_received: u64,
    pub updates_applied: u64,
    pub decode_failures: u64,
    pub reads_served: u64,
}
