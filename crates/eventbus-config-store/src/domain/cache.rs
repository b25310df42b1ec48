//! Cached configuration slot
//!
//! Single-writer, multi-reader slot. The value is always replaced wholesale
//! through an atomic pointer swap, so a reader sees either the previous or
//! the new configuration and never a mix.

use arc_swap::ArcSwap;
use shared_types::ConfigValue;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// The most recently applied configuration.
pub struct ConfigCache {
    slot: ArcSwap<ConfigValue>,
    /// Number of replacements applied since creation or the last reset.
    generation: AtomicU64,
}

impl ConfigCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slot: ArcSwap::from_pointee(ConfigValue::empty()),
            generation: AtomicU64::new(0),
        }
    }

    /// Current snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Arc<ConfigValue> {
        self.slot.load_full()
    }

    /// Replace the cached value. Returns the new generation.
    pub fn replace(&self, value: ConfigValue) -> u64 {
        self.slot.store(Arc::new(value));
        self.generation.fetch_add(1, Ordering::AcqRel) + 1
    }

    /// Empty the cache and restart the generation count.
    pub fn reset(&self) {
        self.slot.store(Arc::new(ConfigValue::empty()));
        self.generation.store(0, Ordering::Release);
    }

    /// Replacements applied so far.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }
}

impl Default for ConfigCache {
    fn default() -> Self {
        Self::new()
    }
}
