//! Per-message handling
//!
//! Applies the decoding policy and replaces the cache. Undecodable messages
//! are reported and dropped; the previous configuration stays in place.

use crate::domain::{decode_payload, ConfigCache};
use crate::error::DecodeError;
use crate::metrics::StoreMetrics;
use shared_bus::BusMessage;
use shared_types::Address;
use std::sync::Arc;
use tracing::{debug, warn};

/// Decodes inbound messages into the cache.
#[derive(Clone)]
pub struct MessageHandler {
    address: Address,
    cache: Arc<ConfigCache>,
    metrics: Arc<StoreMetrics>,
}

impl MessageHandler {
    /// Create a handler writing into `cache`.
    pub fn new(address: Address, cache: Arc<ConfigCache>, metrics: Arc<StoreMetrics>) -> Self {
        Self {
            address,
            cache,
            metrics,
        }
    }

    /// Handle one message.
    ///
    /// Returns the decode error for callers that want it; it has already
    /// been logged and counted.
    pub fn handle(&self, message: BusMessage) -> Result<u64, DecodeError> {
        self.metrics.record_received();

        let id = message.id;
        let mode = message.mode;
        let kind = message.payload.kind();

        match decode_payload(message.payload) {
            Ok(value) => {
                let keys = value.len();
                let generation = self.cache.replace(value);
                self.metrics.record_applied();
                debug!(
                    address = %self.address,
                    message_id = %id,
                    mode = ?mode,
                    payload = kind,
                    keys = keys,
                    generation = generation,
                    "Configuration updated"
                );
                Ok(generation)
            }
            Err(error) => {
                self.metrics.record_decode_failure();
                warn!(
                    address = %self.address,
                    message_id = %id,
                    payload = kind,
                    error = %error,
                    "Dropping undecodable configuration message"
                );
                Err(error)
            }
        }
    }
}
