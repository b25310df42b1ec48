//! # Bus Messages
//!
//! Defines the envelope and payload shapes that flow through the bus.

use serde::{Deserialize, Serialize};
use shared_types::{Address, ConfigValue};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Body of a bus message.
///
/// Configuration producers may either hand over an already structured
/// object or its serialized UTF-8 form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Payload {
    /// A structured key/value object.
    Structured(ConfigValue),
    /// Opaque bytes expected to contain a UTF-8 encoded JSON object.
    Bytes(Vec<u8>),
}

impl Payload {
    /// Short name of the payload shape, for logging.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Structured(_) => "structured",
            Self::Bytes(_) => "bytes",
        }
    }
}

impl From<ConfigValue> for Payload {
    fn from(value: ConfigValue) -> Self {
        Self::Structured(value)
    }
}

impl From<Vec<u8>> for Payload {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}

impl From<&[u8]> for Payload {
    fn from(bytes: &[u8]) -> Self {
        Self::Bytes(bytes.to_vec())
    }
}

/// How a message was dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeliveryMode {
    /// Point-to-point to a single consumer.
    Send,
    /// Broadcast to all consumers.
    Publish,
}

/// A message as delivered to a consumer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusMessage {
    /// Unique message identifier. Shared by every copy of a published message.
    pub id: Uuid,
    /// Destination address.
    pub address: Address,
    /// Message body.
    pub payload: Payload,
    /// Dispatch mode.
    pub mode: DeliveryMode,
    /// Dispatch time in milliseconds since the Unix epoch.
    pub sent_at_ms: u64,
}

impl BusMessage {
    /// Create a new message stamped with a fresh id and the current time.
    #[must_use]
    pub fn new(address: Address, payload: Payload, mode: DeliveryMode) -> Self {
        Self {
            id: Uuid::new_v4(),
            address,
            payload,
            mode,
            sent_at_ms: current_timestamp_ms(),
        }
    }
}

/// Get current Unix timestamp in milliseconds.
fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
