//! Payload decoding policy
//!
//! Both wire shapes are resolved here, once, into a [`ConfigValue`]:
//! structured bodies are taken as-is, byte bodies must be UTF-8 text
//! holding a JSON object.

use crate::error::DecodeError;
use shared_bus::Payload;
use shared_types::ConfigValue;

/// Decode an inbound payload into a configuration.
pub fn decode_payload(payload: Payload) -> Result<ConfigValue, DecodeError> {
    match payload {
        Payload::Structured(value) => Ok(value),
        Payload::Bytes(bytes) => Ok(ConfigValue::from_slice(&bytes)?),
    }
}
