//! Outbound Ports (Driven Ports)
//!
//! The store depends on the bus only through [`MessageSource`].

use crate::error::TransportError;
use shared_bus::BusMessage;
use shared_types::Address;
use std::pin::Pin;
use tokio_stream::Stream;

/// Messages delivered to one consumer, in transport order.
///
/// Dropping the stream releases the consumer registration.
pub type InboundMessages = Pin<Box<dyn Stream<Item = BusMessage> + Send>>;

/// Message source (Driven Port)
///
/// Registration must be complete when `subscribe` returns, so that any
/// message dispatched afterwards reaches the returned stream.
pub trait MessageSource: Send + Sync {
    /// Register a consumer on `address`.
    fn subscribe(&self, address: &Address) -> Result<InboundMessages, TransportError>;
}
