//! # Message Publisher
//!
//! Defines the producing side of the bus.

use crate::message::{BusMessage, DeliveryMode, Payload};
use crate::registry::ConsumerRegistry;
use crate::subscriber::{BusError, Subscription};
use async_trait::async_trait;
use shared_types::Address;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, warn};

/// Trait for putting messages on the bus.
///
/// Both operations return as soon as the message is queued. They never wait
/// for a consumer to handle it.
#[async_trait]
pub trait MessagePublisher: Send + Sync {
    /// Point-to-point send to exactly one current consumer of `address`.
    ///
    /// # Returns
    ///
    /// 1 if a consumer took the message, 0 if the address had none.
    async fn send(&self, address: &Address, payload: Payload) -> usize;

    /// Broadcast to every consumer of `address` registered right now.
    ///
    /// # Returns
    ///
    /// The number of consumers the message was queued for.
    async fn publish(&self, address: &Address, payload: Payload) -> usize;

    /// Get the total number of point-to-point sends attempted.
    fn messages_sent(&self) -> u64;

    /// Get the total number of broadcasts attempted.
    fn messages_published(&self) -> u64;
}

/// In-memory implementation of the message bus.
///
/// Suitable for single-process operation; a clustered deployment would
/// put a network transport behind the same API.
pub struct InMemoryMessageBus {
    /// Routing table shared with live subscriptions.
    registry: Arc<ConsumerRegistry>,

    /// Total point-to-point sends attempted.
    messages_sent: AtomicU64,

    /// Total broadcasts attempted.
    messages_published: AtomicU64,
}

impl InMemoryMessageBus {
    /// Create a new in-memory message bus.
    #[must_use]
    pub fn new() -> Self {
        Self {
            registry: Arc::new(ConsumerRegistry::default()),
            messages_sent: AtomicU64::new(0),
            messages_published: AtomicU64::new(0),
        }
    }

    /// Register a consumer on an address.
    ///
    /// Returns a `Subscription` handle that receives messages until dropped.
    ///
    /// # Errors
    ///
    /// `BusError::Closed` if the bus has been closed.
    pub fn consumer(&self, address: &Address) -> Result<Subscription, BusError> {
        let (id, receiver) = self.registry.register(address)?;

        debug!(address = %address, consumer = %id, "New consumer registered");

        Ok(Subscription::new(
            id,
            address.clone(),
            receiver,
            Arc::clone(&self.registry),
        ))
    }

    /// Get the number of consumers on an address.
    #[must_use]
    pub fn consumer_count(&self, address: &Address) -> usize {
        self.registry.consumer_count(address)
    }

    /// Get the number of consumers across all addresses.
    #[must_use]
    pub fn total_consumers(&self) -> usize {
        self.registry.total_consumers()
    }

    /// Close the bus. Existing consumers drain what is queued and then see
    /// end of stream; new consumers are refused.
    pub fn close(&self) {
        self.registry.close();
        debug!("Message bus closed");
    }

    /// Whether `close` has been called.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.registry.is_closed()
    }
}

impl Default for InMemoryMessageBus {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MessagePublisher for InMemoryMessageBus {
    async fn send(&self, address: &Address, payload: Payload) -> usize {
        // Always increment counter (send was attempted)
        self.messages_sent.fetch_add(1, Ordering::Relaxed);

        let message = BusMessage::new(address.clone(), payload, DeliveryMode::Send);
        let id = message.id;
        let kind = message.payload.kind();

        let delivered = self.registry.deliver_one(message);
        if delivered == 0 {
            warn!(address = %address, message_id = %id, "Message dropped (no consumers)");
        } else {
            debug!(address = %address, message_id = %id, payload = kind, "Message sent");
        }
        delivered
    }

    async fn publish(&self, address: &Address, payload: Payload) -> usize {
        self.messages_published.fetch_add(1, Ordering::Relaxed);

        let message = BusMessage::new(address.clone(), payload, DeliveryMode::Publish);
        let receivers = self.registry.deliver_all(&message);

        if receivers == 0 {
            warn!(
                address = %address,
                message_id = %message.id,
                "Message dropped (no consumers)"
            );
        } else {
            debug!(
                address = %address,
                message_id = %message.id,
                payload = message.payload.kind(),
                receivers = receivers,
                "Message published"
            );
        }
        receivers
    }

    fn messages_sent(&self) -> u64 {
        self.messages_sent.load(Ordering::Relaxed)
    }

    fn messages_published(&self) -> u64 {
        self.messages_published.load(Ordering::Relaxed)
    }
}
