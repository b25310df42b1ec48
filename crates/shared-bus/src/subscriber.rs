//! # Subscriber
//!
//! Defines the consuming side of the bus.

use crate::message::BusMessage;
use crate::registry::ConsumerRegistry;
use shared_types::Address;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use thiserror::Error;
use tokio::sync::mpsc;
use tokio_stream::Stream;
use tracing::debug;
use uuid::Uuid;

/// Errors from bus operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BusError {
    /// The message bus was closed.
    #[error("Message bus closed")]
    Closed,
}

/// A consumer registration on one address.
///
/// When dropped, the consumer is unregistered and stops receiving messages.
pub struct Subscription {
    /// Consumer identifier.
    id: Uuid,

    /// Address this consumer listens on.
    address: Address,

    /// Queue of messages routed to this consumer.
    receiver: mpsc::UnboundedReceiver<BusMessage>,

    /// Reference to the routing table (for cleanup).
    registry: Arc<ConsumerRegistry>,
}

impl Subscription {
    /// Create a new subscription.
    pub(crate) fn new(
        id: Uuid,
        address: Address,
        receiver: mpsc::UnboundedReceiver<BusMessage>,
        registry: Arc<ConsumerRegistry>,
    ) -> Self {
        Self {
            id,
            address,
            receiver,
            registry,
        }
    }

    /// Receive the next message routed to this consumer.
    ///
    /// # Returns
    ///
    /// - `Some(message)` - The next message, in dispatch order
    /// - `None` - The bus was closed and the queue is drained
    pub async fn recv(&mut self) -> Option<BusMessage> {
        self.receiver.recv().await
    }

    /// Try to receive the next message without waiting.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(message))` - A message was queued
    /// - `Ok(None)` - Nothing queued yet
    /// - `Err(BusError::Closed)` - The bus was closed and the queue is drained
    pub fn try_recv(&mut self) -> Result<Option<BusMessage>, BusError> {
        match self.receiver.try_recv() {
            Ok(message) => Ok(Some(message)),
            Err(mpsc::error::TryRecvError::Empty) => Ok(None),
            Err(mpsc::error::TryRecvError::Disconnected) => Err(BusError::Closed),
        }
    }

    /// Consumer identifier.
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Address this consumer listens on.
    #[must_use]
    pub fn address(&self) -> &Address {
        &self.address
    }

    /// Convert into a `Stream` of messages.
    #[must_use]
    pub fn into_stream(self) -> MessageStream {
        MessageStream::new(self)
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if self.registry.unregister(&self.address, self.id) {
            debug!(address = %self.address, consumer = %self.id, "Consumer unregistered");
        }
    }
}

/// A stream wrapper for subscriptions.
///
/// Implements `tokio_stream::Stream` for use with stream combinators.
pub struct MessageStream {
    subscription: Subscription,
}

impl MessageStream {
    /// Create a new message stream from a subscription.
    #[must_use]
    pub fn new(subscription: Subscription) -> Self {
        Self { subscription }
    }

    /// Address this stream listens on.
    #[must_use]
    pub fn address(&self) -> &Address {
        self.subscription.address()
    }
}

impl Stream for MessageStream {
    type Item = BusMessage;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.subscription.receiver.poll_recv(cx)
    }
}
