//! Message source backed by the shared in-memory bus
//!
//! Lets an `Arc<InMemoryMessageBus>` be handed to stores directly as an
//! `Arc<dyn MessageSource>` while producers keep publishing on the same bus.

use crate::error::TransportError;
use crate::ports::outbound::{InboundMessages, MessageSource};
use shared_bus::InMemoryMessageBus;
use shared_types::Address;

impl MessageSource for InMemoryMessageBus {
    fn subscribe(&self, address: &Address) -> Result<InboundMessages, TransportError> {
        let subscription = self.consumer(address)?;
        Ok(Box::pin(subscription.into_stream()))
    }
}
