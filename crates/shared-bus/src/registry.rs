//! # Consumer Registry
//!
//! Per-address routing table shared by the bus and its subscriptions.
//! Each consumer owns an unbounded FIFO queue, so delivery order per
//! consumer is dispatch order.

use crate::message::BusMessage;
use crate::subscriber::BusError;
use parking_lot::RwLock;
use shared_types::Address;
use std::collections::HashMap;
use tokio::sync::mpsc;
use uuid::Uuid;

struct ConsumerSlot {
    id: Uuid,
    sender: mpsc::UnboundedSender<BusMessage>,
}

#[derive(Default)]
struct Route {
    consumers: Vec<ConsumerSlot>,
    /// Round-robin position for point-to-point sends.
    cursor: usize,
}

#[derive(Default)]
struct RegistryState {
    routes: HashMap<Address, Route>,
    closed: bool,
}

#[derive(Default)]
pub(crate) struct ConsumerRegistry {
    state: RwLock<RegistryState>,
}

impl ConsumerRegistry {
    pub(crate) fn register(
        &self,
        address: &Address,
    ) -> Result<(Uuid, mpsc::UnboundedReceiver<BusMessage>), BusError> {
        let mut state = self.state.write();
        if state.closed {
            return Err(BusError::Closed);
        }

        let (sender, receiver) = mpsc::unbounded_channel();
        let id = Uuid::new_v4();
        state
            .routes
            .entry(address.clone())
            .or_default()
            .consumers
            .push(ConsumerSlot { id, sender });
        Ok((id, receiver))
    }

    /// Remove a consumer. Returns whether it was still registered.
    pub(crate) fn unregister(&self, address: &Address, id: Uuid) -> bool {
        let mut state = self.state.write();
        let Some(route) = state.routes.get_mut(address) else {
            return false;
        };

        let before = route.consumers.len();
        route.consumers.retain(|slot| slot.id != id);
        let removed = route.consumers.len() != before;

        if route.consumers.is_empty() {
            state.routes.remove(address);
        }
        removed
    }

    /// Deliver to one consumer, rotating. Consumers whose receiving side is
    /// gone are pruned on the way.
    pub(crate) fn deliver_one(&self, message: BusMessage) -> usize {
        let mut state = self.state.write();
        let address = message.address.clone();
        let Some(route) = state.routes.get_mut(&address) else {
            return 0;
        };

        let mut message = message;
        while !route.consumers.is_empty() {
            let index = route.cursor % route.consumers.len();
            match route.consumers[index].sender.send(message) {
                Ok(()) => {
                    route.cursor = index + 1;
                    return 1;
                }
                Err(mpsc::error::SendError(returned)) => {
                    route.consumers.remove(index);
                    message = returned;
                }
            }
        }

        state.routes.remove(&address);
        0
    }

    /// Deliver a copy to every consumer currently registered.
    pub(crate) fn deliver_all(&self, message: &BusMessage) -> usize {
        let state = self.state.read();
        let Some(route) = state.routes.get(&message.address) else {
            return 0;
        };

        route
            .consumers
            .iter()
            .filter(|slot| slot.sender.send(message.clone()).is_ok())
            .count()
    }

    pub(crate) fn consumer_count(&self, address: &Address) -> usize {
        self.state
            .read()
            .routes
            .get(address)
            .map_or(0, |route| route.consumers.len())
    }

    pub(crate) fn total_consumers(&self) -> usize {
        self.state
            .read()
            .routes
            .values()
            .map(|route| route.consumers.len())
            .sum()
    }

    /// Close the registry. Dropping every sender ends each consumer's
    /// queue once it has been drained.
    pub(crate) fn close(&self) {
        let mut state = self.state.write();
        state.closed = true;
        state.routes.clear();
    }

    pub(crate) fn is_closed(&self) -> bool {
        self.state.read().closed
    }
}
