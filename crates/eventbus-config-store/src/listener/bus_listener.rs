//! Bus Listener
//!
//! Owns one consumer registration on one address and the task that drains
//! it into the cache.
//!
//! ## State machine
//!
//! ```text
//! Unsubscribed ──subscribe()──▶ Subscribed ──unsubscribe()──▶ Disposed
//!       └────────────────────unsubscribe()──────────────────────┘
//! ```
//!
//! Disposed is terminal. A single task handles messages one at a time, so
//! they are applied in the order the transport delivers them.

use crate::domain::ConfigCache;
use crate::error::{LifecycleError, StoreError, TransportError};
use crate::listener::handler::MessageHandler;
use crate::metrics::StoreMetrics;
use crate::ports::outbound::{InboundMessages, MessageSource};
use parking_lot::Mutex;
use shared_bus::BusMessage;
use shared_types::{Address, ConfigValue};
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio_stream::StreamExt;
use tracing::{debug, info};

/// Externally visible listener state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerStatus {
    Unsubscribed,
    Subscribed,
    Disposed,
}

enum ListenerState {
    Unsubscribed,
    Subscribed { task: JoinHandle<()> },
    Disposed,
}

impl ListenerState {
    fn status(&self) -> ListenerStatus {
        match self {
            Self::Unsubscribed => ListenerStatus::Unsubscribed,
            Self::Subscribed { .. } => ListenerStatus::Subscribed,
            Self::Disposed => ListenerStatus::Disposed,
        }
    }
}

/// Subscribes to one address and keeps the latest configuration.
pub struct BusListener {
    address: Address,
    source: Arc<dyn MessageSource>,
    cache: Arc<ConfigCache>,
    handler: MessageHandler,
    state: Mutex<ListenerState>,
}

impl BusListener {
    /// Create an unsubscribed listener.
    pub fn new(
        address: Address,
        source: Arc<dyn MessageSource>,
        metrics: Arc<StoreMetrics>,
    ) -> Self {
        let cache = Arc::new(ConfigCache::new());
        let handler = MessageHandler::new(address.clone(), Arc::clone(&cache), metrics);
        Self {
            address,
            source,
            cache,
            handler,
            state: Mutex::new(ListenerState::Unsubscribed),
        }
    }

    /// Register on the bus and start applying messages.
    ///
    /// The cache starts out empty. The consumer is registered before this
    /// returns, so anything sent afterwards reaches this listener.
    ///
    /// # Errors
    ///
    /// - `LifecycleError::AlreadySubscribed` if already subscribed
    /// - `LifecycleError::Disposed` after `unsubscribe`
    /// - `TransportError` if the runtime or the bus is unavailable; the
    ///   listener is left unsubscribed
    pub fn subscribe(&self) -> Result<(), StoreError> {
        let mut state = self.state.lock();
        match &*state {
            ListenerState::Subscribed { .. } => {
                return Err(LifecycleError::AlreadySubscribed {
                    address: self.address.to_string(),
                }
                .into())
            }
            ListenerState::Disposed => return Err(LifecycleError::Disposed.into()),
            ListenerState::Unsubscribed => {}
        }

        let runtime = Handle::try_current().map_err(|_| TransportError::NoRuntime)?;
        let messages = self.source.subscribe(&self.address)?;

        self.cache.reset();
        let task = runtime.spawn(dispatch(messages, self.handler.clone(), self.address.clone()));
        *state = ListenerState::Subscribed { task };

        debug!(address = %self.address, "Listener subscribed");
        Ok(())
    }

    /// Stop listening and release the consumer registration.
    ///
    /// Moves the listener to Disposed. Calling it again is a no-op.
    pub async fn unsubscribe(&self) {
        let previous = std::mem::replace(&mut *self.state.lock(), ListenerState::Disposed);
        match previous {
            ListenerState::Subscribed { task } => {
                task.abort();
                // Resolves once the task, and with it the registration, is dropped.
                let _ = task.await;
                info!(address = %self.address, "Listener unsubscribed");
            }
            ListenerState::Unsubscribed => {
                debug!(address = %self.address, "Listener disposed before subscribing");
            }
            ListenerState::Disposed => {}
        }
    }

    /// Apply one message as if it had arrived from the bus.
    pub fn on_message(&self, message: BusMessage) -> Result<u64, crate::error::DecodeError> {
        self.handler.handle(message)
    }

    /// Copy of the current configuration.
    pub fn snapshot(&self) -> ConfigValue {
        self.cache.snapshot().as_ref().clone()
    }

    /// Number of configurations applied since subscribing.
    pub fn generation(&self) -> u64 {
        self.cache.generation()
    }

    /// Current lifecycle state.
    pub fn status(&self) -> ListenerStatus {
        self.state.lock().status()
    }

    /// Address this listener is bound to.
    pub fn address(&self) -> &Address {
        &self.address
    }
}

impl Drop for BusListener {
    fn drop(&mut self) {
        if let ListenerState::Subscribed { task } = &*self.state.get_mut() {
            task.abort();
        }
    }
}

async fn dispatch(mut messages: InboundMessages, handler: MessageHandler, address: Address) {
    while let Some(message) = messages.next().await {
        // Decode failures are reported by the handler; keep listening.
        let _ = handler.handle(message);
    }
    debug!(address = %address, "Message stream ended");
}
