//! Event-bus configuration store
//!
//! Answers "what is the configuration right now" from the listener's cache
//! without waiting on bus activity.

use async_trait::async_trait;
use shared_types::{Address, ConfigValue};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::domain::EventBusStoreOptions;
use crate::error::{LifecycleError, StoreError};
use crate::listener::{BusListener, ListenerStatus};
use crate::metrics::StoreMetrics;
use crate::ports::inbound::ConfigStore;
use crate::ports::outbound::MessageSource;

/// Configuration store whose data source is a bus address.
///
/// Each instance owns its own subscription and cache slot; several stores
/// may listen on the same address.
pub struct EventBusConfigStore {
    id: Uuid,
    listener: BusListener,
    metrics: Arc<StoreMetrics>,
}

impl EventBusConfigStore {
    /// Create a store and subscribe it to `options.address`.
    ///
    /// # Errors
    ///
    /// `StoreError::Transport` if the subscription cannot be set up. No
    /// half-subscribed store is ever returned.
    pub fn new(
        source: Arc<dyn MessageSource>,
        options: EventBusStoreOptions,
    ) -> Result<Self, StoreError> {
        let metrics = Arc::new(StoreMetrics::new());
        let listener = BusListener::new(options.address, source, Arc::clone(&metrics));
        listener.subscribe()?;

        let id = Uuid::new_v4();
        info!(store = %id, address = %listener.address(), "Event-bus config store created");

        Ok(Self {
            id,
            listener,
            metrics,
        })
    }

    /// Instance identifier, for correlating logs.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Address this store listens on.
    pub fn address(&self) -> &Address {
        self.listener.address()
    }

    /// Whether `close` has been called.
    pub fn is_closed(&self) -> bool {
        self.listener.status() == ListenerStatus::Disposed
    }

    /// Store counters.
    pub fn metrics(&self) -> &StoreMetrics {
        &self.metrics
    }

    /// The underlying listener.
    pub fn listener(&self) -> &BusListener {
        &self.listener
    }
}

#[async_trait]
impl ConfigStore for EventBusConfigStore {
    async fn get_configuration(&self) -> Result<ConfigValue, StoreError> {
        if self.is_closed() {
            return Err(LifecycleError::Disposed.into());
        }
        let snapshot = self.listener.snapshot();
        self.metrics.record_read();
        Ok(snapshot)
    }

    async fn close(&self) -> Result<(), StoreError> {
        if self.is_closed() {
            return Ok(());
        }
        self.listener.unsubscribe().await;
        info!(store = %self.id, address = %self.address(), "Event-bus config store closed");
        Ok(())
    }
}
