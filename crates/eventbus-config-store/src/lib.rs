//! # Event-Bus Config Store
//!
//! Configuration store whose data source is a publish/subscribe message bus.
//! Callers ask for "the current configuration"; the store answers with the
//! last configuration delivered to its bus address, or an empty
//! configuration if nothing has arrived yet.
//!
//! ## Architecture
//!
//! This crate follows Hexagonal Architecture (Ports & Adapters):
//!
//! - **Domain Layer** (`domain/`): Pure logic, no I/O
//!   - `EventBusStoreOptions`: the `address` option
//!   - `decode_payload`: structured vs byte payload policy
//!   - `ConfigCache`: atomically swapped configuration slot
//!
//! - **Ports Layer** (`ports/`): Trait definitions
//!   - `ConfigStore`, `ConfigStoreFactory`: Driving ports
//!   - `MessageSource`: Driven port (the bus)
//!
//! - **Listener Layer** (`listener/`): Bus to cache bridge
//!   - `BusListener`: subscription lifecycle and dispatch task
//!   - `MessageHandler`: decode and apply one message
//!
//! - **Service Layer** (`service/`)
//!   - `EventBusConfigStore`: Implements `ConfigStore`
//!
//! - **Adapters Layer** (`adapters/`)
//!   - `MessageSource` for `shared_bus::InMemoryMessageBus`
//!
//! ## Consistency
//!
//! Sends and publishes return before the message is applied. A read right
//! after a publish may still return the previous (possibly empty) value.
//! Callers waiting for a specific value poll with a bounded
//! [`RetryPolicy`] (see [`retrieval`]).
//!
//! ## Usage Example
//!
//! ```ignore
//! use eventbus_config_store::{await_non_empty, ConfigStore, EventBusConfigStoreFactory,
//!     ConfigStoreFactory, RetryPolicy};
//! use shared_bus::{InMemoryMessageBus, MessagePublisher, Payload};
//! use std::sync::Arc;
//!
//! let bus = Arc::new(InMemoryMessageBus::new());
//! let store = EventBusConfigStoreFactory.create(bus.clone(), &json!({ "address": "config" }))?;
//! assert!(store.get_configuration().await?.is_empty());
//!
//! bus.send(&address, Payload::Bytes(br#"{"key":"value"}"#.to_vec())).await;
//! let config = await_non_empty(store.as_ref(), &RetryPolicy::default()).await?;
//! ```

pub mod adapters;
pub mod domain;
pub mod error;
pub mod factory;
pub mod listener;
pub mod metrics;
pub mod ports;
pub mod retrieval;
pub mod service;

// Re-exports for convenience
pub use domain::{ConfigCache, EventBusStoreOptions};
pub use error::{ConfigError, DecodeError, LifecycleError, StoreError, TransportError};
pub use factory::{factory_for, EventBusConfigStoreFactory, EVENT_BUS_STORE};
pub use listener::{BusListener, ListenerStatus, MessageHandler};
pub use metrics::{StoreMetrics, StoreMetricsSnapshot};
pub use ports::{ConfigStore, ConfigStoreFactory, InboundMessages, MessageSource};
pub use retrieval::{await_configuration, await_non_empty, await_value, RetryPolicy};
pub use service::EventBusConfigStore;
