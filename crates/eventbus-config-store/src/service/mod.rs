//! Service Layer
//!
//! - `EventBusConfigStore`: implements `ConfigStore`

pub mod event_bus_store;

pub use event_bus_store::EventBusConfigStore;
