//! Store factory
//!
//! The host framework creates stores by kind name plus a JSON options
//! object. This store's kind is `"event-bus"`.

use serde_json::Value;
use std::sync::Arc;

use crate::domain::EventBusStoreOptions;
use crate::error::StoreError;
use crate::ports::inbound::{ConfigStore, ConfigStoreFactory};
use crate::ports::outbound::MessageSource;
use crate::service::EventBusConfigStore;

/// Kind name of the event-bus store.
pub const EVENT_BUS_STORE: &str = "event-bus";

/// Builds [`EventBusConfigStore`]s.
#[derive(Debug, Default, Clone, Copy)]
pub struct EventBusConfigStoreFactory;

impl ConfigStoreFactory for EventBusConfigStoreFactory {
    fn name(&self) -> &'static str {
        EVENT_BUS_STORE
    }

    fn create(
        &self,
        source: Arc<dyn MessageSource>,
        options: &Value,
    ) -> Result<Arc<dyn ConfigStore>, StoreError> {
        let options = EventBusStoreOptions::from_json(options)?;
        Ok(Arc::new(EventBusConfigStore::new(source, options)?))
    }
}

/// Look up a factory by kind name.
pub fn factory_for(name: &str) -> Option<Box<dyn ConfigStoreFactory>> {
    match name {
        EVENT_BUS_STORE => Some(Box::new(EventBusConfigStoreFactory)),
        _ => None,
    }
}
