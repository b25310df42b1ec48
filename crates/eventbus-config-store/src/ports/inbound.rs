//! Inbound Ports (Driving Ports)
//!
//! These traits define the API that the host configuration framework uses
//! to create and read stores.

use async_trait::async_trait;
use serde_json::Value;
use shared_types::ConfigValue;
use std::sync::Arc;

use crate::error::StoreError;
use crate::ports::outbound::MessageSource;

/// A source of "the current configuration".
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Current configuration snapshot.
    ///
    /// Never waits for bus activity. Before anything has been received this
    /// is an empty configuration, not an error.
    async fn get_configuration(&self) -> Result<ConfigValue, StoreError>;

    /// Current configuration as compact UTF-8 JSON (`{}` when empty).
    async fn get_raw(&self) -> Result<Vec<u8>, StoreError> {
        Ok(self.get_configuration().await?.to_bytes())
    }

    /// Release the store. Later reads fail with a lifecycle error.
    async fn close(&self) -> Result<(), StoreError>;
}

/// Creates stores of one kind from host-supplied options.
pub trait ConfigStoreFactory: Send + Sync {
    /// Store kind name used in host configuration.
    fn name(&self) -> &'static str;

    /// Build and start a store.
    ///
    /// # Errors
    ///
    /// Invalid options, or a subscription that could not be set up.
    fn create(
        &self,
        source: Arc<dyn MessageSource>,
        options: &Value,
    ) -> Result<Arc<dyn ConfigStore>, StoreError>;
}
