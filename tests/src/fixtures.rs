//! Shared fixtures for the integration suite.

use eventbus_config_store::{
    ConfigStore, ConfigStoreFactory, EventBusConfigStoreFactory, RetryPolicy, StoreError,
};
use serde_json::json;
use shared_bus::InMemoryMessageBus;
use shared_types::{Address, ConfigValue};
use std::sync::Arc;
use std::time::Duration;

/// Reference configuration document used across scenarios.
pub const JSON: &str = r#"{"key":"value","array":["0","1","2"]}"#;

/// Address the scenarios listen on.
pub const CONFIG_ADDRESS: &str = "config";

/// The reference document as a structured value.
pub fn reference_config() -> ConfigValue {
    ConfigValue::from_json_str(JSON).expect("reference JSON is an object")
}

/// Assert a configuration matches the reference document.
pub fn check_reference(config: &ConfigValue) {
    assert_eq!(config.get_str("key"), Some("value"));
    assert_eq!(config.get("array"), Some(&json!(["0", "1", "2"])));
    assert_eq!(config.len(), 2);
}

/// The scenario address.
pub fn config_address() -> Address {
    Address::new(CONFIG_ADDRESS).expect("valid address")
}

/// A fresh bus.
pub fn new_bus() -> Arc<InMemoryMessageBus> {
    Arc::new(InMemoryMessageBus::new())
}

/// Create a store through the factory, as the host framework would.
pub fn create_store(
    bus: &Arc<InMemoryMessageBus>,
    address: &str,
) -> Result<Arc<dyn ConfigStore>, StoreError> {
    EventBusConfigStoreFactory.create(bus.clone(), &json!({ "address": address }))
}

/// Retry policy used by the scenarios.
pub fn policy() -> RetryPolicy {
    RetryPolicy::new(Duration::from_millis(2), Duration::from_secs(5))
}
