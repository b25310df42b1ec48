//! Store options
//!
//! The host configuration framework hands each store a JSON object. This
//! store recognizes a single key, `address`, naming the bus destination to
//! listen on. Other keys are ignored.
//!
//! # Example
//!
//! ```ignore
//! use eventbus_config_store::domain::EventBusStoreOptions;
//! use serde_json::json;
//!
//! let options = EventBusStoreOptions::from_json(&json!({ "address": "config" }))?;
//! assert_eq!(options.address.as_str(), "config");
//! ```

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared_types::Address;

/// Key holding the bus address in the store options.
pub const ADDRESS_KEY: &str = "address";

/// Options for an event-bus store
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventBusStoreOptions {
    /// Bus destination to subscribe to
    pub address: Address,
}

impl EventBusStoreOptions {
    /// Options for a known address
    pub fn new(address: Address) -> Self {
        Self { address }
    }

    /// Parse options from the host's structured configuration
    pub fn from_json(options: &Value) -> Result<Self, ConfigError> {
        let Some(object) = options.as_object() else {
            return Err(ConfigError::NotAnObject);
        };

        match object.get(ADDRESS_KEY) {
            None | Some(Value::Null) => return Err(ConfigError::MissingAddress),
            Some(Value::String(_)) => {}
            Some(_) => {
                return Err(ConfigError::Invalid(format!(
                    "`{ADDRESS_KEY}` must be a string"
                )))
            }
        }

        serde_json::from_value(options.clone()).map_err(|e| ConfigError::Invalid(e.to_string()))
    }
}
