//! Error types for the event-bus configuration store

use shared_types::ValueError;
use std::time::Duration;
use thiserror::Error;

/// Errors surfaced to callers of the store
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Invalid store configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Lifecycle violation: {0}")]
    Lifecycle(#[from] LifecycleError),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Configuration not observed within {waited:?}")]
    Timeout { waited: Duration },
}

/// Problems with the options handed to the store
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Store options must be a JSON object")]
    NotAnObject,

    #[error("Missing required option `address`")]
    MissingAddress,

    #[error("Invalid option: {0}")]
    Invalid(String),
}

/// Store or listener used outside its valid state
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LifecycleError {
    #[error("Already subscribed to `{address}`")]
    AlreadySubscribed { address: String },

    #[error("Store has been disposed")]
    Disposed,
}

/// Subscription setup failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    #[error("Message bus closed")]
    Closed,

    #[error("No async runtime available to run the listener")]
    NoRuntime,
}

/// Inbound payload that could not be turned into a configuration.
///
/// Never returned from reads; the listener reports and drops the message.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Payload is not valid UTF-8 (valid up to byte {valid_up_to})")]
    InvalidUtf8 { valid_up_to: usize },

    #[error("Payload is not valid JSON: {0}")]
    Malformed(String),

    #[error("Payload JSON is a {found}, not an object")]
    NotAnObject { found: &'static str },
}

impl From<ValueError> for DecodeError {
    fn from(err: ValueError) -> Self {
        match err {
            ValueError::InvalidUtf8 { valid_up_to } => Self::InvalidUtf8 { valid_up_to },
            ValueError::Malformed(msg) => Self::Malformed(msg),
            ValueError::NotAnObject { found } => Self::NotAnObject { found },
        }
    }
}

impl From<shared_bus::BusError> for TransportError {
    fn from(err: shared_bus::BusError) -> Self {
        match err {
            shared_bus::BusError::Closed => Self::Closed,
        }
    }
}
