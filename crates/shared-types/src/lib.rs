//! # Shared Types Crate
//!
//! Types shared by the message bus and the configuration store.
//!
//! ## Design Principles
//!
//! - **Single canonical value**: every wire shape a configuration can arrive
//!   in is resolved into one [`ConfigValue`] before anyone else sees it.
//! - **Validated addresses**: an [`Address`] can only be constructed from a
//!   non-empty destination name, so downstream code never re-checks it.

pub mod address;
pub mod config_value;
pub mod errors;

pub use address::Address;
pub use config_value::ConfigValue;
pub use errors::*;
