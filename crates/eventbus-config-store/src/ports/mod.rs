//! Ports Layer
//!
//! - `inbound`: what callers use (store reads, store construction)
//! - `outbound`: what the store needs (a source of bus messages)

pub mod inbound;
pub mod outbound;

pub use inbound::{ConfigStore, ConfigStoreFactory};
pub use outbound::{InboundMessages, MessageSource};
