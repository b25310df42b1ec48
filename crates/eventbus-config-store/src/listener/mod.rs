//! Listener Layer
//!
//! Bridges the message bus to the configuration cache.
//!
//! - `BusListener`: owns the subscription and the dispatch task
//! - `MessageHandler`: decodes one message and applies it

pub mod bus_listener;
pub mod handler;

pub use bus_listener::{BusListener, ListenerStatus};
pub use handler::MessageHandler;
