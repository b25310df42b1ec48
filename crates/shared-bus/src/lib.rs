//! # Shared Bus - In-Process Message Bus
//!
//! Address-routed message bus used to feed configuration stores.
//!
//! ## Delivery Modes
//!
//! - **Send (point-to-point):** delivered to exactly one current consumer of
//!   the address, rotating among consumers.
//! - **Publish (broadcast):** delivered to every consumer registered at
//!   dispatch time. Consumers registered later never see it.
//!
//! ```text
//! ┌──────────────┐                    ┌──────────────┐
//! │  Producer    │                    │  Consumer    │
//! │              │  send()/publish()  │  (address)   │
//! │              │ ──────┐            │              │
//! └──────────────┘       │            └──────────────┘
//!                        ▼                    ↑
//!                  ┌──────────────┐          │
//!                  │ Message Bus  │          │
//!                  │              │ ─────────┘
//!                  └──────────────┘  consumer()
//! ```
//!
//! Neither `send` nor `publish` waits for the consumer to process the
//! message. A producer that needs to observe the effect of a message must
//! poll for it.

// Nursery lints that are too strict
#![allow(clippy::missing_const_for_fn)]
// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod message;
pub mod publisher;
mod registry;
pub mod subscriber;

// Re-export main types
pub use message::{BusMessage, DeliveryMode, Payload};
pub use publisher::{InMemoryMessageBus, MessagePublisher};
pub use subscriber::{BusError, MessageStream, Subscription};
