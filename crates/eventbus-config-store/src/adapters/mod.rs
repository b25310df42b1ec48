//! Adapters Layer
//!
//! - `bus_adapter`: [`crate::ports::MessageSource`] for the in-memory bus

pub mod bus_adapter;
