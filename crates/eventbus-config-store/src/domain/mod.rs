//! Domain layer: options, payload decoding and the cached configuration slot.
//!
//! Pure logic with no bus or runtime access.

pub mod cache;
pub mod decode;
pub mod options;

pub use cache::ConfigCache;
pub use decode::decode_payload;
pub use options::{EventBusStoreOptions, ADDRESS_KEY};
