//! Messages pushed to presence subscribers.

pub mod types;

pub use types::OutboundMessage;
