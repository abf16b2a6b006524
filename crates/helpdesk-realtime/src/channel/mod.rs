//! Presence channels.

pub mod types;

pub use types::ChannelType;
