//! # helpdesk-realtime
//!
//! Presence engine for the helpdesk service. Provides:
//!
//! - The presence tracker, the single writer of per-user online state
//! - Login/logout listeners bridging auth events into the tracker
//! - A synchronous auth event dispatcher
//! - Typed presence channels with in-process pub/sub
//! - A client for the managed broadcast service

pub mod bridge;
pub mod channel;
pub mod client;
pub mod events;
pub mod message;
pub mod presence;

pub use bridge::{FanoutBroadcaster, MemoryPubSub, PresenceBroadcaster};
pub use channel::ChannelType;
pub use client::{BroadcastClient, EventsApi, RemoteBroadcast};
pub use events::{AuthEvent, AuthEventDispatcher, AuthEventListener};
pub use message::OutboundMessage;
pub use presence::PresenceTracker;
