//! Bridges between auth events, the presence tracker and subscribers.

pub mod auth_listeners;
pub mod fanout;
pub mod memory_pubsub;

use async_trait::async_trait;

use helpdesk_core::result::AppResult;

use crate::channel::ChannelType;
use crate::message::OutboundMessage;

pub use auth_listeners::{LoginListener, LogoutListener, register_presence_listeners};
pub use fanout::FanoutBroadcaster;
pub use memory_pubsub::MemoryPubSub;

/// Publishes presence announcements to subscribers.
#[async_trait]
pub trait PresenceBroadcaster: Send + Sync + std::fmt::Debug + 'static {
    /// Publish a message on a channel.
    async fn publish(&self, channel: &ChannelType, message: &OutboundMessage) -> AppResult<()>;
}
