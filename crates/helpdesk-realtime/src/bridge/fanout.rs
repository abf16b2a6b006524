//! Publishes locally and relays to the managed broadcast service.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use helpdesk_core::result::AppResult;

use super::PresenceBroadcaster;
use super::memory_pubsub::MemoryPubSub;
use crate::channel::ChannelType;
use crate::client::RemoteBroadcast;
use crate::message::OutboundMessage;

/// Fan-out broadcaster: in-process subscribers first, then the service's
/// HTTP events API when credentials are configured.
#[derive(Debug)]
pub struct FanoutBroadcaster {
    local: Arc<MemoryPubSub>,
    remote: RemoteBroadcast,
}

impl FanoutBroadcaster {
    /// Create a fan-out over the local pub/sub and the remote handles.
    pub fn new(local: Arc<MemoryPubSub>, remote: RemoteBroadcast) -> Self {
        Self { local, remote }
    }

    /// Whether the protocol connection to the service is open.
    pub fn remote_connected(&self) -> bool {
        self.remote.socket_connected()
    }

    /// Whether changes are relayed to the service.
    pub fn relay_enabled(&self) -> bool {
        self.remote.relay_enabled()
    }
}

#[async_trait]
impl PresenceBroadcaster for FanoutBroadcaster {
    async fn publish(&self, channel: &ChannelType, message: &OutboundMessage) -> AppResult<()> {
        self.local.publish(channel, message).await?;

        if let Some(events) = &self.remote.events {
            let name = channel.to_broadcast_name();
            let payload = serde_json::to_value(message)?;
            if let Err(e) = events
                .trigger(&[name.as_str()], message.event_name(), &payload)
                .await
            {
                warn!(channel = %name, error = %e, "Failed to relay presence change");
            }
        }

        Ok(())
    }
}
