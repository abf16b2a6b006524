//! In-memory pub/sub for single-node deployments.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tokio::sync::broadcast;
use tracing::debug;

use helpdesk_core::result::AppResult;

use super::PresenceBroadcaster;
use crate::channel::ChannelType;
use crate::message::OutboundMessage;

/// In-memory pub/sub implementation.
#[derive(Debug)]
pub struct MemoryPubSub {
    /// Channel → broadcast sender
    channels: RwLock<HashMap<ChannelType, broadcast::Sender<OutboundMessage>>>,
    /// Buffer size for channels
    buffer_size: usize,
}

impl MemoryPubSub {
    /// Create a new in-memory pub/sub
    pub fn new(buffer_size: usize) -> Self {
        Self {
            channels: RwLock::new(HashMap::new()),
            buffer_size: buffer_size.max(1),
        }
    }

    /// Subscribe to a channel, returns a receiver
    pub async fn subscribe(&self, channel: &ChannelType) -> broadcast::Receiver<OutboundMessage> {
        let mut channels = self.channels.write().await;
        channels
            .entry(channel.clone())
            .or_insert_with(|| broadcast::channel(self.buffer_size).0)
            .subscribe()
    }

    /// Number of live receivers on a channel
    pub async fn subscriber_count(&self, channel: &ChannelType) -> usize {
        self.channels
            .read()
            .await
            .get(channel)
            .map(|tx| tx.receiver_count())
            .unwrap_or(0)
    }

    /// Number of channels currently holding a sender
    pub async fn channel_count(&self) -> usize {
        self.channels.read().await.len()
    }

    /// Drop senders whose receivers have all gone away.
    pub async fn prune(&self) -> usize {
        let mut channels = self.channels.write().await;
        let before = channels.len();
        channels.retain(|_, tx| tx.receiver_count() > 0);
        let pruned = before - channels.len();
        if pruned > 0 {
            debug!(pruned, "Pruned idle presence channels");
        }
        pruned
    }
}

#[async_trait]
impl PresenceBroadcaster for MemoryPubSub {
    async fn publish(&self, channel: &ChannelType, message: &OutboundMessage) -> AppResult<()> {
        let idle = {
            let channels = self.channels.read().await;
            match channels.get(channel) {
                // No receivers is not an error; the message is dropped.
                Some(tx) => tx.send(message.clone()).is_err(),
                None => false,
            }
        };

        if idle {
            let mut channels = self.channels.write().await;
            if channels
                .get(channel)
                .is_some_and(|tx| tx.receiver_count() == 0)
            {
                channels.remove(channel);
            }
        }
        Ok(())
    }
}
