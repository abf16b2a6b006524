//! WebSocket stream of presence changes.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{Query, State, WebSocketUpgrade};
use axum::response::Response;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use helpdesk_core::error::AppError;
use helpdesk_realtime::{ChannelType, MemoryPubSub, OutboundMessage};

use crate::error::ApiError;
use crate::state::AppState;

/// Query parameters for the presence stream.
#[derive(Debug, serde::Deserialize)]
pub struct WsQuery {
    /// Channel to follow, `presence:global` when omitted.
    pub channel: Option<String>,
}

/// GET /ws/presence?channel={channel}
pub async fn presence_stream(
    State(state): State<AppState>,
    ws: WebSocketUpgrade,
    Query(query): Query<WsQuery>,
) -> Result<Response, ApiError> {
    let channel = match query.channel.as_deref() {
        None => ChannelType::PresenceGlobal,
        Some(raw) => ChannelType::parse(raw)
            .ok_or_else(|| AppError::validation(format!("Unknown presence channel '{raw}'")))?,
    };

    // Subscribe before upgrading so no change between the two is missed.
    let rx = state.pubsub.subscribe(&channel).await;
    let pubsub = Arc::clone(&state.pubsub);
    Ok(ws.on_upgrade(move |socket| forward_presence(socket, pubsub, channel, rx)))
}

async fn forward_presence(
    mut socket: WebSocket,
    pubsub: Arc<MemoryPubSub>,
    channel: ChannelType,
    mut rx: broadcast::Receiver<OutboundMessage>,
) {
    info!(channel = %channel.to_channel_string(), "Presence subscriber connected");

    loop {
        tokio::select! {
            received = rx.recv() => match received {
                Ok(message) => {
                    let json = match serde_json::to_string(&message) {
                        Ok(json) => json,
                        Err(e) => {
                            warn!(error = %e, "Failed to serialize presence message");
                            continue;
                        }
                    };
                    if socket.send(Message::Text(json.into())).await.is_err() {
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Presence subscriber lagging, messages dropped");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            },
            inbound = socket.recv() => match inbound {
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    debug!(error = %e, "Presence subscriber socket error");
                    break;
                }
            },
        }
    }

    drop(rx);
    pubsub.prune().await;
    info!(channel = %channel.to_channel_string(), "Presence subscriber disconnected");
}
