//! WebSocket connection to the managed broadcast service.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use futures::{SinkExt, StreamExt};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tracing::{debug, info, warn};

use helpdesk_core::config::BroadcastConfig;
use helpdesk_core::error::{AppError, ErrorKind};
use helpdesk_core::result::AppResult;

use super::events_api::EventsApi;
use super::protocol::{self, Frame};

/// Outbound control frames (pongs) buffered for the writer task.
const OUTBOUND_BUFFER_SIZE: usize = 64;

/// Build the WebSocket URL for the broadcast service.
pub fn endpoint_url(config: &BroadcastConfig) -> String {
    let scheme = if config.use_tls() { "wss" } else { "ws" };
    format!(
        "{scheme}://{host}:{port}/app/{key}?protocol={protocol}&client=helpdesk-presence&version={version}&flash=false",
        host = config.host.trim(),
        port = config.port_or_default(),
        key = config.key,
        protocol = protocol::PROTOCOL_VERSION,
        version = env!("CARGO_PKG_VERSION"),
    )
}

/// Handles to the managed broadcast service.
///
/// `events` publishes server-side through the HTTP events API. `socket` is
/// the protocol connection, kept for liveness and the assigned socket id.
#[derive(Debug, Clone, Default)]
pub struct RemoteBroadcast {
    /// Live protocol connection, when one could be opened.
    pub socket: Option<Arc<BroadcastClient>>,
    /// Signed HTTP publisher, when credentials are configured.
    pub events: Option<Arc<EventsApi>>,
}

impl RemoteBroadcast {
    /// Whether presence changes are relayed to the service.
    pub fn relay_enabled(&self) -> bool {
        self.events.is_some()
    }

    /// Whether the protocol connection is open.
    pub fn socket_connected(&self) -> bool {
        self.socket.as_ref().is_some_and(|client| client.is_connected())
    }
}

/// Connect at startup, logging instead of failing.
///
/// Missing credentials or an unreachable service leave the corresponding
/// handle empty; the service then runs without that part of the relay.
pub async fn bootstrap(config: &BroadcastConfig) -> RemoteBroadcast {
    if !config.enabled {
        info!("Broadcast client disabled");
        return RemoteBroadcast::default();
    }

    let events = match EventsApi::from_config(config) {
        Ok(Some(api)) => Some(Arc::new(api)),
        Ok(None) => {
            warn!("Broadcast app_id/secret not configured, presence changes stay local");
            None
        }
        Err(e) => {
            warn!(error = %e, "Broadcast events API unavailable, presence changes stay local");
            None
        }
    };

    let socket = match BroadcastClient::connect(config).await {
        Ok(client) => Some(Arc::new(client)),
        Err(e) => {
            warn!(
                host = %config.host,
                port = config.port_or_default(),
                error = %e,
                "Broadcast client bootstrap failed, continuing without realtime connection"
            );
            None
        }
    };

    RemoteBroadcast { socket, events }
}

/// A live connection to the broadcast service.
#[derive(Debug)]
pub struct BroadcastClient {
    connected: Arc<AtomicBool>,
    socket_id: watch::Receiver<Option<String>>,
    reader: JoinHandle<()>,
    writer: JoinHandle<()>,
}

impl BroadcastClient {
    /// Open the connection and start the reader/writer tasks.
    pub async fn connect(config: &BroadcastConfig) -> AppResult<Self> {
        let url = endpoint_url(config);
        info!(url = %url.split('?').next().unwrap_or(""), "Connecting to broadcast service");

        let (stream, _) = tokio::time::timeout(
            Duration::from_secs(config.connect_timeout_seconds),
            tokio_tungstenite::connect_async(url.as_str()),
        )
        .await
        .map_err(|_| {
            AppError::external_service(format!(
                "Broadcast connection timed out after {}s",
                config.connect_timeout_seconds
            ))
        })?
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::ExternalService,
                format!("Broadcast connection failed: {e}"),
                e,
            )
        })?;

        let (mut ws_write, mut ws_read) = stream.split();
        let (outbound, mut outbound_rx) = mpsc::channel::<WsMessage>(OUTBOUND_BUFFER_SIZE);
        let (socket_tx, socket_id) = watch::channel(None);
        let connected = Arc::new(AtomicBool::new(true));

        let writer_connected = Arc::clone(&connected);
        let writer = tokio::spawn(async move {
            while let Some(msg) = outbound_rx.recv().await {
                if let Err(e) = ws_write.send(msg).await {
                    warn!(error = %e, "Broadcast write failed");
                    break;
                }
            }
            writer_connected.store(false, Ordering::SeqCst);
        });

        let reader_connected = Arc::clone(&connected);
        let pong_tx = outbound;
        let reader = tokio::spawn(async move {
            while let Some(result) = ws_read.next().await {
                match result {
                    Ok(WsMessage::Text(text)) => {
                        handle_frame(text.as_str(), &pong_tx, &socket_tx).await;
                    }
                    Ok(WsMessage::Close(_)) => {
                        info!("Broadcast service closed the connection");
                        break;
                    }
                    Err(e) => {
                        warn!(error = %e, "Broadcast connection error");
                        break;
                    }
                    _ => {}
                }
            }
            reader_connected.store(false, Ordering::SeqCst);
        });

        Ok(Self {
            connected,
            socket_id,
            reader,
            writer,
        })
    }

    /// Whether the connection is still open.
    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    /// Socket id assigned by the service, once known.
    pub fn socket_id(&self) -> Option<String> {
        self.socket_id.borrow().clone()
    }
}

impl Drop for BroadcastClient {
    fn drop(&mut self) {
        self.reader.abort();
        self.writer.abort();
    }
}

async fn handle_frame(
    text: &str,
    outbound: &mpsc::Sender<WsMessage>,
    socket_tx: &watch::Sender<Option<String>>,
) {
    let frame: Frame = match serde_json::from_str(text) {
        Ok(frame) => frame,
        Err(_) => {
            debug!(text = %text, "Unrecognized broadcast frame");
            return;
        }
    };

    match frame.event.as_str() {
        protocol::CONNECTION_ESTABLISHED => {
            if let Some(id) = frame.socket_id() {
                info!(socket_id = %id, "Broadcast connection established");
                let _ = socket_tx.send(Some(id));
            }
        }
        protocol::PING => {
            if let Ok(json) = serde_json::to_string(&Frame::pong()) {
                let _ = outbound.send(WsMessage::Text(json.into())).await;
            }
        }
        protocol::ERROR => {
            warn!(payload = %frame.payload(), "Broadcast service reported an error");
        }
        other => debug!(event = other, "Ignoring broadcast frame"),
    }
}
