//! Wire frames of the broadcast service (Pusher protocol 7).

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Protocol revision announced in the connection URL.
pub const PROTOCOL_VERSION: u8 = 7;

/// Sent by the server once the socket is ready.
pub const CONNECTION_ESTABLISHED: &str = "pusher:connection_established";
/// Server keep-alive ping.
pub const PING: &str = "pusher:ping";
/// Reply to [`PING`].
pub const PONG: &str = "pusher:pong";
/// Server-side error report.
pub const ERROR: &str = "pusher:error";

/// One JSON frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Event name.
    pub event: String,
    /// Target channel, absent for connection-level events.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    /// Payload. Servers usually send a JSON-encoded string.
    #[serde(default)]
    pub data: Value,
}

impl Frame {
    /// A pong reply.
    pub fn pong() -> Self {
        Self {
            event: PONG.to_string(),
            channel: None,
            data: Value::Object(Default::default()),
        }
    }

    /// The payload as a JSON value, decoding string-encoded payloads.
    pub fn payload(&self) -> Value {
        match &self.data {
            Value::String(raw) => serde_json::from_str(raw).unwrap_or(Value::Null),
            other => other.clone(),
        }
    }

    /// Socket id carried by a connection-established frame.
    pub fn socket_id(&self) -> Option<String> {
        if self.event != CONNECTION_ESTABLISHED {
            return None;
        }
        self.payload()
            .get("socket_id")
            .and_then(Value::as_str)
            .map(str::to_string)
    }
}
