//! Managed broadcast service client configuration.

use serde::{Deserialize, Serialize};

/// Connection settings for the managed realtime broadcast service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BroadcastConfig {
    /// Whether to connect to the broadcast service at startup.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Broadcast service host.
    #[serde(default = "default_host")]
    pub host: String,
    /// Broadcast service port. Derived from the scheme when unset.
    #[serde(default)]
    pub port: Option<u16>,
    /// Application key.
    #[serde(default = "default_key")]
    pub key: String,
    /// Application id used by the HTTP events API.
    #[serde(default)]
    pub app_id: Option<String>,
    /// Application secret signing HTTP events API requests.
    #[serde(default)]
    pub secret: Option<String>,
    /// `"https"` selects a TLS WebSocket, anything else a plain one.
    #[serde(default = "default_scheme")]
    pub scheme: String,
    /// Connect timeout in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u64,
    /// Timeout of one HTTP events API request in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
    /// Buffer size of the in-process presence channels.
    #[serde(default = "default_channel_buffer")]
    pub channel_buffer_size: usize,
}

impl Default for BroadcastConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            host: default_host(),
            port: None,
            key: default_key(),
            app_id: None,
            secret: None,
            scheme: default_scheme(),
            connect_timeout_seconds: default_connect_timeout(),
            request_timeout_seconds: default_request_timeout(),
            channel_buffer_size: default_channel_buffer(),
        }
    }
}

impl BroadcastConfig {
    /// Whether the connection uses TLS.
    pub fn use_tls(&self) -> bool {
        self.scheme.trim().eq_ignore_ascii_case("https")
    }

    /// The configured port, or the scheme's default.
    pub fn port_or_default(&self) -> u16 {
        match self.port {
            Some(port) => port,
            None if self.use_tls() => 443,
            None => 80,
        }
    }

    /// Base URL of the HTTP events API, on the same host and port.
    pub fn api_base_url(&self) -> String {
        let scheme = if self.use_tls() { "https" } else { "http" };
        format!("{scheme}://{}:{}", self.host.trim(), self.port_or_default())
    }

    /// App id and secret, when both are set and non-empty.
    pub fn api_credentials(&self) -> Option<(&str, &str)> {
        let app_id = self.app_id.as_deref().map(str::trim).filter(|v| !v.is_empty())?;
        let secret = self.secret.as_deref().filter(|v| !v.is_empty())?;
        Some((app_id, secret))
    }
}

fn default_true() -> bool {
    true
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_key() -> String {
    "helpdesk".to_string()
}

fn default_scheme() -> String {
    "http".to_string()
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_request_timeout() -> u64 {
    5
}

fn default_channel_buffer() -> usize {
    256
}
