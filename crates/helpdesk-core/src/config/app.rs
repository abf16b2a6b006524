//! Server and CORS configuration.

use serde::{Deserialize, Serialize};

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address.
    #[serde(default = "default_host")]
    pub host: String,
    /// Bind port.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Request timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
    /// CORS configuration.
    #[serde(default)]
    pub cors: CorsConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout_seconds: default_request_timeout(),
            cors: CorsConfig::default(),
        }
    }
}

/// CORS (Cross-Origin Resource Sharing) configuration.
///
/// An empty origin list, or one containing `"*"`, means any origin is
/// allowed. Credentials are only ever allowed for an explicit origin list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Allowed origins.
    #[serde(default)]
    pub allowed_origins: Vec<String>,
    /// Allowed HTTP methods.
    #[serde(default = "default_allowed_methods")]
    pub allowed_methods: Vec<String>,
    /// Max age for preflight cache in seconds.
    #[serde(default = "default_max_age")]
    pub max_age_seconds: u64,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: Vec::new(),
            allowed_methods: default_allowed_methods(),
            max_age_seconds: default_max_age(),
        }
    }
}

impl CorsConfig {
    /// Parses a comma-separated origin list, trimming entries and dropping
    /// empty ones.
    pub fn parse_origins(raw: &str) -> Vec<String> {
        raw.split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Replaces the allowed origins with a comma-separated list.
    pub fn with_origin_list(mut self, raw: &str) -> Self {
        self.allowed_origins = Self::parse_origins(raw);
        self
    }

    /// Trims the configured origins and drops empty entries.
    pub fn normalized(self) -> Self {
        let raw = self.allowed_origins.join(",");
        self.with_origin_list(&raw)
    }

    /// Whether any origin is accepted.
    pub fn is_wildcard(&self) -> bool {
        self.allowed_origins.is_empty() || self.allowed_origins.iter().any(|o| o == "*")
    }

    /// Whether `Access-Control-Allow-Credentials` should be sent.
    pub fn supports_credentials(&self) -> bool {
        !self.is_wildcard()
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_request_timeout() -> u64 {
    30
}

fn default_allowed_methods() -> Vec<String> {
    ["GET", "POST", "PUT", "DELETE", "PATCH", "OPTIONS"]
        .iter()
        .map(|m| m.to_string())
        .collect()
}

fn default_max_age() -> u64 {
    3600
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_origins_trims_and_drops_empty() {
        let origins = CorsConfig::parse_origins(" https://a.test , ,https://b.test ");
        assert_eq!(origins, vec!["https://a.test", "https://b.test"]);
    }

    #[test]
    fn test_empty_origin_list_is_wildcard() {
        let cors = CorsConfig::default().with_origin_list("");
        assert!(cors.is_wildcard());
        assert!(!cors.supports_credentials());

        let cors = CorsConfig::default().with_origin_list(" , ");
        assert!(cors.is_wildcard());
    }

    #[test]
    fn test_explicit_origins_enable_credentials() {
        let cors = CorsConfig::default().with_origin_list("https://desk.example.com");
        assert!(!cors.is_wildcard());
        assert!(cors.supports_credentials());
    }

    #[test]
    fn test_star_entry_is_wildcard() {
        let cors = CorsConfig::default().with_origin_list("https://a.test,*");
        assert!(cors.is_wildcard());
        assert!(!cors.supports_credentials());
    }
}
