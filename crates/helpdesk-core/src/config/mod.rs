//! Application configuration schemas.
//!
//! All configuration structs are deserialized via the `config` crate from
//! TOML files and `HELPDESK__`-prefixed environment variables. Each
//! sub-module represents a logical configuration section.

pub mod app;
pub mod broadcast;
pub mod database;
pub mod logging;

use serde::{Deserialize, Serialize};

pub use self::app::{CorsConfig, ServerConfig};
pub use self::broadcast::BroadcastConfig;
pub use self::database::{DatabaseConfig, StoreBackend, StoreConfig};
pub use self::logging::LoggingConfig;

use crate::error::AppError;

/// Environment variable holding the comma-separated CORS origin list.
pub const CORS_ORIGINS_ENV: &str = "HELPDESK_CORS_ALLOWED_ORIGINS";

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database connection settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Presence store selection.
    #[serde(default)]
    pub store: StoreConfig,
    /// Managed broadcast service settings.
    #[serde(default)]
    pub broadcast: BroadcastConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration.
    ///
    /// Merges `config/default.toml`, the environment-specific overlay
    /// `config/{env}.toml` and environment variables prefixed with
    /// `HELPDESK__`. [`CORS_ORIGINS_ENV`] overrides the CORS origin list when
    /// set.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("HELPDESK")
                    .prefix_separator("__")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("server.cors.allowed_origins")
                    .with_list_parse_key("server.cors.allowed_methods")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let mut loaded: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        loaded.server.cors = match std::env::var(CORS_ORIGINS_ENV) {
            Ok(raw) => loaded.server.cors.with_origin_list(&raw),
            Err(_) => loaded.server.cors.normalized(),
        };

        tracing::debug!(
            env,
            cors_wildcard = loaded.server.cors.is_wildcard(),
            store = ?loaded.store.backend,
            "Configuration loaded"
        );

        Ok(loaded)
    }
}
