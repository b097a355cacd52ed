use std::env;

use thiserror::Error;

pub const DEFAULT_UPSTREAM_URL: &str = "https://my-api.plantnet.org/v2/identify/all";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingVar(&'static str),
    #[error("invalid PORT value: {0}")]
    InvalidPort(String),
}

/// Immutable process configuration, resolved once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_key: String,
    pub upstream_url: String,
    pub port: u16,
    pub static_dir: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = env::var("PLANTNET_API_KEY")
            .ok()
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::MissingVar("PLANTNET_API_KEY"))?;

        let upstream_url =
            env::var("PLANTNET_API_URL").unwrap_or_else(|_| DEFAULT_UPSTREAM_URL.to_string());

        let port_str = env::var("PORT").unwrap_or_else(|_| "5000".to_string());
        let port = port_str
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort(port_str))?;

        let static_dir = env::var("STATIC_DIR").unwrap_or_else(|_| {
            if let Ok(manifest_dir) = env::var("CARGO_MANIFEST_DIR") {
                format!("{}/static", manifest_dir)
            } else {
                "static".to_string()
            }
        });

        Ok(Self {
            api_key,
            upstream_url,
            port,
            static_dir,
        })
    }
}
