use serde::Deserialize;
use std::{fs, path::Path};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config file: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// HTTP port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Log level for tracing (e.g. "info", "debug").
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// URL of the key-value store holding all durable state.
    ///
    /// `redis://host:port` for a real store, `memory://` for an in-process
    /// store that does not survive a restart. Overridable at runtime with
    /// the `STAMPD_STORE_URL` environment variable.
    #[serde(default = "default_store_url")]
    pub store_url: String,

    #[serde(default = "default_version")]
    pub server_version: String,
}

fn default_port() -> u16 {
    80
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_store_url() -> String {
    "redis://127.0.0.1:6379".to_string()
}

fn default_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            log_level: default_log_level(),
            store_url: default_store_url(),
            server_version: default_version(),
        }
    }
}

impl AppConfig {
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let file = fs::read_to_string(path)?;
        Ok(serde_json::from_str::<AppConfig>(&file)?)
    }

    /// Environment beats file so containers can point at their own store.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("STAMPD_STORE_URL") {
            self.store_url = url;
        }
    }
}
