//! CLI configuration

use master_client::{AppEnv, ClientOptions, PageOrigin};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

const DEFAULT_CONFIG_FILE: &str = "master.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Load(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CliConfig {
    #[serde(default = "default_server")]
    pub server: ServerSettings,

    #[serde(default = "default_http")]
    pub http: HttpSettings,

    #[serde(default = "default_ui")]
    pub ui: UiSettings,
}

/// Where the node's API lives, described the way the web front end sees it
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_protocol")]
    pub protocol: String,

    #[serde(default = "default_hostname")]
    pub hostname: String,

    /// Port the front end is served on; empty for the scheme default
    #[serde(default)]
    pub port: Option<u16>,

    #[serde(default)]
    pub app_env: AppEnv,

    /// API port used in development mode
    #[serde(default = "default_dev_port")]
    pub dev_port: Option<u16>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HttpSettings {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UiSettings {
    #[serde(default = "default_notification_timeout_secs")]
    pub notification_timeout_secs: u64,
}

impl CliConfig {
    /// Load configuration from file and environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        // Override with environment variables, e.g. MASTER_SERVER__HOSTNAME
        settings = settings.add_source(
            config::Environment::with_prefix("MASTER")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| ConfigError::Load(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ConfigError::Load(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.hostname.trim().is_empty() {
            return Err(ConfigError::Invalid("server.hostname is empty".to_string()));
        }

        if self.server.app_env == AppEnv::Development && self.server.dev_port.is_none() {
            return Err(ConfigError::Invalid(
                "development mode requires server.dev_port".to_string(),
            ));
        }

        if self.http.timeout_secs == 0 || self.http.connect_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "HTTP timeouts must be at least one second".to_string(),
            ));
        }

        if self.ui.notification_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "ui.notification_timeout_secs must be positive".to_string(),
            ));
        }

        Ok(())
    }

    pub fn origin(&self) -> PageOrigin {
        PageOrigin {
            protocol: self.server.protocol.clone(),
            hostname: self.server.hostname.clone(),
            port: self.server.port,
            app_env: self.server.app_env,
            dev_port: self.server.dev_port,
        }
    }

    pub fn client_options(&self) -> ClientOptions {
        ClientOptions {
            timeout: Duration::from_secs(self.http.timeout_secs),
            connect_timeout: Duration::from_secs(self.http.connect_timeout_secs),
        }
    }

    pub fn notification_timeout(&self) -> Duration {
        Duration::from_secs(self.ui.notification_timeout_secs)
    }
}

// Default values
fn default_server() -> ServerSettings {
    ServerSettings {
        protocol: default_protocol(),
        hostname: default_hostname(),
        port: None,
        app_env: AppEnv::default(),
        dev_port: default_dev_port(),
    }
}

fn default_protocol() -> String {
    "http".to_string()
}

fn default_hostname() -> String {
    "localhost".to_string()
}

fn default_dev_port() -> Option<u16> {
    Some(3000)
}

fn default_http() -> HttpSettings {
    HttpSettings {
        timeout_secs: default_timeout_secs(),
        connect_timeout_secs: default_connect_timeout_secs(),
    }
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_ui() -> UiSettings {
    UiSettings {
        notification_timeout_secs: default_notification_timeout_secs(),
    }
}

fn default_notification_timeout_secs() -> u64 {
    5
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            http: default_http(),
            ui: default_ui(),
        }
    }
}
