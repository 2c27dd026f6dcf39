//! Service configuration loading and management.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Full configuration for the WebID identity provider.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct IdpConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Authority identity and signing key.
    #[serde(default)]
    pub authority: AuthorityConfig,

    /// Delegated-fetch (secretary) settings.
    #[serde(default)]
    pub secretary: SecretaryConfig,

    /// Identity document fetch settings.
    #[serde(default)]
    pub fetch: FetchSettings,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP listen address.
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
    /// HTTP port.
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AuthorityConfig {
    /// Public hostname of this authority, carried in the `referer=`
    /// redirect parameter.
    #[serde(default)]
    pub host: String,
    /// Path to the PEM private key used to sign redirects.
    #[serde(default)]
    pub signing_key_path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SecretaryConfig {
    /// WebID of the secretary agent, for the record.
    #[serde(default)]
    pub webid: Option<String>,
    /// PEM bundle (certificate + key) presented when fetching
    /// third-party profiles.
    #[serde(default)]
    pub identity_pem: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchSettings {
    /// Per-fetch timeout in seconds.
    #[serde(default = "default_fetch_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (text, json).
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_listen_addr() -> String {
    "0.0.0.0".into()
}
fn default_port() -> u16 {
    8443
}
fn default_fetch_timeout_secs() -> u64 {
    5
}
fn default_log_level() -> String {
    "info".into()
}
fn default_log_format() -> String {
    "text".into()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            port: default_port(),
        }
    }
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            timeout_secs: default_fetch_timeout_secs(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl IdpConfig {
    /// Load config from a TOML file, falling back to defaults for
    /// missing fields.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            let config: IdpConfig = toml::from_str(&contents)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save the current config to a TOML file.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let contents = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, contents)?;
        Ok(())
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch.timeout_secs)
    }
}
