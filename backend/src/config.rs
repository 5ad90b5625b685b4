//! Configuration management.

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration structure that matches the TOML file format.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    server: ServerConfig,
    #[serde(default)]
    device: DeviceConfig,
    #[serde(default)]
    logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ServerConfig {
    #[serde(default = "default_port")]
    port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct DeviceConfig {
    #[serde(default = "default_device_url")]
    url: String,
    #[serde(default)]
    mode: DeviceMode,
    #[serde(default = "default_timeout_secs")]
    timeout_secs: u64,
    #[serde(default)]
    limits: LimitsProfile,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            url: default_device_url(),
            mode: DeviceMode::default(),
            timeout_secs: default_timeout_secs(),
            limits: LimitsProfile::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct LoggingConfig {
    /// Path to log file (if set, logs will be written to file in addition to stdout)
    log_file: Option<PathBuf>,
    /// Log level (trace, debug, info, warn, error)
    /// If not set, uses RUST_LOG environment variable or defaults to "info"
    log_level: Option<String>,
}

fn default_port() -> u16 {
    tonebridge_types::DEFAULT_PORT
}

fn default_device_url() -> String {
    tonebridge_types::DEFAULT_DEVICE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    5
}

/// Deployment profile: whether updates are forwarded to the device
/// synchronously, or the device polls `GET /api/effects` itself.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum DeviceMode {
    #[default]
    Forwarding,
    Polling,
}

impl std::fmt::Display for DeviceMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeviceMode::Forwarding => write!(f, "forwarding"),
            DeviceMode::Polling => write!(f, "polling"),
        }
    }
}

/// Validation range profile, matching the device firmware build.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum LimitsProfile {
    /// Overdrive gain up to 30, delay up to 100 ms.
    #[default]
    Standard,
    /// Overdrive gain up to 100, delay up to 500 ms.
    Wide,
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Port to listen on
    pub port: u16,
    /// Device bridge base URL (forwarding mode)
    pub device_url: String,
    /// Deployment profile
    pub mode: DeviceMode,
    /// Outbound device call timeout in seconds
    pub timeout_secs: u64,
    /// Validation range profile
    pub limits: LimitsProfile,
    /// Path to log file (if set, logs will be written to file in addition to stdout)
    pub log_file: Option<PathBuf>,
    /// Log level (if set, overrides RUST_LOG environment variable)
    pub log_level: Option<String>,
}

impl Config {
    /// Load configuration with full priority chain: CLI args > env vars > config files > defaults.
    ///
    /// Config files are searched in this order:
    /// 1. `.tonebridge.toml` in current directory
    /// 2. `config.toml` in user config directory (~/.config/tonebridge/ on Linux)
    pub fn from_figment(
        port: Option<u16>,
        device_url: Option<String>,
        mode: Option<DeviceMode>,
        limits: Option<LimitsProfile>,
    ) -> anyhow::Result<Self> {
        // Find config file paths
        let local_config = std::env::current_dir()
            .ok()
            .map(|d| d.join(".tonebridge.toml"));
        let user_config = directories::ProjectDirs::from("", "", "tonebridge")
            .map(|dirs| dirs.config_dir().join("config.toml"));

        // Build figment with priority: defaults < user config < local config < env vars < CLI args
        let mut figment = Figment::new();

        // 1. Start with defaults
        figment = figment.merge(Serialized::defaults(ConfigFile {
            server: ServerConfig::default(),
            device: DeviceConfig::default(),
            logging: LoggingConfig::default(),
        }));

        // 2. Merge user config file if it exists
        if let Some(ref path) = user_config {
            if path.exists() {
                figment = figment.merge(Toml::file(path));
            }
        }

        // 3. Merge local config file if it exists
        if let Some(ref path) = local_config {
            if path.exists() {
                figment = figment.merge(Toml::file(path));
            }
        }

        // 4. Merge environment variables (TONEBRIDGE_* prefix)
        figment = figment.merge(
            Env::prefixed("TONEBRIDGE_")
                .map(|key| key.as_str().replace("__", ".").into())
                .split("_"),
        );

        // 5. Merge CLI arguments (highest priority)
        if let Some(p) = port {
            figment = figment.merge(Serialized::default("server.port", p));
        }
        if let Some(ref url) = device_url {
            figment = figment.merge(Serialized::default("device.url", url));
        }
        if let Some(m) = mode {
            figment = figment.merge(Serialized::default("device.mode", m));
        }
        if let Some(l) = limits {
            figment = figment.merge(Serialized::default("device.limits", l));
        }

        // Extract the configuration
        let config_file: ConfigFile = figment.extract()?;

        Ok(Self {
            port: config_file.server.port,
            device_url: config_file.device.url,
            mode: config_file.device.mode,
            timeout_secs: config_file.device.timeout_secs,
            limits: config_file.device.limits,
            log_file: config_file.logging.log_file,
            log_level: config_file.logging.log_level,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: tonebridge_types::DEFAULT_PORT,
            device_url: tonebridge_types::DEFAULT_DEVICE_URL.to_string(),
            mode: DeviceMode::Forwarding,
            timeout_secs: 5,
            limits: LimitsProfile::Standard,
            log_file: None,
            log_level: None,
        }
    }
}
