//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use crate::salon::workflow::DEFAULT_SERVICE_MINUTES;
use crate::session::SessionSettings;
use crate::timers::TimerSettings;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub queue: QueueConfig,

    #[serde(default)]
    pub timers: TimerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// API server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Allowed CORS origins; empty allows any
    #[serde(default)]
    pub cors_origins: Vec<String>,

    /// Maximum request body size in bytes
    #[serde(default = "default_max_body_size")]
    pub max_body_size: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8086
}

fn default_max_body_size() -> usize {
    64 * 1024
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
            max_body_size: default_max_body_size(),
        }
    }
}

impl ApiConfig {
    /// Create config with custom host and port
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Salon queue and session behaviour
#[derive(Debug, Clone, Deserialize)]
pub struct QueueConfig {
    /// Minutes assumed per person ahead when accepting a request
    #[serde(default = "default_service_minutes")]
    pub service_minutes: u32,

    /// How long a toast stays up (ms)
    #[serde(default = "default_toast_ms")]
    pub toast_ms: u64,
}

fn default_service_minutes() -> u32 {
    DEFAULT_SERVICE_MINUTES
}

fn default_toast_ms() -> u64 {
    3000
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            service_minutes: default_service_minutes(),
            toast_ms: default_toast_ms(),
        }
    }
}

/// Display timer periods
#[derive(Debug, Clone, Deserialize)]
pub struct TimerConfig {
    /// One minute off the ticket countdown per tick (ms)
    #[serde(default = "default_ticket_tick")]
    pub ticket_tick_ms: u64,

    /// Operator clock redraw period (ms)
    #[serde(default = "default_clock_tick")]
    pub clock_tick_ms: u64,
}

fn default_ticket_tick() -> u64 {
    2000
}

fn default_clock_tick() -> u64 {
    60_000
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            ticket_tick_ms: default_ticket_tick(),
            clock_tick_ms: default_clock_tick(),
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable, for development
    #[default]
    Pretty,
    /// One JSON object per line, for production
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!("Invalid log format: {}. Use pretty or json", s)),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("trimgo").join("config.toml")),
            Some(PathBuf::from("/etc/trimgo/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply `TRIMGO_*` overrides from any key lookup
    ///
    /// Values that fail to parse are ignored with a warning.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(host) = lookup("TRIMGO_API_HOST") {
            self.api.host = host;
        }
        override_parsed(&lookup, "TRIMGO_API_PORT", &mut self.api.port);

        override_parsed(&lookup, "TRIMGO_SERVICE_MINUTES", &mut self.queue.service_minutes);
        override_parsed(&lookup, "TRIMGO_TICKET_TICK_MS", &mut self.timers.ticket_tick_ms);
        override_parsed(&lookup, "TRIMGO_CLOCK_TICK_MS", &mut self.timers.clock_tick_ms);

        if let Some(level) = lookup("TRIMGO_LOG_LEVEL") {
            self.logging.level = level;
        }
        override_parsed(&lookup, "TRIMGO_LOG_FORMAT", &mut self.logging.format);
    }

    /// Session tunables from this config
    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            service_minutes: self.queue.service_minutes,
            toast_duration: Duration::from_millis(self.queue.toast_ms),
        }
    }

    /// Timer periods from this config
    pub fn timer_settings(&self) -> TimerSettings {
        TimerSettings {
            ticket_tick: Duration::from_millis(self.timers.ticket_tick_ms),
            clock_tick: Duration::from_millis(self.timers.clock_tick_ms),
        }
    }
}

fn override_parsed<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, target: &mut T) {
    if let Some(raw) = lookup(key) {
        match raw.parse() {
            Ok(value) => *target = value,
            Err(_) => tracing::warn!(key, value = %raw, "Ignoring invalid environment override"),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# TrimGo Configuration
#
# Environment variables override these settings:
# - TRIMGO_API_HOST
# - TRIMGO_API_PORT
# - TRIMGO_SERVICE_MINUTES
# - TRIMGO_TICKET_TICK_MS
# - TRIMGO_CLOCK_TICK_MS
# - TRIMGO_LOG_LEVEL
# - TRIMGO_LOG_FORMAT

[api]
# API server host
host = "0.0.0.0"

# API server port
port = 8086

# Allowed CORS origins (empty allows any)
cors_origins = []

# Maximum request body size (bytes)
max_body_size = 65536

[queue]
# Minutes assumed per person ahead when a request is accepted
service_minutes = 15

# How long a toast stays up (ms)
toast_ms = 3000

[timers]
# One minute comes off the live ticket countdown per tick (ms)
ticket_tick_ms = 2000

# Operator clock redraw period (ms)
clock_tick_ms = 60000

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api.port, 8086);
        assert_eq!(config.api.addr(), "0.0.0.0:8086");
        assert_eq!(config.queue.service_minutes, 15);
        assert_eq!(config.queue.toast_ms, 3000);
        assert_eq!(config.timers.ticket_tick_ms, 2000);
        assert_eq!(config.timers.clock_tick_ms, 60_000);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn test_generated_config_matches_defaults() {
        let config: Config = toml::from_str(&generate_default_config()).unwrap();
        let defaults = Config::default();
        assert_eq!(config.api.port, defaults.api.port);
        assert_eq!(config.api.max_body_size, defaults.api.max_body_size);
        assert_eq!(config.queue.service_minutes, defaults.queue.service_minutes);
        assert_eq!(config.timers.ticket_tick_ms, defaults.timers.ticket_tick_ms);
        assert_eq!(config.logging.format, defaults.logging.format);
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[queue]\nservice_minutes = 20\n\n[logging]\nformat = \"json\""
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.queue.service_minutes, 20);
        assert_eq!(config.queue.toast_ms, 3000);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.api.port, 8086);
    }

    #[test]
    fn test_load_errors() {
        let missing = Config::load(Path::new("/nonexistent/trimgo.toml"));
        assert!(matches!(missing, Err(ConfigError::Io { .. })));

        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[api]\nport = \"eighty\"").unwrap();
        let bad = Config::load(file.path());
        assert!(matches!(bad, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            ("TRIMGO_API_HOST", "127.0.0.1"),
            ("TRIMGO_API_PORT", "9000"),
            ("TRIMGO_SERVICE_MINUTES", "10"),
            ("TRIMGO_TICKET_TICK_MS", "500"),
            ("TRIMGO_LOG_FORMAT", "json"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.api.addr(), "127.0.0.1:9000");
        assert_eq!(config.queue.service_minutes, 10);
        assert_eq!(config.timers.ticket_tick_ms, 500);
        assert_eq!(config.timers.clock_tick_ms, 60_000);
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_invalid_override_ignored() {
        let mut config = Config::default();
        config.apply_overrides(|key| (key == "TRIMGO_API_PORT").then(|| "not-a-port".to_string()));
        assert_eq!(config.api.port, 8086);
    }

    #[test]
    fn test_settings_conversion() {
        let config = Config::default();
        assert_eq!(config.session_settings().toast_duration, Duration::from_secs(3));
        assert_eq!(config.timer_settings(), TimerSettings::default());
    }
}
