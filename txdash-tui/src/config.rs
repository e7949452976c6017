use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

const API_URL_ENV: &str = "TXDASH_API_URL";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TxdashConfig {
    /// Base URL of the transactions API, e.g. "http://localhost:8000"
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Opened with `i` from either screen
    #[serde(default = "default_insight_url")]
    pub insight_url: String,

    #[serde(default)]
    pub polling: PollingConfig,

    #[serde(default)]
    pub toast: ToastConfig,

    #[serde(default)]
    pub limits: LimitsConfig,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PollingConfig {
    #[serde(default = "default_status_interval_ms")]
    pub status_interval_ms: u64,
    #[serde(default = "default_stream_interval_ms")]
    pub stream_interval_ms: u64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ToastConfig {
    #[serde(default = "default_toast_visible_ms")]
    pub visible_ms: u64,
    #[serde(default = "default_toast_removed_ms")]
    pub removed_ms: u64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LimitsConfig {
    #[serde(default = "default_recent_transactions")]
    pub recent_transactions: u32,
    #[serde(default = "default_top_n")]
    pub top_categories: u32,
    #[serde(default = "default_top_n")]
    pub top_merchants: u32,
    #[serde(default = "default_top_n")]
    pub search_results: u32,
}

fn default_api_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_insight_url() -> String {
    "http://localhost:8001".to_string()
}

fn default_status_interval_ms() -> u64 {
    2000
}

fn default_stream_interval_ms() -> u64 {
    4000
}

fn default_toast_visible_ms() -> u64 {
    4000
}

fn default_toast_removed_ms() -> u64 {
    4500
}

fn default_recent_transactions() -> u32 {
    20
}

fn default_top_n() -> u32 {
    10
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            status_interval_ms: default_status_interval_ms(),
            stream_interval_ms: default_stream_interval_ms(),
        }
    }
}

impl PollingConfig {
    pub fn status_interval(&self) -> Duration {
        Duration::from_millis(self.status_interval_ms.max(1))
    }

    pub fn stream_interval(&self) -> Duration {
        Duration::from_millis(self.stream_interval_ms.max(1))
    }
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self {
            visible_ms: default_toast_visible_ms(),
            removed_ms: default_toast_removed_ms(),
        }
    }
}

impl ToastConfig {
    pub fn visible_for(&self) -> Duration {
        Duration::from_millis(self.visible_ms)
    }

    /// Never shorter than the visible period.
    pub fn removed_after(&self) -> Duration {
        Duration::from_millis(self.removed_ms.max(self.visible_ms))
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            recent_transactions: default_recent_transactions(),
            top_categories: default_top_n(),
            top_merchants: default_top_n(),
            search_results: default_top_n(),
        }
    }
}

impl Default for TxdashConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            insight_url: default_insight_url(),
            polling: PollingConfig::default(),
            toast: ToastConfig::default(),
            limits: LimitsConfig::default(),
        }
    }
}

impl TxdashConfig {
    pub fn config_path() -> Result<PathBuf> {
        Ok(dirs::config_dir()
            .context("Cannot determine config directory")?
            .join("txdash-tui")
            .join("config.toml"))
    }

    /// Load config from disk, then apply environment overrides.
    /// Returns the default config if the file doesn't exist.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        let mut config = if path.exists() {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config at {}", path.display()))?;
            Self::parse(&raw)
                .with_context(|| format!("Failed to parse config at {}", path.display()))?
        } else {
            Self::default()
        };

        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                config.api_url = url.trim().to_string();
            }
        }

        Ok(config)
    }

    pub fn parse(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    /// Write the default config if none exists yet. Returns the path.
    pub fn ensure_default_file() -> Result<PathBuf> {
        let path = Self::config_path()?;
        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let raw = toml::to_string_pretty(&Self::default())?;
            std::fs::write(&path, raw)?;
        }
        Ok(path)
    }
}
