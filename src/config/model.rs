//! Configuration data model.
//!
//! All structs derive `Serialize`/`Deserialize` for TOML persistence.
//! Every field has a sensible default so the application works out of the box.

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where the marketplace backend lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL every endpoint path is joined to (e.g. `http://localhost:10050/`).
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

/// The two screens of the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    #[default]
    Marketplace,
    Developer,
}

/// UI appearance and behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_timestamp_format")]
    pub timestamp_format: String,
    #[serde(default)]
    pub start_page: Page,
}

impl UiConfig {
    /// Replace a `timestamp_format` chrono cannot render with the default.
    /// Returns whether the format was replaced.
    pub fn repair_timestamp_format(&mut self) -> bool {
        let broken = StrftimeItems::new(&self.timestamp_format).any(|item| matches!(item, Item::Error));
        if broken {
            self.timestamp_format = default_timestamp_format();
        }
        broken
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            timestamp_format: default_timestamp_format(),
            start_page: Page::default(),
        }
    }
}

/// Diagnostic log file settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_log_dir")]
    pub log_dir: String,
    /// Filter directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            log_dir: default_log_dir(),
            level: default_log_level(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:10050/".to_string()
}
fn default_true() -> bool {
    true
}
fn default_timestamp_format() -> String {
    "%H:%M:%S".to_string()
}
fn default_log_dir() -> String {
    "~/.local/share/pkgmart/logs".to_string()
}
fn default_log_level() -> String {
    "pkgmart=info".to_string()
}
