//! Diagnostic logging to disk.
//!
//! The terminal is owned by the UI, so `tracing` output goes to a file named
//! `pkgmart.log` in the configured log directory (default:
//! `~/.local/share/pkgmart/logs/`). `RUST_LOG` overrides the configured level.

use crate::config::LoggingConfig;
use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub const LOG_FILE: &str = "pkgmart.log";

/// Expand a leading `~` to the home directory.
pub fn resolve_log_dir(log_dir: &str) -> PathBuf {
    if let Some(rest) = log_dir.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(log_dir)
}

fn env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level))
}

/// Install the global subscriber. Returns the log file path, or `None` when
/// logging is disabled.
pub fn init(config: &LoggingConfig) -> Result<Option<PathBuf>> {
    if !config.enabled {
        return Ok(None);
    }

    let dir = resolve_log_dir(&config.log_dir);
    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
    let path = dir.join(LOG_FILE);
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    let file_layer = fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_target(false)
        .with_line_number(true)
        .with_filter(env_filter(config));

    tracing_subscriber::registry()
        .with(file_layer)
        .try_init()
        .with_context(|| "Failed to install tracing subscriber")?;

    Ok(Some(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tilde_is_expanded() {
        let resolved = resolve_log_dir("~/.local/share/pkgmart/logs");
        if let Some(home) = dirs::home_dir() {
            assert_eq!(resolved, home.join(".local/share/pkgmart/logs"));
        }
    }

    #[test]
    fn absolute_dir_is_untouched() {
        assert_eq!(resolve_log_dir("/var/log/pkgmart"), PathBuf::from("/var/log/pkgmart"));
    }

    #[test]
    fn disabled_logging_installs_nothing() {
        let cfg = LoggingConfig {
            enabled: false,
            ..LoggingConfig::default()
        };
        assert!(init(&cfg).unwrap().is_none());
    }
}
