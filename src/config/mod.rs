pub mod model;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub use model::{AppConfig, LoggingConfig, Page};

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("pkgmart")
        .join("config.toml")
}

/// Load the config from `path`, or from the default location when `None`.
///
/// A missing file is not an error: every field has a default.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config from {}", path.display()))?;
    let mut config: AppConfig = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file {}", path.display()))?;
    // An unknown strftime specifier would panic on the first clock update
    config.ui.repair_timestamp_format();
    Ok(config)
}

pub fn save_config(config: &AppConfig, path: Option<&Path>) -> Result<PathBuf> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory {}", parent.display()))?;
    }
    let contents = toml::to_string_pretty(config).with_context(|| "Failed to serialize config")?;
    std::fs::write(&path, contents)
        .with_context(|| format!("Failed to write config to {}", path.display()))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let path = std::env::temp_dir().join("pkgmart-no-such-dir/config.toml");
        let cfg = load_config(Some(&path)).unwrap();
        assert_eq!(cfg.api.base_url, "http://localhost:10050/");
        assert_eq!(cfg.ui.start_page, Page::Marketplace);
    }

    #[test]
    fn save_then_load_keeps_overrides() {
        let dir = std::env::temp_dir().join(format!("pkgmart-cfg-{}", std::process::id()));
        let path = dir.join("config.toml");
        let mut cfg = AppConfig::default();
        cfg.api.base_url = "http://node-b:10051/".into();
        cfg.ui.start_page = Page::Developer;

        let written = save_config(&cfg, Some(&path)).unwrap();
        assert_eq!(written, path);

        let loaded = load_config(Some(&path)).unwrap();
        assert_eq!(loaded.api.base_url, "http://node-b:10051/");
        assert_eq!(loaded.ui.start_page, Page::Developer);

        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn invalid_timestamp_format_is_replaced_on_load() {
        let dir = std::env::temp_dir().join(format!("pkgmart-ts-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, "[ui]\ntimestamp_format = \"%H:%Q\"\n").unwrap();

        let cfg = load_config(Some(&path)).unwrap();
        assert_eq!(cfg.ui.timestamp_format, "%H:%M:%S");
        let _ = chrono::Local::now().format(&cfg.ui.timestamp_format).to_string();

        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn malformed_file_reports_path() {
        let dir = std::env::temp_dir().join(format!("pkgmart-bad-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, "[api\nbase_url = 3").unwrap();

        let err = load_config(Some(&path)).unwrap_err();
        assert!(format!("{err}").contains("Failed to parse config file"));

        let _ = std::fs::remove_dir_all(dir);
    }
}
