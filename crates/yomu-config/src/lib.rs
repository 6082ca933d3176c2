use std::path::Path;

use serde::{Deserialize, Serialize};

use self::network::NetworkConfig;
use self::reader::ReaderConfig;
use self::ui::UiConfig;

pub mod network;
pub mod reader;
pub mod ui;

#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub network: NetworkConfig,
    pub reader: ReaderConfig,
    pub ui: UiConfig,
}

impl Config {
    /// Defaults overridden by environment variables
    pub fn new() -> Self {
        Config {
            network: NetworkConfig::new(),
            reader: ReaderConfig::new(),
            ui: UiConfig::new(),
        }
    }

    /// Load a JSON config file. Missing sections and fields keep their defaults
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        tracing::info!("Loading config from {}", path.display());
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn from_json_str(json: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_stock_backend() {
        let config = Config::default();
        assert_eq!(config.network.analyze_url, "http://127.0.0.1:8080/analyze");
        assert_eq!(config.network.timeout(), None);
        assert_eq!(config.reader.page_size, 1000);
        assert_eq!(config.reader.prefetch_pages, 2);
        assert_eq!(config.reader.presets.len(), 3);
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let config = Config::from_json_str(
            r#"{ "reader": { "page_size": 500 }, "network": { "timeout_seconds": 5 } }"#,
        )
        .unwrap();

        assert_eq!(config.reader.page_size, 500);
        assert_eq!(config.reader.prefetch_pages, 2);
        assert_eq!(config.network.timeout_seconds, Some(5));
        assert_eq!(config.network.analyze_url, "http://127.0.0.1:8080/analyze");
        assert!(config.ui.show_token_ids);
    }

    #[test]
    fn config_file_is_read_from_disk() {
        let path = std::env::temp_dir().join(format!("yomu-config-{}.json", std::process::id()));
        std::fs::write(
            &path,
            r#"{ "network": { "analyze_url": "http://reader.local/analyze" }, "ui": { "show_token_ids": false } }"#,
        )
        .unwrap();

        let config = Config::from_file(&path);
        std::fs::remove_file(&path).ok();
        let config = config.unwrap();

        assert_eq!(config.network.analyze_url, "http://reader.local/analyze");
        assert!(!config.ui.show_token_ids);
        assert_eq!(config.reader.page_size, 1000);
        assert!(Config::from_file(Path::new("/nonexistent/yomu.json")).is_err());
    }

    #[test]
    fn presets_resolve_by_position_or_id() {
        let reader = ReaderConfig::default();
        assert_eq!(reader.find_preset("2").unwrap().id, "momotaro.txt");
        assert_eq!(reader.find_preset("Book3.txt").unwrap().label, "Book 3");
        assert!(reader.find_preset("0").is_none());
        assert!(reader.find_preset("4").is_none());
        assert!(reader.find_preset("missing.txt").is_none());
    }
}
