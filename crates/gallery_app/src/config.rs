//! Application settings, read from a RON file next to the binary's working
//! directory.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use gallery_engine::FetchSettings;
use gallery_logging::LogDestination;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "./gallery.ron";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LogTarget {
    #[default]
    File,
    Terminal,
    Both,
}

impl From<LogTarget> for LogDestination {
    fn from(target: LogTarget) -> Self {
        match target {
            LogTarget::File => LogDestination::File,
            LogTarget::Terminal => LogDestination::Terminal,
            LogTarget::Both => LogDestination::Both,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryConfig {
    pub api_base_url: String,
    pub api_key: Option<String>,
    pub page_size: u32,
    pub request_timeout_secs: u64,
    pub data_dir: PathBuf,
    pub log_target: LogTarget,
    pub log_file: PathBuf,
    pub viewport_height: u32,
    pub tile_height: u32,
    pub columns: u32,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        let fetch = FetchSettings::default();
        Self {
            api_base_url: fetch.base_url,
            api_key: None,
            page_size: fetch.page_size,
            request_timeout_secs: fetch.request_timeout.as_secs(),
            data_dir: PathBuf::from("./gallery_data"),
            log_target: LogTarget::File,
            log_file: PathBuf::from(gallery_logging::DEFAULT_LOG_FILE),
            viewport_height: 720,
            tile_height: 240,
            columns: 3,
        }
    }
}

impl GalleryConfig {
    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            base_url: self.api_base_url.clone(),
            page_size: self.page_size.max(1),
            api_key: self.api_key.clone(),
            request_timeout: Duration::from_secs(self.request_timeout_secs.max(1)),
            ..FetchSettings::default()
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {0:?}: {1}")]
    Read(PathBuf, #[source] io::Error),
    #[error("failed to parse {0:?}: {1}")]
    Parse(PathBuf, #[source] ron::error::SpannedError),
}

/// Loads the config file. A missing file yields the defaults.
pub fn load(path: &Path) -> Result<GalleryConfig, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Ok(GalleryConfig::default());
        }
        Err(err) => return Err(ConfigError::Read(path.to_path_buf(), err)),
    };
    ron::from_str(&content).map_err(|err| ConfigError::Parse(path.to_path_buf(), err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        let config = load(&temp.path().join("gallery.ron")).unwrap();
        assert_eq!(config, GalleryConfig::default());
    }

    #[test]
    fn partial_file_overrides_only_listed_fields() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("gallery.ron");
        fs::write(
            &path,
            r#"(api_key: Some("k"), page_size: 4, log_target: Both, columns: 2)"#,
        )
        .unwrap();

        let config = load(&path).unwrap();
        assert_eq!(config.api_key.as_deref(), Some("k"));
        assert_eq!(config.page_size, 4);
        assert_eq!(config.log_target, LogTarget::Both);
        assert_eq!(config.columns, 2);
        assert_eq!(config.tile_height, GalleryConfig::default().tile_height);

        let fetch = config.fetch_settings();
        assert_eq!(fetch.page_size, 4);
        assert_eq!(fetch.api_key.as_deref(), Some("k"));
    }

    #[test]
    fn broken_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("gallery.ron");
        fs::write(&path, "(page_size: \"many\"").unwrap();

        assert!(matches!(load(&path), Err(ConfigError::Parse(..))));
    }
}
