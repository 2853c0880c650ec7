//! Shell configuration read from `./nullstream.ron`.
//!
//! Every field has a default, so a partial file (or none at all) is fine.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use nullstream_core::DEFAULT_PLAY_DELAY;
use nullstream_engine::{OEmbedSettings, DEFAULT_OEMBED_ENDPOINT};
use nullstream_logging::LogDestination;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub(crate) const CONFIG_FILENAME: &str = "nullstream.ron";

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("failed to parse config: {0}")]
    Parse(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct AppConfig {
    /// Where the playlist store lives. Defaults to the working directory.
    pub data_dir: Option<PathBuf>,
    pub play_delay_ms: u64,
    pub oembed_endpoint: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub window_width: u32,
    pub window_height: u32,
    /// Loopback port for the player page; 0 picks a free one.
    pub player_port: u16,
    /// `terminal`, `file` or `both`.
    pub log_destination: String,
    pub log_file: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        let fetch = OEmbedSettings::default();
        Self {
            data_dir: None,
            play_delay_ms: DEFAULT_PLAY_DELAY.as_millis() as u64,
            oembed_endpoint: DEFAULT_OEMBED_ENDPOINT.to_string(),
            connect_timeout_secs: fetch.connect_timeout.as_secs(),
            request_timeout_secs: fetch.request_timeout.as_secs(),
            window_width: 960,
            window_height: 600,
            player_port: 0,
            log_destination: "terminal".to_string(),
            log_file: PathBuf::from(nullstream_logging::DEFAULT_LOG_FILE),
        }
    }
}

impl AppConfig {
    /// `Ok(None)` when the file does not exist.
    pub fn load(path: &Path) -> Result<Option<Self>, ConfigError> {
        match fs::read_to_string(path) {
            Ok(text) => Self::from_ron_str(&text).map(Some),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    pub fn from_ron_str(text: &str) -> Result<Self, ConfigError> {
        ron::from_str(text).map_err(|err| ConfigError::Parse(err.to_string()))
    }

    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(|| {
            std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
        })
    }

    pub fn play_delay(&self) -> Duration {
        Duration::from_millis(self.play_delay_ms)
    }

    pub fn oembed_settings(&self) -> OEmbedSettings {
        OEmbedSettings {
            endpoint: self.oembed_endpoint.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            ..OEmbedSettings::default()
        }
    }

    /// Unknown names fall back to the terminal.
    pub fn log_destination(&self) -> LogDestination {
        self.log_destination.parse().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_file_means_defaults() {
        let temp = tempfile::TempDir::new().unwrap();
        let loaded = AppConfig::load(&temp.path().join(CONFIG_FILENAME)).unwrap();
        assert_eq!(loaded, None);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config = AppConfig::from_ron_str("(play_delay_ms: 800, log_destination: \"both\")")
            .unwrap();

        assert_eq!(config.play_delay(), Duration::from_millis(800));
        assert_eq!(config.log_destination(), LogDestination::Both);
        assert_eq!(config.oembed_endpoint, DEFAULT_OEMBED_ENDPOINT);
        assert_eq!(config.window_width, 960);
        assert_eq!(config.player_port, 0);
    }

    #[test]
    fn default_delay_matches_bridge_default() {
        assert_eq!(AppConfig::default().play_delay(), DEFAULT_PLAY_DELAY);
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILENAME);
        fs::write(&path, "(play_delay_ms: \"soon\")").unwrap();

        assert!(matches!(
            AppConfig::load(&path),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn configured_values_flow_into_settings() {
        let config = AppConfig::from_ron_str(
            r#"(
                data_dir: Some("/tmp/nullstream"),
                oembed_endpoint: "http://127.0.0.1:9000/oembed",
                request_timeout_secs: 3,
                log_destination: "syslog",
            )"#,
        )
        .unwrap();

        assert_eq!(config.data_dir(), PathBuf::from("/tmp/nullstream"));
        let settings = config.oembed_settings();
        assert_eq!(settings.endpoint, "http://127.0.0.1:9000/oembed");
        assert_eq!(settings.request_timeout, Duration::from_secs(3));
        assert_eq!(settings.max_bytes, OEmbedSettings::default().max_bytes);
        assert_eq!(config.log_destination(), LogDestination::Terminal);
    }
}
