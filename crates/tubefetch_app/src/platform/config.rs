//! Optional RON config file, overridden by command-line flags.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tubefetch_engine::ClientSettings;
use tubefetch_logging::engine_info;

use super::cli::Args;

const DEFAULT_CONFIG: &str = "tubefetch.ron";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DownloadFormat {
    #[default]
    Video,
    Audio,
}

impl DownloadFormat {
    /// Value of the `format` form field.
    pub fn as_field(self) -> &'static str {
        match self {
            DownloadFormat::Video => "video",
            DownloadFormat::Audio => "audio",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: String,
    pub poll_interval_ms: u64,
    pub connect_timeout_secs: u64,
    pub logs_timeout_secs: u64,
    pub format: DownloadFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        let settings = ClientSettings::default();
        Self {
            server: settings.base_url,
            poll_interval_ms: settings.poll_interval.as_millis() as u64,
            connect_timeout_secs: settings.connect_timeout.as_secs(),
            logs_timeout_secs: settings.logs_timeout.as_secs(),
            format: DownloadFormat::default(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
}

impl AppConfig {
    /// Reads `path`, or `./tubefetch.ron` when no path is given and the file
    /// exists. Falls back to defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => {
                let fallback = PathBuf::from(DEFAULT_CONFIG);
                if !fallback.is_file() {
                    return Ok(Self::default());
                }
                fallback
            }
        };

        let content = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        let config = ron::from_str(&content).map_err(|err| ConfigError::Parse {
            path: path.clone(),
            message: err.to_string(),
        })?;
        engine_info!("Loaded config from {:?}", path);
        Ok(config)
    }

    pub fn apply_args(&mut self, args: &Args) {
        if let Some(server) = &args.server {
            self.server = server.clone();
        }
        if let Some(format) = args.format {
            self.format = format;
        }
        if let Some(interval) = args.poll_interval_ms {
            self.poll_interval_ms = interval;
        }
    }

    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            base_url: self.server.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            logs_timeout: Duration::from_secs(self.logs_timeout_secs),
            // A zero period would make tokio's interval panic.
            poll_interval: Duration::from_millis(self.poll_interval_ms.max(1)),
        }
    }
}
