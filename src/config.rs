use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::errors::{constants::*, Result};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    #[serde(default = "default_credential_file")]
    pub credential_file: PathBuf,
    #[serde(default = "default_cache_dir")]
    pub cache_dir: PathBuf,
    pub temp_dir: Option<PathBuf>,
    pub otel_http_url: Option<String>,
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_credential_file() -> PathBuf {
    PathBuf::from(DEFAULT_CREDENTIAL_FILE)
}

fn default_cache_dir() -> PathBuf {
    PathBuf::from(DEFAULT_CACHE_DIR)
}

fn default_log_filter() -> String {
    DEFAULT_LOG_FILTER.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            credential_file: default_credential_file(),
            cache_dir: default_cache_dir(),
            temp_dir: None,
            otel_http_url: None,
            log_filter: default_log_filter(),
        }
    }
}

impl Config {
    /// Load the config file at `path`, or fall back to `FISH_TTS_*`
    /// environment variables when the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(config) => Ok(toml::from_str::<Config>(&config)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::from_env()),
            Err(err) => Err(err.into()),
        }
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        Self {
            credential_file: lookup("FISH_TTS_CREDENTIAL_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.credential_file),
            cache_dir: lookup("FISH_TTS_CACHE_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.cache_dir),
            temp_dir: lookup("FISH_TTS_TEMP_DIR").map(PathBuf::from),
            otel_http_url: lookup("FISH_TTS_OTEL_HTTP_URL"),
            log_filter: lookup("FISH_TTS_LOG").unwrap_or(defaults.log_filter),
        }
    }
}
