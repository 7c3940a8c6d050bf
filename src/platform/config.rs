//! Birthdate config file.
//!
//! Reads `config.json` next to the executable. Any failure falls back to
//! the default birthdate; the reason is kept for logging and tests.

use crate::clock::age::{BIRTHDATE_FORMAT, DEFAULT_BIRTHDATE};
use chrono::NaiveDateTime;
use serde::Deserialize;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name of the config, resolved beside the executable.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// On-disk config record.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    /// Birthdate as `YYYY-MM-DD HH:MM:SS`
    #[serde(default)]
    pub birthdate: Option<String>,
}

/// Why a config could not provide a birthdate.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    Unreadable(#[source] io::Error),

    #[error("Config file is not valid JSON: {0}")]
    Malformed(#[source] serde_json::Error),

    #[error("Config file has no birthdate field")]
    MissingField,

    #[error("Invalid birthdate '{value}': {source}")]
    InvalidTimestamp {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

/// Result of loading a birthdate.
#[derive(Debug)]
pub enum LoadOutcome {
    Loaded(NaiveDateTime),
    UseDefault(ConfigError),
}

impl LoadOutcome {
    /// The loaded birthdate, or the default one.
    pub fn birthdate(&self) -> NaiveDateTime {
        match self {
            LoadOutcome::Loaded(birthdate) => *birthdate,
            LoadOutcome::UseDefault(_) => DEFAULT_BIRTHDATE,
        }
    }

    pub fn is_default(&self) -> bool {
        matches!(self, LoadOutcome::UseDefault(_))
    }
}

/// Path of the config file beside the running executable.
pub fn config_path() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_FILE_NAME)
}

/// Load the birthdate from `path`, never failing.
pub fn load_birthdate(path: &Path) -> LoadOutcome {
    match read_birthdate(path) {
        Ok(birthdate) => {
            tracing::debug!(path = %path.display(), %birthdate, "loaded birthdate");
            LoadOutcome::Loaded(birthdate)
        }
        Err(err) => {
            match &err {
                ConfigError::NotFound(_) => {
                    tracing::info!(path = %path.display(), "no config file, using default birthdate")
                }
                _ => tracing::warn!(path = %path.display(), error = %err, "using default birthdate"),
            }
            LoadOutcome::UseDefault(err)
        }
    }
}

fn read_birthdate(path: &Path) -> Result<NaiveDateTime, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => ConfigError::NotFound(path.to_path_buf()),
        _ => ConfigError::Unreadable(e),
    })?;
    parse_config(&text)
}

/// Parse config text into a birthdate.
pub fn parse_config(text: &str) -> Result<NaiveDateTime, ConfigError> {
    let config: ConfigFile = serde_json::from_str(text).map_err(ConfigError::Malformed)?;
    let value = config.birthdate.ok_or(ConfigError::MissingField)?;
    parse_birthdate(&value)
}

pub fn parse_birthdate(value: &str) -> Result<NaiveDateTime, ConfigError> {
    NaiveDateTime::parse_from_str(value, BIRTHDATE_FORMAT).map_err(|source| {
        ConfigError::InvalidTimestamp {
            value: value.to_string(),
            source,
        }
    })
}
