// src/error.rs
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepotreeError {
    #[error("I/O error: {source} (path: {path})")]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },

    #[error("Invalid JSON in {path}: {source}")]
    Json {
        source: serde_json::Error,
        path: PathBuf,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { source: csv::Error, path: PathBuf },

    #[error("Invalid TOML in {path}: {source}")]
    Toml {
        source: toml::de::Error,
        path: PathBuf,
    },

    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    #[error("Invalid tree: {0}")]
    InvalidTree(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl RepotreeError {
    /// Returns true for errors caused by malformed input rather than the environment.
    /// A dump that is not UTF-8 counts as malformed input.
    #[must_use]
    pub fn is_invalid_input(&self) -> bool {
        match self {
            Self::Io { source, .. } => source.kind() == std::io::ErrorKind::InvalidData,
            Self::Json { .. } | Self::Csv { .. } | Self::Toml { .. } | Self::InvalidTree(_) => true,
            Self::Regex(_) | Self::Config(_) => false,
        }
    }

    pub(crate) fn io(source: std::io::Error, path: impl Into<PathBuf>) -> Self {
        Self::Io {
            source,
            path: path.into(),
        }
    }

    pub(crate) fn csv(source: csv::Error, path: impl Into<PathBuf>) -> Self {
        Self::Csv {
            source,
            path: path.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RepotreeError>;
