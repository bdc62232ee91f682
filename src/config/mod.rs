// src/config/mod.rs
pub mod io;
pub mod types;

pub use self::io::CONFIG_FILE;
pub use self::types::{
    Config, MatcherConfig, OutputConfig, PathsConfig, RepotreeToml, SegmenterConfig,
    StructureConfig,
};
use crate::error::{RepotreeError, Result};
use std::path::Path;

impl Config {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a config from `repotree.toml` in the working directory.
    /// A missing file yields defaults.
    ///
    /// # Errors
    /// Returns error if the file exists but is not valid TOML.
    pub fn load() -> Result<Self> {
        let path = Path::new(CONFIG_FILE);
        if !path.exists() {
            let config = Self::new();
            config.validate()?;
            return Ok(config);
        }
        Self::load_from(path)
    }

    /// Creates a config from an explicit file, which must exist.
    ///
    /// # Errors
    /// Returns error if the file cannot be read or is not valid TOML.
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = Self::new();
        io::load_toml_config(&mut config, path)?;
        config.validate()?;
        Ok(config)
    }

    /// Validates configuration.
    ///
    /// # Errors
    /// Returns error if a value would make the segmenter or classifiers unusable.
    pub fn validate(&self) -> Result<()> {
        if self.segmenter.extensions.is_empty() {
            return Err(RepotreeError::Config(
                "segmenter.extensions must not be empty".into(),
            ));
        }
        if let Some(bad) = self
            .segmenter
            .extensions
            .iter()
            .find(|e| !e.starts_with('.') || e.len() < 2)
        {
            return Err(RepotreeError::Config(format!(
                "extension '{bad}' must start with '.'"
            )));
        }
        for (label, kw) in [
            ("class_keyword", &self.structure.class_keyword),
            ("method_keyword", &self.structure.method_keyword),
        ] {
            if kw.trim().is_empty() || kw.contains(char::is_whitespace) {
                return Err(RepotreeError::Config(format!(
                    "structure.{label} must be a single word"
                )));
            }
        }
        if let Some(prefix) = &self.matcher.root_prefix {
            if prefix.is_empty() || prefix.contains('/') {
                return Err(RepotreeError::Config(format!(
                    "matcher.root_prefix '{prefix}' must be a single path segment"
                )));
            }
        }
        Ok(())
    }
}
