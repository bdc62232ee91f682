use super::types::{Config, RepotreeToml};
use crate::error::{RepotreeError, Result};
use std::fs;
use std::path::Path;

pub const CONFIG_FILE: &str = "repotree.toml";

/// Reads `path` into `config`.
///
/// # Errors
/// Returns error if the file cannot be read or parsed.
pub fn load_toml_config(config: &mut Config, path: &Path) -> Result<()> {
    let content = fs::read_to_string(path).map_err(|e| RepotreeError::io(e, path))?;
    parse_toml(config, &content).map_err(|source| RepotreeError::Toml {
        source,
        path: path.to_path_buf(),
    })
}

/// Applies a TOML document over the defaults.
///
/// # Errors
/// Returns the TOML decode error.
pub fn parse_toml(config: &mut Config, content: &str) -> std::result::Result<(), toml::de::Error> {
    let parsed: RepotreeToml = toml::from_str(content)?;
    config.segmenter = parsed.segmenter;
    config.structure = parsed.structure;
    config.matcher = parsed.matcher;
    config.paths = parsed.paths;
    config.output = parsed.output;
    Ok(())
}
