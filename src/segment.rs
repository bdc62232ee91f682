// src/segment.rs
//! Splits a repository-map dump into per-file sections.
//!
//! A section header is a bare path-like token ending in a recognized
//! extension, optionally followed by one colon. Everything before the first
//! header is preamble. A body line that happens to look like a header starts
//! a new section; there is no escaping.

use crate::config::SegmenterConfig;
use crate::error::Result;
use crate::types::RawBlock;
use regex::Regex;
use tracing::debug;

/// Compiled section-header matcher for one extension set.
#[derive(Debug, Clone)]
pub struct HeaderPattern {
    re: Regex,
}

impl HeaderPattern {
    /// Builds the header regex from a list of extensions (each with its leading dot).
    ///
    /// # Errors
    /// Returns error if the resulting regex fails to compile.
    pub fn new<S: AsRef<str>>(extensions: &[S]) -> Result<Self> {
        let alternation = extensions
            .iter()
            .map(|e| regex::escape(e.as_ref()))
            .collect::<Vec<_>>()
            .join("|");
        let re = Regex::new(&format!(r"^([a-zA-Z0-9._/\-]+(?:{alternation})):?\s*$"))?;
        Ok(Self { re })
    }

    /// # Errors
    /// Returns error if the configured extensions do not compile.
    pub fn from_config(config: &SegmenterConfig) -> Result<Self> {
        Self::new(&config.extensions)
    }

    /// Returns the declared path if `line` is a section header.
    #[must_use]
    pub fn match_header<'a>(&self, line: &'a str) -> Option<&'a str> {
        self.re
            .captures(line)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }
}

/// Splits `input` into ordered blocks, one per header line.
#[must_use]
pub fn segment(input: &str, pattern: &HeaderPattern) -> Vec<RawBlock> {
    let mut blocks = Vec::new();
    let mut current: Option<(&str, Vec<&str>)> = None;

    for line in input.lines() {
        if let Some(path) = pattern.match_header(line) {
            if let Some((open_path, body)) = current.take() {
                blocks.push(close_section(open_path, &body));
            }
            current = Some((path, Vec::new()));
        } else if let Some((_, body)) = current.as_mut() {
            body.push(line);
        }
    }

    if let Some((open_path, body)) = current {
        blocks.push(close_section(open_path, &body));
    }

    debug!(sections = blocks.len(), "segmented dump");
    blocks
}

/// Drops leading and trailing blank lines; indentation of kept lines is preserved.
fn close_section(path: &str, body: &[&str]) -> RawBlock {
    let start = body
        .iter()
        .position(|line| !line.trim().is_empty())
        .unwrap_or(body.len());
    let end = body
        .iter()
        .rposition(|line| !line.trim().is_empty())
        .map_or(start, |last| last + 1);
    RawBlock::new(path, body[start..end].join("\n"))
}
