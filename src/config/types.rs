use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmenterConfig {
    /// Extensions (with leading dot) that make a line a section header.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self { extensions: default_extensions() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureConfig {
    #[serde(default = "default_class_keyword")]
    pub class_keyword: String,
    #[serde(default = "default_method_keyword")]
    pub method_keyword: String,
    /// Tree-drawing glyphs tolerated (with whitespace) before a keyword.
    #[serde(default = "default_indent_glyphs")]
    pub indent_glyphs: String,
}

impl Default for StructureConfig {
    fn default() -> Self {
        Self {
            class_keyword: default_class_keyword(),
            method_keyword: default_method_keyword(),
            indent_glyphs: default_indent_glyphs(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatcherConfig {
    /// Project root folder name that scanners may add to, or drop from, reported paths.
    #[serde(default)]
    pub root_prefix: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "default_dump")]
    pub dump: PathBuf,
    #[serde(default = "default_tree")]
    pub tree: PathBuf,
    #[serde(default = "default_sinks_csv")]
    pub sinks_csv: PathBuf,
    #[serde(default = "default_vulnerabilities_csv")]
    pub vulnerabilities_csv: PathBuf,
    #[serde(default = "default_export_csv")]
    pub export_csv: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            dump: default_dump(),
            tree: default_tree(),
            sinks_csv: default_sinks_csv(),
            vulnerabilities_csv: default_vulnerabilities_csv(),
            export_csv: default_export_csv(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_indent")]
    pub indent: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { indent: default_indent() }
    }
}

fn default_extensions() -> Vec<String> {
    [
        ".gitignore", ".py", ".sh", ".json", ".js", ".jsx", ".ts", ".tsx", ".css", ".html",
        ".md", ".svg", ".mjs",
    ]
    .iter()
    .map(|e| (*e).to_string())
    .collect()
}

fn default_class_keyword() -> String { "class".to_string() }
fn default_method_keyword() -> String { "def".to_string() }
fn default_indent_glyphs() -> String { "│".to_string() }

fn default_dump() -> PathBuf { PathBuf::from("files/aider_repomap.txt") }
fn default_tree() -> PathBuf { PathBuf::from("files/aider_repomap.json") }
fn default_sinks_csv() -> PathBuf { PathBuf::from("files/privado_output.csv") }
fn default_vulnerabilities_csv() -> PathBuf { PathBuf::from("files/bearer_output.csv") }
fn default_export_csv() -> PathBuf { PathBuf::from("files/output.csv") }

const fn default_indent() -> usize { 4 }

/// On-disk shape of `repotree.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RepotreeToml {
    #[serde(default)]
    pub segmenter: SegmenterConfig,
    #[serde(default)]
    pub structure: StructureConfig,
    #[serde(default)]
    pub matcher: MatcherConfig,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub segmenter: SegmenterConfig,
    pub structure: StructureConfig,
    pub matcher: MatcherConfig,
    pub paths: PathsConfig,
    pub output: OutputConfig,
}
