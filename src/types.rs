// src/types.rs
//! Common data structures shared by the segmenter, the tree and the enrichment passes.
//!
//! The serialized shape is the persisted tree document: directories carry
//! `name` + `children`, files carry `name`, `structure` and five finding lists.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One file section cut out of a repository-map dump.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawBlock {
    pub path: String,
    pub content: String,
}

impl RawBlock {
    #[must_use]
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodRecord {
    pub name: String,
    /// Verbatim text including the boundary line, one `\n` per line.
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassRecord {
    pub name: String,
    /// Boundary line plus every class line that is not inside a method.
    pub class_body: String,
    #[serde(default)]
    pub methods: Vec<MethodRecord>,
}

/// Shallow class/method breakdown of one file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileStructure {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<ClassRecord>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub other: String,
}

/// A data-sink finding attached to a file leaf.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SinkDetail {
    pub ai_sink_label: String,
    pub code_summary: String,
    pub code_snippet: String,
    pub line_number: String,
    pub column_number: String,
}

/// A vulnerability finding attached to a file leaf.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vulnerability {
    pub code_snippet: String,
    pub line_number: String,
    pub risk_level: String,
    pub ref_link: String,
    pub message_to_fix: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileNode {
    pub name: String,
    pub structure: FileStructure,
    #[serde(default)]
    pub source: Vec<Value>,
    #[serde(default)]
    pub data_model: Vec<Value>,
    #[serde(default)]
    pub third_party_dependencies: Vec<Value>,
    #[serde(default)]
    pub sink_details: Vec<SinkDetail>,
    #[serde(default)]
    pub vulnerabilities: Vec<Vulnerability>,
}

impl FileNode {
    /// Creates a leaf with every finding list empty.
    #[must_use]
    pub fn new(name: impl Into<String>, structure: FileStructure) -> Self {
        Self {
            name: name.into(),
            structure,
            source: Vec::new(),
            data_model: Vec::new(),
            third_party_dependencies: Vec::new(),
            sink_details: Vec::new(),
            vulnerabilities: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectoryNode {
    pub name: String,
    pub children: Vec<TreeNode>,
}

impl DirectoryNode {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
        }
    }
}

/// A node of the repository tree.
///
/// Untagged on the wire: a node with a `structure` key is a file, anything
/// else with a `name` is a directory. `File` is listed first so serde tries
/// the stricter shape before falling back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    File(FileNode),
    Directory(DirectoryNode),
}

/// Which finding list of a leaf a pass appends to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FindingKind {
    Sink,
    Vulnerability,
}

impl std::fmt::Display for FindingKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sink => write!(f, "sink"),
            Self::Vulnerability => write!(f, "vulnerability"),
        }
    }
}
