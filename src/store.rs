// src/store.rs
//! Loads and saves the persisted tree document.

use crate::error::{RepotreeError, Result};
use crate::tree::{RepoTree, ROOT_NAME};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Reads and validates a tree document.
///
/// # Errors
/// Returns error if the file cannot be read, is not valid JSON, or its
/// top-level node is not the `root` directory.
pub fn load_tree(path: &Path) -> Result<RepoTree> {
    let content = fs::read_to_string(path).map_err(|e| RepotreeError::io(e, path))?;
    let tree: RepoTree = serde_json::from_str(&content).map_err(|source| RepotreeError::Json {
        source,
        path: path.to_path_buf(),
    })?;

    if tree.root().name != ROOT_NAME {
        return Err(RepotreeError::InvalidTree(format!(
            "top-level directory in {} is '{}', expected '{ROOT_NAME}'",
            path.display(),
            tree.root().name
        )));
    }
    Ok(tree)
}

/// Renders a tree as pretty JSON with `indent` spaces, non-ASCII verbatim.
///
/// # Errors
/// Returns error if serialization fails.
pub fn to_json(tree: &RepoTree, indent: usize) -> Result<String> {
    let indent = " ".repeat(indent);
    let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    tree.serialize(&mut ser)
        .map_err(|e| RepotreeError::InvalidTree(e.to_string()))?;
    String::from_utf8(buf).map_err(|e| RepotreeError::InvalidTree(e.to_string()))
}

/// Replaces the tree document atomically (temp file + rename).
///
/// # Errors
/// Returns error if serialization or any filesystem step fails.
pub fn save_tree(path: &Path, tree: &RepoTree, indent: usize) -> Result<()> {
    let content = to_json(tree, indent)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| RepotreeError::io(e, parent))?;
    }
    atomic_write(path, &content)
}

fn atomic_write(path: &Path, content: &str) -> Result<()> {
    let temp_path = path.with_extension("json.tmp");

    fs::write(&temp_path, content).map_err(|e| RepotreeError::io(e, &temp_path))?;
    fs::rename(&temp_path, path).map_err(|e| RepotreeError::io(e, path))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FileStructure;

    #[test]
    fn test_round_trip() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("out/tree.json");

        let mut tree = RepoTree::new();
        tree.insert("src/ünï.py", FileStructure::default());
        save_tree(&path, &tree, 4)?;

        assert_eq!(load_tree(&path)?, tree);
        assert!(fs::read_to_string(&path)?.contains("ünï.py"));
        assert!(!path.with_extension("json.tmp").exists());
        Ok(())
    }

    #[test]
    fn test_indent_width() -> anyhow::Result<()> {
        let json = to_json(&RepoTree::new(), 4)?;
        assert_eq!(json, "{\n    \"name\": \"root\",\n    \"children\": []\n}");
        Ok(())
    }

    #[test]
    fn test_rejects_wrong_root() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("tree.json");
        fs::write(&path, r#"{"name":"top","children":[]}"#)?;
        let err = load_tree(&path).unwrap_err();
        assert!(matches!(err, RepotreeError::InvalidTree(_)));
        Ok(())
    }

    #[test]
    fn test_rejects_file_root() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("tree.json");
        fs::write(&path, r#"{"name":"root","structure":{}}"#)?;
        assert!(load_tree(&path).unwrap_err().is_invalid_input());
        Ok(())
    }
}
