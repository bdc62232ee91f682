// src/tree.rs
//! Directory/file hierarchy keyed by path segments.

use crate::structure::StructureExtractor;
use crate::types::{DirectoryNode, FileNode, FileStructure, RawBlock, TreeNode};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Name of the synthetic top-level directory. Never part of a canonical path.
pub const ROOT_NAME: &str = "root";

/// Position of a leaf as child indices from the root.
///
/// Only valid while the tree shape is unchanged; enrichment only grows
/// finding lists, so addresses taken at the start of a pass stay valid.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LeafAddress(Vec<usize>);

/// A file leaf seen through its canonical path.
#[derive(Debug, Clone)]
pub struct LeafEntry<'a> {
    /// Directory names from the root (root excluded).
    pub dirs: Vec<&'a str>,
    pub address: LeafAddress,
    pub file: &'a FileNode,
}

impl LeafEntry<'_> {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.file.name
    }

    /// Directory names joined by `/`, empty for leaves directly under the root.
    #[must_use]
    pub fn dir_path(&self) -> String {
        self.dirs.join("/")
    }

    /// Directory names plus leaf name, joined by `/`.
    #[must_use]
    pub fn canonical_path(&self) -> String {
        if self.dirs.is_empty() {
            self.file.name.clone()
        } else {
            format!("{}/{}", self.dir_path(), self.file.name)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RepoTree {
    root: DirectoryNode,
}

impl Default for RepoTree {
    fn default() -> Self {
        Self::new()
    }
}

impl RepoTree {
    #[must_use]
    pub fn new() -> Self {
        Self {
            root: DirectoryNode::new(ROOT_NAME),
        }
    }

    /// Builds a tree from segmented blocks, in block order.
    #[must_use]
    pub fn build(blocks: &[RawBlock], extractor: &StructureExtractor) -> Self {
        let mut tree = Self::new();
        for block in blocks {
            tree.insert(&block.path, extractor.extract(&block.content));
        }
        debug!(files = blocks.len(), "built tree");
        tree
    }

    #[must_use]
    pub fn root(&self) -> &DirectoryNode {
        &self.root
    }

    /// Appends a new file leaf at `path`, creating missing directories.
    ///
    /// Existing directories are reused; leaves are never merged, so inserting
    /// the same path twice yields two leaves.
    pub fn insert(&mut self, path: &str, structure: FileStructure) {
        let normalized = path.replace('\\', "/");
        let mut segments: Vec<&str> = normalized.split('/').collect();
        let file_name = segments.pop().unwrap_or_default();
        insert_into(&mut self.root, &segments, FileNode::new(file_name, structure));
    }

    /// Every file leaf in depth-first insertion order.
    #[must_use]
    pub fn leaves(&self) -> Vec<LeafEntry<'_>> {
        let mut out = Vec::new();
        collect_leaves(&self.root, &mut Vec::new(), &mut Vec::new(), &mut out);
        out
    }

    #[must_use]
    pub fn file_count(&self) -> usize {
        self.leaves().len()
    }

    /// Looks up a leaf by canonical path (first match in tree order).
    #[must_use]
    pub fn find(&self, canonical_path: &str) -> Option<&FileNode> {
        self.leaves()
            .into_iter()
            .find(|leaf| leaf.canonical_path() == canonical_path)
            .map(|leaf| leaf.file)
    }

    #[must_use]
    pub fn leaf_mut(&mut self, address: &LeafAddress) -> Option<&mut FileNode> {
        let (last, dirs) = address.0.split_last()?;
        let mut dir = &mut self.root;
        for &index in dirs {
            dir = match dir.children.get_mut(index)? {
                TreeNode::Directory(d) => d,
                TreeNode::File(_) => return None,
            };
        }
        match dir.children.get_mut(*last)? {
            TreeNode::File(f) => Some(f),
            TreeNode::Directory(_) => None,
        }
    }
}

/// Descends through `dirs`, creating missing directories, and appends `leaf`.
fn insert_into(dir: &mut DirectoryNode, dirs: &[&str], leaf: FileNode) {
    let Some((head, rest)) = dirs.split_first() else {
        dir.children.push(TreeNode::File(leaf));
        return;
    };
    let existing = dir.children.iter_mut().find_map(|child| match child {
        TreeNode::Directory(d) if d.name == *head => Some(d),
        _ => None,
    });
    match existing {
        Some(sub) => insert_into(sub, rest, leaf),
        None => {
            let mut sub = DirectoryNode::new(*head);
            insert_into(&mut sub, rest, leaf);
            dir.children.push(TreeNode::Directory(sub));
        }
    }
}

fn collect_leaves<'a>(
    dir: &'a DirectoryNode,
    dirs: &mut Vec<&'a str>,
    address: &mut Vec<usize>,
    out: &mut Vec<LeafEntry<'a>>,
) {
    for (index, child) in dir.children.iter().enumerate() {
        address.push(index);
        match child {
            TreeNode::File(file) => out.push(LeafEntry {
                dirs: dirs.clone(),
                address: LeafAddress(address.clone()),
                file,
            }),
            TreeNode::Directory(sub) => {
                dirs.push(&sub.name);
                collect_leaves(sub, dirs, address, out);
                dirs.pop();
            }
        }
        address.pop();
    }
}
