// src/matcher.rs
//! Resolves a scanner-reported path to a unique tree leaf.
//!
//! Scanners and the mapping tool disagree on path conventions: some report
//! paths with an extra leading folder, some drop the project root folder.
//! Resolution tries each path variant in order, and for each variant each
//! strategy in order, returning the first leaf found in tree order.

use crate::config::MatcherConfig;
use crate::tree::{LeafAddress, RepoTree};

/// A leaf reduced to what matching needs. Owns its data so the tree can be
/// mutated while the index is alive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedLeaf {
    pub dirs: Vec<String>,
    pub name: String,
    pub canonical_path: String,
    pub address: LeafAddress,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStrategy {
    /// Canonical path equals the target.
    Exact,
    /// Same file name, and the leaf's directories are a trailing run of the
    /// target's directories.
    Suffix,
}

/// Evaluation order of strategies within one path variant.
pub const STRATEGIES: [MatchStrategy; 2] = [MatchStrategy::Exact, MatchStrategy::Suffix];

impl MatchStrategy {
    /// Returns the first leaf this strategy accepts for `target`.
    #[must_use]
    pub fn select<'l>(self, leaves: &'l [IndexedLeaf], target: &str) -> Option<&'l IndexedLeaf> {
        match self {
            Self::Exact => leaves.iter().find(|leaf| leaf.canonical_path == target),
            Self::Suffix => {
                let (target_dirs, base) = split_target(target);
                leaves
                    .iter()
                    .find(|leaf| leaf.name == base && target_dirs.ends_with(&leaf.dirs))
            }
        }
    }
}

fn split_target(target: &str) -> (Vec<String>, &str) {
    match target.rsplit_once('/') {
        Some((dir, base)) => (dir.split('/').map(str::to_string).collect(), base),
        None => (Vec::new(), target),
    }
}

/// How the reported path was rewritten before it matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathVariant {
    AsReported,
    PrefixStripped,
    PrefixAdded,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub address: LeafAddress,
    pub canonical_path: String,
    pub strategy: MatchStrategy,
    pub variant: PathVariant,
}

/// Result of resolving one reported path. A miss is not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchOutcome {
    Matched(Resolution),
    NoMatch,
}

#[derive(Debug, Clone)]
pub struct PathMatcher {
    leaves: Vec<IndexedLeaf>,
    root_prefix: Option<String>,
}

impl PathMatcher {
    /// Indexes every leaf of `tree` once.
    #[must_use]
    pub fn new(tree: &RepoTree, config: &MatcherConfig) -> Self {
        let leaves = tree
            .leaves()
            .into_iter()
            .map(|leaf| IndexedLeaf {
                dirs: leaf.dirs.iter().map(|d| (*d).to_string()).collect(),
                name: leaf.name().to_string(),
                canonical_path: leaf.canonical_path(),
                address: leaf.address,
            })
            .collect();
        Self {
            leaves,
            root_prefix: config.root_prefix.clone(),
        }
    }

    #[must_use]
    pub fn leaves(&self) -> &[IndexedLeaf] {
        &self.leaves
    }

    /// Path variants to try, in order. Without a configured root prefix only
    /// the reported path is tried.
    #[must_use]
    pub fn variants(&self, target: &str) -> Vec<(PathVariant, String)> {
        let target = target.replace('\\', "/");
        let mut out = vec![(PathVariant::AsReported, target.clone())];
        if let Some(prefix) = &self.root_prefix {
            if let Some(stripped) = target.strip_prefix(&format!("{prefix}/")) {
                out.push((PathVariant::PrefixStripped, stripped.to_string()));
            }
            out.push((PathVariant::PrefixAdded, format!("{prefix}/{target}")));
        }
        out
    }

    #[must_use]
    pub fn resolve(&self, target: &str) -> MatchOutcome {
        for (variant, candidate) in self.variants(target) {
            for strategy in STRATEGIES {
                if let Some(leaf) = strategy.select(&self.leaves, &candidate) {
                    return MatchOutcome::Matched(Resolution {
                        address: leaf.address.clone(),
                        canonical_path: leaf.canonical_path.clone(),
                        strategy,
                        variant,
                    });
                }
            }
        }
        MatchOutcome::NoMatch
    }
}
