// src/enrich.rs
//! Merges scanner findings into tree leaves.
//!
//! Each CSV row names a file in the reporting tool's own path convention.
//! Rows are resolved with [`PathMatcher`] and appended, in row order, to the
//! matched leaf. Unresolved rows are logged and skipped. Appending never
//! deduplicates: running the same CSV twice doubles the findings.

use crate::config::MatcherConfig;
use crate::error::{RepotreeError, Result};
use crate::matcher::{MatchOutcome, PathMatcher};
use crate::tree::RepoTree;
use crate::types::{FileNode, FindingKind, SinkDetail, Vulnerability};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

/// One decoded row of a finding stream.
pub trait FindingRow: DeserializeOwned {
    const KIND: FindingKind;

    /// Path of the file the finding refers to, as reported.
    fn target_path(&self) -> &str;

    /// Appends the finding payload to the leaf's list for this kind.
    fn attach(self, leaf: &mut FileNode);
}

/// Row of the data-sink CSV. The two AI columns are empty when the labeling
/// step did not run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SinkRow {
    #[serde(rename = "Code Snippet")]
    pub code_snippet: String,
    #[serde(rename = "File Path")]
    pub file_path: String,
    #[serde(rename = "Line Number")]
    pub line_number: String,
    #[serde(rename = "Column Number")]
    pub column_number: String,
    #[serde(rename = "AI Sink Label", default)]
    pub ai_sink_label: String,
    #[serde(rename = "Code Summary", default)]
    pub code_summary: String,
}

impl FindingRow for SinkRow {
    const KIND: FindingKind = FindingKind::Sink;

    fn target_path(&self) -> &str {
        &self.file_path
    }

    fn attach(self, leaf: &mut FileNode) {
        leaf.sink_details.push(SinkDetail {
            ai_sink_label: self.ai_sink_label,
            code_summary: self.code_summary,
            code_snippet: self.code_snippet,
            line_number: self.line_number,
            column_number: self.column_number,
        });
    }
}

/// Row of the vulnerability CSV. Values are whitespace-trimmed on attach.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct VulnerabilityRow {
    #[serde(rename = "File Name")]
    pub file_name: String,
    #[serde(rename = "Code Snippet")]
    pub code_snippet: String,
    #[serde(rename = "Line Number")]
    pub line_number: String,
    #[serde(rename = "Risk Level")]
    pub risk_level: String,
    #[serde(rename = "Ref Link")]
    pub ref_link: String,
    #[serde(rename = "Message To Fix")]
    pub message_to_fix: String,
}

impl FindingRow for VulnerabilityRow {
    const KIND: FindingKind = FindingKind::Vulnerability;

    fn target_path(&self) -> &str {
        self.file_name.trim()
    }

    fn attach(self, leaf: &mut FileNode) {
        leaf.vulnerabilities.push(Vulnerability {
            code_snippet: self.code_snippet.trim().to_string(),
            line_number: self.line_number.trim().to_string(),
            risk_level: self.risk_level.trim().to_string(),
            ref_link: self.ref_link.trim().to_string(),
            message_to_fix: self.message_to_fix.trim().to_string(),
        });
    }
}

/// Outcome of one enrichment pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichReport {
    pub kind: FindingKind,
    pub rows: usize,
    pub matched: usize,
    /// Reported paths that resolved to no leaf, in row order.
    pub unmatched: Vec<String>,
}

impl EnrichReport {
    fn new(kind: FindingKind) -> Self {
        Self {
            kind,
            rows: 0,
            matched: 0,
            unmatched: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.unmatched.is_empty()
    }
}

/// Decodes every row of a finding CSV. Any undecodable row fails the whole read.
///
/// # Errors
/// Returns error if the file cannot be opened or a row does not decode.
pub fn read_rows<R: FindingRow>(path: &Path) -> Result<Vec<R>> {
    let reader = csv::Reader::from_path(path).map_err(|e| RepotreeError::csv(e, path))?;
    collect_rows(reader, path)
}

/// Same as [`read_rows`] over any reader; `label` names the source in errors.
///
/// # Errors
/// Returns error if a row does not decode.
pub fn read_rows_from<R: FindingRow, I: Read>(input: I, label: &Path) -> Result<Vec<R>> {
    collect_rows(csv::Reader::from_reader(input), label)
}

fn collect_rows<R: FindingRow, I: Read>(
    mut reader: csv::Reader<I>,
    label: &Path,
) -> Result<Vec<R>> {
    reader
        .deserialize::<R>()
        .map(|row| row.map_err(|e| RepotreeError::csv(e, label)))
        .collect()
}

/// Resolves and appends every row to `tree`, in row order.
pub fn enrich<R: FindingRow>(
    tree: &mut RepoTree,
    rows: Vec<R>,
    config: &MatcherConfig,
) -> EnrichReport {
    let kind = R::KIND;
    let matcher = PathMatcher::new(tree, config);
    let mut report = EnrichReport::new(kind);

    for row in rows {
        report.rows += 1;
        let target = row.target_path().to_string();
        match matcher.resolve(&target) {
            MatchOutcome::Matched(resolution) => {
                let Some(leaf) = tree.leaf_mut(&resolution.address) else {
                    warn!(target_path = %target, "matched leaf vanished from tree");
                    report.unmatched.push(target);
                    continue;
                };
                debug!(
                    target_path = %target,
                    leaf = %resolution.canonical_path,
                    strategy = ?resolution.strategy,
                    variant = ?resolution.variant,
                    "resolved finding"
                );
                row.attach(leaf);
                report.matched += 1;
            }
            MatchOutcome::NoMatch => {
                warn!(kind = %kind, target_path = %target, "file path not found in tree");
                report.unmatched.push(target);
            }
        }
    }

    info!(
        kind = %report.kind,
        rows = report.rows,
        matched = report.matched,
        unmatched = report.unmatched.len(),
        "enrichment pass complete"
    );
    report
}
