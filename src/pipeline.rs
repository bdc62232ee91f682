// src/pipeline.rs
//! Batch passes over the persisted tree.
//!
//! Each pass reads everything it needs, transforms the tree in memory and
//! writes it back only at the end. A failing pass leaves the last written
//! tree untouched, so any pass can be rerun against it.

use crate::config::Config;
use crate::enrich::{self, EnrichReport, FindingRow, SinkRow, VulnerabilityRow};
use crate::error::{RepotreeError, Result};
use crate::export;
use crate::segment::{self, HeaderPattern};
use crate::store;
use crate::structure::StructureExtractor;
use crate::tree::RepoTree;
use std::fs;
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildReport {
    pub files: usize,
}

/// Dump text to tree, no I/O.
///
/// # Errors
/// Returns error if the configured patterns do not compile.
pub fn build_tree(dump: &str, config: &Config) -> Result<RepoTree> {
    let pattern = HeaderPattern::from_config(&config.segmenter)?;
    let extractor = StructureExtractor::new(&config.structure)?;
    let blocks = segment::segment(dump, &pattern);
    Ok(RepoTree::build(&blocks, &extractor))
}

/// Reads a dump, builds the tree and writes it to `tree_path`.
///
/// # Errors
/// Returns error if the dump cannot be read or the tree cannot be written.
pub fn run_build(dump_path: &Path, tree_path: &Path, config: &Config) -> Result<BuildReport> {
    let dump = fs::read_to_string(dump_path).map_err(|e| RepotreeError::io(e, dump_path))?;
    let tree = build_tree(&dump, config)?;
    let report = BuildReport {
        files: tree.file_count(),
    };
    store::save_tree(tree_path, &tree, config.output.indent)?;
    info!(files = report.files, tree = %tree_path.display(), "tree written");
    Ok(report)
}

/// Loads the tree, merges one finding CSV into it and writes it back.
///
/// # Errors
/// Returns error if the tree or CSV cannot be read or decoded, or the tree
/// cannot be written. Nothing is written on error.
pub fn run_enrichment<R: FindingRow>(
    csv_path: &Path,
    tree_path: &Path,
    config: &Config,
) -> Result<EnrichReport> {
    let mut tree = store::load_tree(tree_path)?;
    let rows: Vec<R> = enrich::read_rows(csv_path)?;
    let report = enrich::enrich(&mut tree, rows, &config.matcher);
    store::save_tree(tree_path, &tree, config.output.indent)?;
    Ok(report)
}

/// # Errors
/// See [`run_enrichment`].
pub fn run_sinks(csv_path: &Path, tree_path: &Path, config: &Config) -> Result<EnrichReport> {
    run_enrichment::<SinkRow>(csv_path, tree_path, config)
}

/// # Errors
/// See [`run_enrichment`].
pub fn run_vulnerabilities(
    csv_path: &Path,
    tree_path: &Path,
    config: &Config,
) -> Result<EnrichReport> {
    run_enrichment::<VulnerabilityRow>(csv_path, tree_path, config)
}

/// # Errors
/// Returns error if the tree cannot be loaded or the report cannot be written.
pub fn run_export(tree_path: &Path, out_path: &Path) -> Result<usize> {
    let tree = store::load_tree(tree_path)?;
    let rows = export::write_csv(&tree, out_path)?;
    info!(rows, out = %out_path.display(), "report written");
    Ok(rows)
}

/// Inputs of a full run. Absent CSVs skip their pass.
#[derive(Debug, Clone, Copy)]
pub struct RunPlan<'a> {
    pub dump: &'a Path,
    pub tree: &'a Path,
    pub sinks: Option<&'a Path>,
    pub vulnerabilities: Option<&'a Path>,
    pub export: Option<&'a Path>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub build: BuildReport,
    pub sinks: Option<EnrichReport>,
    pub vulnerabilities: Option<EnrichReport>,
    pub exported: Option<usize>,
}

impl RunReport {
    #[must_use]
    pub fn unmatched(&self) -> usize {
        [&self.sinks, &self.vulnerabilities]
            .into_iter()
            .flatten()
            .map(|r| r.unmatched.len())
            .sum()
    }
}

/// Build, sinks, vulnerabilities, export; strictly in that order.
///
/// # Errors
/// Returns the first pass error; earlier passes stay written.
pub fn run_all(plan: &RunPlan<'_>, config: &Config) -> Result<RunReport> {
    let build = run_build(plan.dump, plan.tree, config)?;
    let sinks = plan
        .sinks
        .map(|csv| run_sinks(csv, plan.tree, config))
        .transpose()?;
    let vulnerabilities = plan
        .vulnerabilities
        .map(|csv| run_vulnerabilities(csv, plan.tree, config))
        .transpose()?;
    let exported = plan
        .export
        .map(|out| run_export(plan.tree, out))
        .transpose()?;

    Ok(RunReport {
        build,
        sinks,
        vulnerabilities,
        exported,
    })
}
