// src/cli/handlers.rs
//! Command handlers: run a pass, print a summary, pick an exit code.

use crate::config::Config;
use crate::enrich::EnrichReport;
use crate::exit::RepotreeExit;
use crate::pipeline::{self, RunPlan};
use crate::store;
use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;

/// Handles the build command.
///
/// # Errors
/// Returns error if the dump cannot be read or the tree cannot be written.
pub fn handle_build(dump: &Path, tree: &Path, config: &Config) -> Result<RepotreeExit> {
    let report = pipeline::run_build(dump, tree, config)
        .with_context(|| format!("Failed to build tree from {}", dump.display()))?;
    println!(
        "{} {} files -> {}",
        "✓".green(),
        report.files,
        tree.display()
    );
    Ok(RepotreeExit::Success)
}

/// Handles the sinks command.
///
/// # Errors
/// Returns error if the pass fails; the tree file is left as it was.
pub fn handle_sinks(
    csv: &Path,
    tree: &Path,
    strict: bool,
    config: &Config,
) -> Result<RepotreeExit> {
    let report = pipeline::run_sinks(csv, tree, config)
        .with_context(|| format!("Sink pass failed for {}", csv.display()))?;
    print_enrichment(&report);
    Ok(enrichment_exit(&report, strict))
}

/// Handles the vulns command.
///
/// # Errors
/// Returns error if the pass fails; the tree file is left as it was.
pub fn handle_vulns(
    csv: &Path,
    tree: &Path,
    strict: bool,
    config: &Config,
) -> Result<RepotreeExit> {
    let report = pipeline::run_vulnerabilities(csv, tree, config)
        .with_context(|| format!("Vulnerability pass failed for {}", csv.display()))?;
    print_enrichment(&report);
    Ok(enrichment_exit(&report, strict))
}

/// Handles the export command.
///
/// # Errors
/// Returns error if the tree cannot be loaded or the report cannot be written.
pub fn handle_export(tree: &Path, out: &Path) -> Result<RepotreeExit> {
    let rows = pipeline::run_export(tree, out)
        .with_context(|| format!("Failed to export {}", tree.display()))?;
    println!("{} {} rows -> {}", "✓".green(), rows, out.display());
    Ok(RepotreeExit::Success)
}

/// Handles the run command.
///
/// # Errors
/// Returns the first failing pass.
pub fn handle_run(plan: &RunPlan<'_>, strict: bool, config: &Config) -> Result<RepotreeExit> {
    let report = pipeline::run_all(plan, config)?;
    println!(
        "{} {} files -> {}",
        "✓".green(),
        report.build.files,
        plan.tree.display()
    );
    for pass in [&report.sinks, &report.vulnerabilities].into_iter().flatten() {
        print_enrichment(pass);
    }
    if let (Some(rows), Some(out)) = (report.exported, plan.export) {
        println!("{} {} rows -> {}", "✓".green(), rows, out.display());
    }

    if strict && report.unmatched() > 0 {
        return Ok(RepotreeExit::Unmatched);
    }
    Ok(RepotreeExit::Success)
}

/// Handles the show command.
///
/// # Errors
/// Returns error if the tree cannot be loaded.
pub fn handle_show(tree_path: &Path) -> Result<RepotreeExit> {
    let tree = store::load_tree(tree_path)
        .with_context(|| format!("Failed to load {}", tree_path.display()))?;
    for leaf in tree.leaves() {
        let sinks = leaf.file.sink_details.len();
        let vulns = leaf.file.vulnerabilities.len();
        let counts = format!("sinks: {sinks}  vulns: {vulns}");
        let counts = if vulns > 0 {
            counts.red()
        } else if sinks > 0 {
            counts.yellow()
        } else {
            counts.dimmed()
        };
        println!("{:<50} {}", leaf.canonical_path(), counts);
    }
    Ok(RepotreeExit::Success)
}

fn print_enrichment(report: &EnrichReport) {
    let summary = format!(
        "{} pass: {}/{} rows matched",
        report.kind, report.matched, report.rows
    );
    if report.is_complete() {
        println!("{} {}", "✓".green(), summary);
        return;
    }
    println!("{} {}", "⚠".yellow(), summary);
    for path in &report.unmatched {
        println!("    {} {}", "not found:".yellow(), path);
    }
}

fn enrichment_exit(report: &EnrichReport, strict: bool) -> RepotreeExit {
    if strict && !report.is_complete() {
        RepotreeExit::Unmatched
    } else {
        RepotreeExit::Success
    }
}
