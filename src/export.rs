// src/export.rs
//! Flattens an enriched tree into one report row per file.

use crate::error::{RepotreeError, Result};
use crate::tree::{RepoTree, ROOT_NAME};
use crate::types::{FileNode, FileStructure};
use std::fs::File;
use std::io::Write;
use std::path::Path;

pub const HEADERS: [&str; 4] = ["COMPLETE FILE PATH", "Code Snippet", "Sinks", "Vulnerabilities"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRow {
    pub path: String,
    pub code_snippet: String,
    pub sinks: String,
    pub vulnerabilities: String,
}

/// One row per leaf, in tree order. Paths keep the `root/` prefix.
#[must_use]
pub fn flatten(tree: &RepoTree) -> Vec<ExportRow> {
    tree.leaves()
        .iter()
        .map(|leaf| ExportRow {
            path: format!("{ROOT_NAME}/{}", leaf.canonical_path()),
            code_snippet: code_snippet(&leaf.file.structure),
            sinks: sinks_block(leaf.file),
            vulnerabilities: vulnerabilities_block(leaf.file),
        })
        .collect()
}

fn code_snippet(structure: &FileStructure) -> String {
    let mut parts: Vec<&str> = Vec::new();
    for class in &structure.classes {
        parts.push(class.class_body.as_str());
        parts.extend(class.methods.iter().map(|m| m.code.as_str()));
    }
    if !structure.other.is_empty() {
        parts.push(structure.other.as_str());
    }
    parts.join("\n").trim().to_string()
}

fn sinks_block(file: &FileNode) -> String {
    file.sink_details
        .iter()
        .map(|s| {
            tagged(
                "SINK",
                &[
                    s.ai_sink_label.as_str(),
                    s.code_summary.as_str(),
                    s.code_snippet.as_str(),
                ],
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn vulnerabilities_block(file: &FileNode) -> String {
    file.vulnerabilities
        .iter()
        .map(|v| {
            tagged(
                "VULNERABILITIES",
                &[
                    v.code_snippet.as_str(),
                    v.risk_level.as_str(),
                    v.ref_link.as_str(),
                    v.message_to_fix.as_str(),
                ],
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn tagged(tag: &str, fields: &[&str]) -> String {
    let mut out = format!("<{tag}>\n");
    for field in fields {
        out.push_str(field.trim());
        out.push('\n');
    }
    out.push_str(&format!("</{tag}>"));
    out
}

/// Writes `rows` as CSV with a header line.
///
/// # Errors
/// Returns error if a record cannot be written.
pub fn write_rows<W: Write>(out: W, rows: &[ExportRow], label: &Path) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new().has_headers(true).from_writer(out);
    wtr.write_record(HEADERS).map_err(|e| RepotreeError::csv(e, label))?;
    for r in rows {
        wtr.write_record([&r.path, &r.code_snippet, &r.sinks, &r.vulnerabilities])
            .map_err(|e| RepotreeError::csv(e, label))?;
    }
    wtr.flush().map_err(|e| RepotreeError::io(e, label))?;
    Ok(())
}

/// Flattens `tree` and writes the report to `path`. Returns the row count.
///
/// # Errors
/// Returns error if the file cannot be created or written.
pub fn write_csv(tree: &RepoTree, path: &Path) -> Result<usize> {
    let rows = flatten(tree);
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| RepotreeError::io(e, parent))?;
    }
    let file = File::create(path).map_err(|e| RepotreeError::io(e, path))?;
    write_rows(file, &rows, path)?;
    Ok(rows.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ClassRecord, MethodRecord, SinkDetail, Vulnerability};

    fn enriched_tree() -> RepoTree {
        let mut tree = RepoTree::new();
        tree.insert(
            "pkg/mod.py",
            FileStructure {
                classes: vec![ClassRecord {
                    name: "Foo".into(),
                    class_body: "class Foo:\n".into(),
                    methods: vec![MethodRecord {
                        name: "bar".into(),
                        code: "    def bar(self):\n        return 1\n".into(),
                    }],
                }],
                other: "import os".into(),
            },
        );
        tree
    }

    #[test]
    fn test_code_snippet_joins_classes_then_other() {
        let rows = flatten(&enriched_tree());
        assert_eq!(rows[0].path, "root/pkg/mod.py");
        assert_eq!(
            rows[0].code_snippet,
            "class Foo:\n\n    def bar(self):\n        return 1\n\nimport os"
        );
        assert_eq!(rows[0].sinks, "");
    }

    #[test]
    fn test_finding_blocks() {
        let mut file = FileNode::new("a.py", FileStructure::default());
        file.sink_details.push(SinkDetail {
            ai_sink_label: " Console ".into(),
            code_summary: "Prints".into(),
            code_snippet: "print(x)".into(),
            ..SinkDetail::default()
        });
        file.sink_details.push(SinkDetail::default());
        file.vulnerabilities.push(Vulnerability {
            code_snippet: "eval(x)".into(),
            risk_level: "HIGH".into(),
            ref_link: "https://x".into(),
            message_to_fix: "fix".into(),
            ..Vulnerability::default()
        });

        assert_eq!(
            sinks_block(&file),
            "<SINK>\nConsole\nPrints\nprint(x)\n</SINK>\n\n<SINK>\n\n\n\n</SINK>"
        );
        assert_eq!(
            vulnerabilities_block(&file),
            "<VULNERABILITIES>\neval(x)\nHIGH\nhttps://x\nfix\n</VULNERABILITIES>"
        );
    }

    #[test]
    fn test_write_rows_header_only_for_empty_tree() -> anyhow::Result<()> {
        let mut buf = Vec::new();
        write_rows(&mut buf, &flatten(&RepoTree::new()), Path::new("out.csv"))?;
        assert_eq!(
            String::from_utf8(buf)?,
            "COMPLETE FILE PATH,Code Snippet,Sinks,Vulnerabilities\n"
        );
        Ok(())
    }
}
