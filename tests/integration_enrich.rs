// tests/integration_enrich.rs
use anyhow::Result;
use repotree_core::config::Config;
use repotree_core::error::RepotreeError;
use repotree_core::pipeline;
use repotree_core::store;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};

const DUMP: &str = "src/app.py:\nclass App:\n    def run(self):\n        pass\nsrc/db/store.py:\nimport sqlite3\nREADME.md:\n# readme\n";

const SINK_HEADER: &str = "Data Sink ID,Sink Label,Code Snippet,File Path,Line Number,Column Number,Data Flow Path,AI Sink Label,Code Summary\n";
const VULN_HEADER: &str = "File Name,Code Snippet,Line Number,Risk Level,Ref Link,Message To Fix\n";

struct Workspace {
    dir: TempDir,
    tree: PathBuf,
}

impl Workspace {
    fn new(config: &Config) -> Result<Self> {
        let dir = tempdir()?;
        let dump = dir.path().join("dump.txt");
        let tree = dir.path().join("tree.json");
        fs::write(&dump, DUMP)?;
        pipeline::run_build(&dump, &tree, config)?;
        Ok(Self { dir, tree })
    }

    fn write(&self, name: &str, content: &str) -> Result<PathBuf> {
        let path = self.dir.path().join(name);
        fs::write(&path, content)?;
        Ok(path)
    }
}

fn sink_counts(tree: &Path) -> Result<Vec<(String, usize)>> {
    Ok(store::load_tree(tree)?
        .leaves()
        .iter()
        .map(|l| (l.canonical_path(), l.file.sink_details.len()))
        .collect())
}

#[test]
fn test_sinks_attach_to_matching_leaves() -> Result<()> {
    let ws = Workspace::new(&Config::new())?;
    let csv = ws.write(
        "sinks.csv",
        &format!(
            "{SINK_HEADER}1,Log,print(x),src/app.py,4,9,f,Console,prints\n\
             2,Db,conn.execute(q),src/db/store.py,2,1,g,SQLite,writes rows\n"
        ),
    )?;

    let report = pipeline::run_sinks(&csv, &ws.tree, &Config::new())?;
    assert_eq!((report.rows, report.matched), (2, 2));

    let tree = store::load_tree(&ws.tree)?;
    let store_leaf = tree
        .find("src/db/store.py")
        .ok_or_else(|| anyhow::anyhow!("missing leaf"))?;
    assert_eq!(store_leaf.sink_details[0].ai_sink_label, "SQLite");
    assert_eq!(store_leaf.sink_details[0].code_summary, "writes rows");
    assert_eq!(store_leaf.sink_details[0].code_snippet, "conn.execute(q)");
    assert_eq!(store_leaf.sink_details[0].line_number, "2");
    Ok(())
}

#[test]
fn test_extra_leading_folder_resolves() -> Result<()> {
    let mut config = Config::new();
    config.matcher.root_prefix = Some("myrepo".into());
    let ws = Workspace::new(&config)?;
    let csv = ws.write(
        "vulns.csv",
        &format!("{VULN_HEADER}myrepo/src/app.py,eval(x),3,HIGH,https://docs/rule,ignore abc\n"),
    )?;

    let report = pipeline::run_vulnerabilities(&csv, &ws.tree, &config)?;
    assert!(report.is_complete());

    let tree = store::load_tree(&ws.tree)?;
    let app = tree.find("src/app.py").ok_or_else(|| anyhow::anyhow!("missing leaf"))?;
    assert_eq!(app.vulnerabilities.len(), 1);
    assert_eq!(app.vulnerabilities[0].risk_level, "HIGH");
    Ok(())
}

#[test]
fn test_unresolvable_path_leaves_tree_unchanged() -> Result<()> {
    let config = Config::new();
    let ws = Workspace::new(&config)?;
    let before = store::load_tree(&ws.tree)?;
    let csv = ws.write(
        "sinks.csv",
        &format!("{SINK_HEADER}1,Log,print(x),other/app.py,4,9,f,Console,prints\n"),
    )?;

    let report = pipeline::run_sinks(&csv, &ws.tree, &config)?;
    assert_eq!(report.matched, 0);
    assert_eq!(report.unmatched, vec!["other/app.py".to_string()]);
    assert_eq!(store::load_tree(&ws.tree)?, before);
    Ok(())
}

#[test]
fn test_rerun_doubles_findings() -> Result<()> {
    let config = Config::new();
    let ws = Workspace::new(&config)?;
    let csv = ws.write(
        "sinks.csv",
        &format!("{SINK_HEADER}1,Log,print(x),src/app.py,4,9,f,Console,prints\n"),
    )?;

    pipeline::run_sinks(&csv, &ws.tree, &config)?;
    let once = sink_counts(&ws.tree)?;
    pipeline::run_sinks(&csv, &ws.tree, &config)?;
    let twice = sink_counts(&ws.tree)?;

    assert_eq!(once[0], ("src/app.py".to_string(), 1));
    assert_eq!(twice[0], ("src/app.py".to_string(), 2));
    Ok(())
}

#[test]
fn test_passes_compose_on_same_tree() -> Result<()> {
    let config = Config::new();
    let ws = Workspace::new(&config)?;
    let sinks = ws.write(
        "sinks.csv",
        &format!("{SINK_HEADER}1,Log,print(x),README.md,1,1,f,Docs,mentions\n"),
    )?;
    let vulns = ws.write(
        "vulns.csv",
        &format!("{VULN_HEADER}README.md,token,1,LOW,https://r,ignore\n"),
    )?;

    pipeline::run_sinks(&sinks, &ws.tree, &config)?;
    pipeline::run_vulnerabilities(&vulns, &ws.tree, &config)?;

    let tree = store::load_tree(&ws.tree)?;
    let readme = tree.find("README.md").ok_or_else(|| anyhow::anyhow!("missing leaf"))?;
    assert_eq!(readme.sink_details.len(), 1);
    assert_eq!(readme.vulnerabilities.len(), 1);
    Ok(())
}

#[test]
fn test_missing_csv_aborts_without_write() -> Result<()> {
    let config = Config::new();
    let ws = Workspace::new(&config)?;
    let before = fs::read_to_string(&ws.tree)?;

    let result = pipeline::run_sinks(&ws.dir.path().join("absent.csv"), &ws.tree, &config);
    assert!(result.is_err());
    assert_eq!(fs::read_to_string(&ws.tree)?, before);
    Ok(())
}

#[test]
fn test_malformed_row_aborts_before_mutation() -> Result<()> {
    let config = Config::new();
    let ws = Workspace::new(&config)?;
    let before = fs::read_to_string(&ws.tree)?;
    let csv = ws.write(
        "vulns.csv",
        &format!("{VULN_HEADER}src/app.py,x,1,LOW,https://r,fix\nsrc/app.py,short\n"),
    )?;

    let err = pipeline::run_vulnerabilities(&csv, &ws.tree, &config).unwrap_err();
    assert!(matches!(err, RepotreeError::Csv { .. }));
    assert_eq!(fs::read_to_string(&ws.tree)?, before);
    Ok(())
}

#[test]
fn test_invalid_tree_json_aborts() -> Result<()> {
    let ws = Workspace::new(&Config::new())?;
    fs::write(&ws.tree, "{ not json")?;
    let csv = ws.write("sinks.csv", SINK_HEADER)?;

    let err = pipeline::run_sinks(&csv, &ws.tree, &Config::new()).unwrap_err();
    assert!(err.is_invalid_input());
    assert_eq!(fs::read_to_string(&ws.tree)?, "{ not json");
    Ok(())
}
