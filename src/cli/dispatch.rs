//! Command dispatch logic extracted from binary to reduce main function size.

use super::args::Commands;
use super::handlers;
use crate::config::Config;
use crate::exit::RepotreeExit;
use anyhow::Result;
use std::path::{Path, PathBuf};

/// Executes the parsed command.
///
/// # Errors
/// Returns error if the command handler fails.
pub fn execute(command: Commands, config: &Config) -> Result<RepotreeExit> {
    let paths = &config.paths;
    match command {
        Commands::Build { dump, tree } => handlers::handle_build(
            pick(dump.as_deref(), &paths.dump),
            pick(tree.as_deref(), &paths.tree),
            config,
        ),
        Commands::Sinks { csv, tree, strict } => handlers::handle_sinks(
            pick(csv.as_deref(), &paths.sinks_csv),
            pick(tree.as_deref(), &paths.tree),
            strict,
            config,
        ),
        Commands::Vulns { csv, tree, strict } => handlers::handle_vulns(
            pick(csv.as_deref(), &paths.vulnerabilities_csv),
            pick(tree.as_deref(), &paths.tree),
            strict,
            config,
        ),
        Commands::Export { tree, out } => handlers::handle_export(
            pick(tree.as_deref(), &paths.tree),
            pick(out.as_deref(), &paths.export_csv),
        ),
        Commands::Run {
            dump,
            tree,
            sinks,
            vulns,
            export,
            strict,
        } => handle_run(RunArgs { dump, tree, sinks, vulns, export }, strict, config),
        Commands::Show { tree } => handlers::handle_show(pick(tree.as_deref(), &paths.tree)),
    }
}

struct RunArgs {
    dump: Option<PathBuf>,
    tree: Option<PathBuf>,
    sinks: Option<PathBuf>,
    vulns: Option<PathBuf>,
    export: Option<PathBuf>,
}

fn handle_run(args: RunArgs, strict: bool, config: &Config) -> Result<RepotreeExit> {
    let paths = &config.paths;
    let plan = crate::pipeline::RunPlan {
        dump: pick(args.dump.as_deref(), &paths.dump),
        tree: pick(args.tree.as_deref(), &paths.tree),
        sinks: args.sinks.as_deref(),
        vulnerabilities: args.vulns.as_deref(),
        export: args.export.as_deref(),
    };
    handlers::handle_run(&plan, strict, config)
}

fn pick<'a>(flag: Option<&'a Path>, default: &'a Path) -> &'a Path {
    flag.unwrap_or(default)
}
