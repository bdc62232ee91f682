use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "repotree",
    version,
    about = "Repository-map tree builder and finding merger"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
    /// Configuration file (defaults to ./repotree.toml when present)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
    /// Enable debug logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the tree from a repository-map dump
    Build {
        #[arg(long, value_name = "FILE")]
        dump: Option<PathBuf>,
        #[arg(long, value_name = "FILE")]
        tree: Option<PathBuf>,
    },
    /// Merge data-sink findings into the tree
    Sinks {
        #[arg(long, value_name = "FILE")]
        csv: Option<PathBuf>,
        #[arg(long, value_name = "FILE")]
        tree: Option<PathBuf>,
        /// Exit non-zero when any row matched no file
        #[arg(long)]
        strict: bool,
    },
    /// Merge vulnerability findings into the tree
    Vulns {
        #[arg(long, value_name = "FILE")]
        csv: Option<PathBuf>,
        #[arg(long, value_name = "FILE")]
        tree: Option<PathBuf>,
        /// Exit non-zero when any row matched no file
        #[arg(long)]
        strict: bool,
    },
    /// Write a per-file CSV report from the tree
    Export {
        #[arg(long, value_name = "FILE")]
        tree: Option<PathBuf>,
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Run build, sinks, vulns and export in order
    Run {
        #[arg(long, value_name = "FILE")]
        dump: Option<PathBuf>,
        #[arg(long, value_name = "FILE")]
        tree: Option<PathBuf>,
        #[arg(long, value_name = "FILE")]
        sinks: Option<PathBuf>,
        #[arg(long, value_name = "FILE")]
        vulns: Option<PathBuf>,
        #[arg(long, value_name = "FILE")]
        export: Option<PathBuf>,
        #[arg(long)]
        strict: bool,
    },
    /// List leaves with their finding counts
    Show {
        #[arg(long, value_name = "FILE")]
        tree: Option<PathBuf>,
    },
}
