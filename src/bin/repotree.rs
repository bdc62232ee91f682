use clap::Parser;
use colored::Colorize;
use repotree_core::cli::{self, Cli};
use repotree_core::config::Config;
use repotree_core::exit::RepotreeExit;
use tracing_subscriber::EnvFilter;

fn main() -> RepotreeExit {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let Some(cmd) = cli.command else {
        use clap::CommandFactory;
        let _ = Cli::command().print_help();
        return RepotreeExit::Success;
    };

    let result = match cli.config.as_deref() {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .map_err(anyhow::Error::from)
    .and_then(|config| cli::dispatch::execute(cmd, &config));

    match result {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red(), e);
            RepotreeExit::from_error(&e)
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
