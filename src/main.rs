use anyhow::Result;
use clap::Parser;

mod cli;
mod config;
mod consolidate;
mod helpers;
mod util;
mod workflow;

fn main() -> Result<()> {
    let args = cli::RootArgs::parse();
    init_logging(args.verbose);
    workflow::run(args)
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}
