use clap::Parser;
use std::process::ExitCode;
use viewrouter::cli::{run_cli, Cli};
use viewrouter::logging::init_logging;

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(&cli.log_level)?;
    run_cli(cli)
}
