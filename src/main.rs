use clap::Parser;
use routewerk::cli::{run_cli, Cli};
use routewerk::logging::{init_logging, LogConfig};
use std::process::ExitCode;

fn main() -> anyhow::Result<ExitCode> {
    init_logging(&LogConfig::from_env())?;
    let cli = Cli::parse();
    let matched = run_cli(&cli, &mut std::io::stdout().lock())?;
    Ok(if matched {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
