use std::process::ExitCode;

use apigen::cli::{run_cli, Cli};
use apigen::logging::{init_logging, LogConfig};
use clap::Parser;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_config = LogConfig::from_env().with_debug(cli.debug);
    if let Err(e) = init_logging(&log_config) {
        eprintln!("Warning: {e:#}");
    }

    match run_cli(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
