use clap::Parser;
use kvolt_router::cli::{run_cli, Cli, Outcome};
use kvolt_router::otel::{init_logging_with_config, LogConfig};
use std::process::ExitCode;

fn main() -> anyhow::Result<ExitCode> {
    let mut log_config = LogConfig::from_env();
    // Warnings only unless a level is requested
    if std::env::var("KVOLT_LOG_LEVEL").is_err() {
        log_config.log_level = "warn".to_string();
    }
    log_config.async_logging = false;
    init_logging_with_config(&log_config)?;

    let cli = Cli::parse();
    match run_cli(cli)? {
        Outcome::Success => Ok(ExitCode::SUCCESS),
        Outcome::NoMatch => Ok(ExitCode::from(1)),
    }
}
