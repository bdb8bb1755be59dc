use std::path::Path;

use clap::Parser;
use junit_full_reporter::cli::commands::cmd_report;
use junit_full_reporter::cli::config::{
    AppConfig, Cli, Commands, resolve_log_level, try_load_config,
};
use junit_full_reporter::cli::logging::init_logging;
use log::warn;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    // logging depends on the config, so a bad config is reported afterwards
    let (config, config_error) = match try_load_config(cli.config.as_deref()) {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    init_logging(
        resolve_log_level(cli.verbose, &config),
        config.logging.file.as_deref().map(Path::new),
    )?;

    if let Some(e) = config_error {
        warn!("{}; using defaults", e);
    }

    match cli.command {
        Commands::Report {
            trace,
            export,
            stdout,
        } => {
            cmd_report(&trace, export.as_deref(), stdout, &config)?;
        }
    }

    Ok(())
}
