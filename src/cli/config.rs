use std::path::PathBuf;

use clap::{Parser, Subcommand};
use log::{LevelFilter, warn};
use serde::{Deserialize, Serialize};

use crate::error::ReportError;
use crate::report::reporter::ReporterOptions;

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "junit-full-reporter.yaml";

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "junit-full-reporter",
    version,
    about = "Turn a finished collection run into a JUnit XML report"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config file (default: junit-full-reporter.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the JUnit report from a run summary JSON file
    Report {
        /// Path to the run summary (trace) JSON file
        #[arg(long)]
        trace: String,

        /// Output file path (default: newman-run-report-full.xml)
        #[arg(short, long)]
        export: Option<String>,

        /// Print the report to stdout instead of writing a file
        #[arg(long, default_value_t = false)]
        stdout: bool,
    },
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `junit-full-reporter.yaml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub reporter: ReporterConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReporterConfig {
    /// Output path override
    pub export: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// off, error, warn, info, debug or trace
    pub level: Option<String>,

    /// Also append log lines to this file
    pub file: Option<String>,
}

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file. A missing or blank file gives defaults;
/// one that can't be read or parsed is an error.
pub fn try_load_config(path: Option<&str>) -> Result<AppConfig, ReportError> {
    let config_path = PathBuf::from(path.unwrap_or(DEFAULT_CONFIG_FILE));
    let content = match std::fs::read_to_string(&config_path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(AppConfig::default()),
        Err(source) => {
            return Err(ReportError::ConfigRead {
                path: config_path,
                source,
            });
        }
    };
    if content.trim().is_empty() {
        return Ok(AppConfig::default());
    }
    serde_yaml::from_str(&content).map_err(|source| ReportError::ConfigParse {
        path: config_path,
        source,
    })
}

/// Load config from a YAML file. Returns defaults if file is missing or malformed.
pub fn load_config(path: Option<&str>) -> AppConfig {
    try_load_config(path).unwrap_or_else(|e| {
        warn!("{}; using defaults", e);
        AppConfig::default()
    })
}

// ============================================================================
// Config Builders (merge CLI args with config file)
// ============================================================================

/// Reporter options: CLI `--export` wins over the config file.
pub fn build_reporter_options(export: Option<&str>, config: &AppConfig) -> ReporterOptions {
    ReporterOptions {
        export: export
            .or(config.reporter.export.as_deref())
            .filter(|p| !p.is_empty())
            .map(PathBuf::from),
    }
}

/// Log level: config file `logging.level` wins over `-v` count.
pub fn resolve_log_level(verbose: u8, config: &AppConfig) -> LevelFilter {
    if let Some(level) = config
        .logging
        .level
        .as_deref()
        .and_then(|l| l.parse::<LevelFilter>().ok())
    {
        return level;
    }
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}
