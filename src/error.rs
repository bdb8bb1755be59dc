use std::path::PathBuf;

use thiserror::Error;

/// Errors from the I/O edges: reading traces and config, writing reports.
///
/// Building the report itself cannot fail; missing trace data falls back
/// to defaults instead.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to read trace {path}: {source}")]
    TraceRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {context}: {source}")]
    TraceParse {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write report {path}: {source}")]
    ArtifactWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("failed to set up logging: {0}")]
    Logging(String),
}
