use std::path::Path;

use log::debug;

use crate::error::ReportError;
use crate::trace::trace_model::RunSummary;

/// Parse a run summary from JSON text.
pub fn parse_summary(json: &str) -> Result<RunSummary, ReportError> {
    serde_json::from_str(json).map_err(|source| ReportError::TraceParse {
        context: "run summary".to_string(),
        source,
    })
}

/// Read and parse a run summary JSON file.
pub fn load_summary(path: &Path) -> Result<RunSummary, ReportError> {
    let content = std::fs::read_to_string(path).map_err(|source| ReportError::TraceRead {
        path: path.to_path_buf(),
        source,
    })?;
    let summary = parse_summary(&content)?;
    debug!(
        "Loaded trace '{}' with {} executions",
        path.display(),
        summary.executions().len()
    );
    Ok(summary)
}
