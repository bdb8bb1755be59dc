use std::path::Path;

use log::{info, warn};

use crate::cli::config::{AppConfig, build_reporter_options};
use crate::error::ReportError;
use crate::report::reporter::{ExportArtifact, JunitFullReporter};
use crate::trace::loader::load_summary;

// ============================================================================
// report subcommand
// ============================================================================

/// Build the report for `trace_path` and persist it.
///
/// Returns the artifact that was produced, or `None` when the trace had no
/// executions and nothing was written.
pub fn cmd_report(
    trace_path: &str,
    export: Option<&str>,
    to_stdout: bool,
    config: &AppConfig,
) -> Result<Option<ExportArtifact>, ReportError> {
    let summary = load_summary(Path::new(trace_path))?;
    let options = build_reporter_options(export, config);

    let mut exports = Vec::new();
    JunitFullReporter::new(options).on_done(&summary, &mut exports);

    let artifact = match exports.pop() {
        Some(artifact) => artifact,
        None => {
            warn!("No executions found in {}, no report written", trace_path);
            return Ok(None);
        }
    };

    if to_stdout {
        print!("{}", artifact.content);
    } else {
        let path = artifact.write()?;
        info!("Wrote {} to {}", artifact.name, path.display());
    }

    Ok(Some(artifact))
}
