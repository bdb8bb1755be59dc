use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use log::{debug, info};

use crate::error::ReportError;
use crate::report::builder::DocumentBuilder;
use crate::report::junit::generate_junit_xml;
use crate::trace::trace_model::RunSummary;

/// Logical name of the artifact this reporter produces.
pub const ARTIFACT_NAME: &str = "junit-reporter-full";

/// File the artifact is written to when no export path is configured.
pub const DEFAULT_FILENAME: &str = "newman-run-report-full.xml";

/// Reporter options. `export` overrides the output path.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReporterOptions {
    pub export: Option<PathBuf>,
}

/// A rendered report waiting to be persisted by the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportArtifact {
    pub name: String,
    pub default: String,
    pub path: Option<PathBuf>,
    pub content: String,
}

impl ExportArtifact {
    /// The override path if one was given, otherwise the default filename.
    pub fn target_path(&self) -> &Path {
        self.path
            .as_deref()
            .unwrap_or_else(|| Path::new(&self.default))
    }

    /// Write the content to [`Self::target_path`], creating parent directories.
    pub fn write(&self) -> Result<PathBuf, ReportError> {
        let path = self.target_path().to_path_buf();
        let wrap = |source: std::io::Error| ReportError::ArtifactWrite {
            path: path.clone(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(wrap)?;
        }
        std::fs::write(&path, &self.content).map_err(wrap)?;
        Ok(path)
    }
}

/// Turns a finished run into a JUnit XML export.
#[derive(Debug, Clone, Default)]
pub struct JunitFullReporter {
    options: ReporterOptions,
}

impl JunitFullReporter {
    pub fn new(options: ReporterOptions) -> Self {
        Self { options }
    }

    /// End-of-run hook. Appends one artifact to `exports`, or nothing when
    /// the trace holds no executions.
    pub fn on_done(&self, summary: &RunSummary, exports: &mut Vec<ExportArtifact>) {
        self.export(DocumentBuilder::new(summary), exports);
    }

    /// Same as [`Self::on_done`] with suite timestamps starting at `start`.
    pub fn on_done_at(
        &self,
        summary: &RunSummary,
        start: NaiveDateTime,
        exports: &mut Vec<ExportArtifact>,
    ) {
        self.export(DocumentBuilder::starting_at(summary, start), exports);
    }

    fn export(&self, builder: DocumentBuilder<'_>, exports: &mut Vec<ExportArtifact>) {
        let document = match builder.build() {
            Some(document) => document,
            None => {
                info!("Trace is empty, skipping {}", ARTIFACT_NAME);
                return;
            }
        };

        let content = generate_junit_xml(&document);
        debug!("Rendered {} bytes of JUnit XML", content.len());

        exports.push(ExportArtifact {
            name: ARTIFACT_NAME.to_string(),
            default: DEFAULT_FILENAME.to_string(),
            path: self.options.export.clone(),
            content,
        });
    }
}
