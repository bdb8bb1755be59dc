//! JUnit XML reporting for finished collection runs.
//!
//! A run summary (the trace of every request execution) is reduced in a
//! single pass into a `<testsuites>` document: one suite per execution,
//! one case per assertion plus the pre-request and test script slots.
//!
//! ```no_run
//! use junit_full_reporter::report::reporter::{JunitFullReporter, ReporterOptions};
//! use junit_full_reporter::trace::loader::load_summary;
//!
//! let summary = load_summary("run.json".as_ref()).unwrap();
//! let mut exports = Vec::new();
//! JunitFullReporter::new(ReporterOptions::default()).on_done(&summary, &mut exports);
//! for artifact in &exports {
//!     artifact.write().unwrap();
//! }
//! ```

pub mod cli;
pub mod collection;
pub mod error;
pub mod report;
pub mod trace;
