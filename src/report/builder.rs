use chrono::NaiveDateTime;
use log::{debug, info};

use crate::collection::collection_model::CollectionTree;
use crate::report::aggregator::aggregate;
use crate::report::properties::merge;
use crate::report::report_model::ReportDocument;
use crate::report::timestamp::TimestampSequencer;
use crate::trace::trace_model::RunSummary;

/// Assembles the report tree for one finished run.
///
/// Suites are appended in trace order, which is also the order the
/// timestamp cursor advances in.
pub struct DocumentBuilder<'a> {
    summary: &'a RunSummary,
    sequencer: TimestampSequencer,
}

impl<'a> DocumentBuilder<'a> {
    /// Timestamps start at the current local time.
    pub fn new(summary: &'a RunSummary) -> Self {
        Self {
            summary,
            sequencer: TimestampSequencer::starting_now(),
        }
    }

    /// Timestamps start at `start`.
    pub fn starting_at(summary: &'a RunSummary, start: NaiveDateTime) -> Self {
        Self {
            summary,
            sequencer: TimestampSequencer::new(start),
        }
    }

    /// Build the document, or `None` when the trace holds no executions.
    pub fn build(mut self) -> Option<ReportDocument> {
        let executions = self.summary.executions();
        if executions.is_empty() {
            debug!("No executions in trace, nothing to report");
            return None;
        }

        let tree = CollectionTree::from_definition(&self.summary.collection);
        let properties = merge(&self.summary.environment, &self.summary.globals);

        let assertion_total: u64 = executions.iter().map(|e| e.assertion_count() as u64).sum();
        let tests = self.summary.run.stats.tests.total.or(Some(assertion_total));
        let name = self
            .summary
            .collection
            .name
            .clone()
            .filter(|n| !n.is_empty());

        let mut document = ReportDocument::new(name, tests);
        for execution in executions {
            let timestamp = self.sequencer.stamp(execution.elapsed_ms().unwrap_or(0.0));
            document.push_suite(aggregate(execution, &tree, &properties, timestamp));
        }

        info!(
            "Built report with {} suites ({} failures, {} errors) in {:.3}s",
            document.suites.len(),
            document.total_failures(),
            document.total_errors(),
            document.time
        );
        Some(document)
    }
}
