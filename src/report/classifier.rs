use crate::report::report_model::{CaseIssue, IssueKind};
use crate::trace::trace_model::{ErrorDetail, Execution, ScriptResult};

// ============================================================================
// Execution classifier — pass / failure / error per sub-result
// ============================================================================

/// Case name of the synthetic pre-request script slot.
pub const PREREQUEST_SLOT: &str = "Pre-request Script";

/// Case name of the synthetic test script slot.
pub const TEST_SLOT: &str = "Tests";

const ASSERTION_FAILURE_TYPE: &str = "AssertionFailure";
const SCRIPT_ERROR_TYPE: &str = "ScriptError";
const REQUEST_ERROR_TYPE: &str = "RequestError";
const STACK_SEPARATOR: &str = "\n---\n";

/// Where a classified case came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseSource {
    Assertion,
    ScriptSlot,
}

/// A case before it is placed into a suite.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedCase {
    pub name: String,
    pub source: CaseSource,
    pub issue: Option<CaseIssue>,
}

impl ClassifiedCase {
    pub fn passed(&self) -> bool {
        self.issue.is_none()
    }
}

/// Counters and cases for one execution.
///
/// `failures` counts failed assertions only; `errors` counts the request
/// error and errored script results only. The two never overlap. A request
/// error is reported inside the pre-request slot case.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Classification {
    pub errors: usize,
    pub failures: usize,
    pub cases: Vec<ClassifiedCase>,
}

/// Run-level details quoted at the top of every failure and error body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CaseContext<'a> {
    pub collection_id: &'a str,
    pub collection_name: &'a str,

    /// Full path of the request, parents first
    pub request_name: &'a str,
}

impl CaseContext<'_> {
    fn header(&self, iteration: u64) -> String {
        format!(
            "Collection JSON ID: {}\nCollection name: {}\nRequest name: {}\nIteration: {}\n",
            self.collection_id, self.collection_name, self.request_name, iteration
        )
    }
}

/// Classify every sub-result of `execution`, with bare detail bodies.
///
/// Cases come out as: pre-request slot, each assertion in order, test slot.
pub fn classify(execution: &Execution) -> Classification {
    classify_inner(execution, None)
}

/// Same as [`classify`], but every body opens with `context` lines and the
/// iteration the execution ran in.
pub fn classify_in(execution: &Execution, context: &CaseContext<'_>) -> Classification {
    classify_inner(execution, Some(context.header(execution.cursor.iteration)))
}

fn classify_inner(execution: &Execution, header: Option<String>) -> Classification {
    let mut classification = Classification::default();
    let header = header.as_deref();

    let request_error = execution.request_error.as_ref();
    if request_error.is_some() {
        classification.errors += 1;
    }

    // the request error has no case of its own and is reported in this slot
    let prerequest = script_slot(
        PREREQUEST_SLOT,
        request_error,
        &execution.prerequest_script,
        header,
    );
    classification.errors += prerequest.1;
    classification.cases.push(prerequest.0);

    for assertion in execution.assertions.iter().flatten() {
        let issue = assertion
            .error
            .as_ref()
            .map(|error| assertion_failure(&assertion.assertion, error, header));
        if issue.is_some() {
            classification.failures += 1;
        }
        classification.cases.push(ClassifiedCase {
            name: assertion.assertion.clone(),
            source: CaseSource::Assertion,
            issue,
        });
    }

    let tests = script_slot(TEST_SLOT, None, &execution.test_script, header);
    classification.errors += tests.1;
    classification.cases.push(tests.0);

    classification
}

fn assertion_failure(description: &str, error: &ErrorDetail, header: Option<&str>) -> CaseIssue {
    let body = match header {
        Some(header) => format!(
            "{}Test description: {}\nError message: {}\n\n{}",
            header,
            description,
            error.message(),
            body_of(error)
        ),
        None => body_of(error),
    };

    CaseIssue {
        kind: IssueKind::Failure,
        type_name: type_name(error, ASSERTION_FAILURE_TYPE),
        message: error.message().to_string(),
        body,
    }
}

/// Build a slot case and count the errored script results feeding it.
///
/// A `request_error` leads the body but is not part of the returned count.
fn script_slot(
    name: &str,
    request_error: Option<&ErrorDetail>,
    results: &[ScriptResult],
    header: Option<&str>,
) -> (ClassifiedCase, usize) {
    let errored: Vec<&ErrorDetail> = results.iter().filter_map(|r| r.error.as_ref()).collect();

    let mut details: Vec<String> = Vec::with_capacity(errored.len() + 1);
    if let Some(error) = request_error {
        details.push(format!("{}: {}", REQUEST_ERROR_TYPE, body_of(error)));
    }
    details.extend(errored.iter().map(|e| body_of(e)));

    let first = request_error
        .map(|e| (e, REQUEST_ERROR_TYPE))
        .or_else(|| errored.first().map(|e| (*e, SCRIPT_ERROR_TYPE)));

    let issue = first.map(|(first, fallback)| {
        let detail = details.join(STACK_SEPARATOR);
        CaseIssue {
            kind: IssueKind::Error,
            type_name: type_name(first, fallback),
            message: first.message().to_string(),
            body: match header {
                Some(header) => format!("{}\n{}", header, detail),
                None => detail,
            },
        }
    });

    let case = ClassifiedCase {
        name: name.to_string(),
        source: CaseSource::ScriptSlot,
        issue,
    };
    (case, errored.len())
}

fn type_name(error: &ErrorDetail, fallback: &str) -> String {
    match error.name.as_deref() {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => fallback.to_string(),
    }
}

fn body_of(error: &ErrorDetail) -> String {
    error.trace().unwrap_or(error.message()).to_string()
}
