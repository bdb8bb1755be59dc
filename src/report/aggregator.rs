use crate::collection::collection_model::CollectionTree;
use crate::collection::name_resolver::{DEFAULT_SEPARATOR, resolve};
use crate::report::classifier::{CaseContext, CaseSource, Classification, classify_in};
use crate::report::report_model::{CaseNode, Property, SuiteNode};
use crate::trace::trace_model::{Cursor, Execution, Request};

const DEFAULT_PROTOCOL: &str = "https";
const DEFAULT_HOST: &str = "localhost";

// ============================================================================
// Suite aggregator — one execution into one suite
// ============================================================================

/// Fold `execution` into a suite.
///
/// `timestamp` comes from the run's sequencer and `properties` is the
/// run-wide merged variable list.
pub fn aggregate(
    execution: &Execution,
    tree: &CollectionTree,
    properties: &[Property],
    timestamp: String,
) -> SuiteNode {
    let (package, name) = suite_names(execution, tree);
    let classname = classname(&package, &name);

    let root = tree.node(tree.root());
    let context = CaseContext {
        collection_id: root.map_or("", |r| r.id.as_str()),
        collection_name: root.and_then(|r| r.name.as_deref()).unwrap_or_default(),
        request_name: &classname,
    };
    let Classification {
        errors,
        failures,
        cases,
    } = classify_in(execution, &context);

    let time = suite_time(execution);
    let tests = execution.assertion_count();
    let per_case = case_time(time, tests);

    let cases = cases
        .into_iter()
        .map(|case| CaseNode {
            classname: classname.clone(),
            time: match case.source {
                CaseSource::Assertion => per_case,
                CaseSource::ScriptSlot => 0.0,
            },
            name: case.name,
            issue: case.issue,
        })
        .collect();

    SuiteNode {
        id: suite_id(&execution.cursor),
        hostname: hostname(execution.request.as_ref()),
        package,
        name,
        tests,
        failures,
        errors,
        timestamp,
        time,
        properties: properties.to_vec(),
        cases,
    }
}

/// `iteration * length + position`; stable for a given trace.
pub fn suite_id(cursor: &Cursor) -> u64 {
    cursor
        .iteration
        .saturating_mul(cursor.length)
        .saturating_add(cursor.position)
}

/// `protocol://host.segments`, defaulting to `https` and `localhost`.
pub fn hostname(request: Option<&Request>) -> String {
    let url = request.map(|r| &r.url);
    let protocol = url
        .and_then(|u| u.protocol.as_deref())
        .map(|p| p.trim_end_matches(':'))
        .filter(|p| !p.is_empty())
        .unwrap_or(DEFAULT_PROTOCOL);
    let host = url
        .and_then(|u| u.host.as_ref())
        .map(|h| h.segments().join("."))
        .filter(|h| !h.is_empty())
        .unwrap_or_else(|| DEFAULT_HOST.to_string());

    format!("{}://{}", protocol, host)
}

/// Response time in seconds, 0 when the response or its timing is missing.
pub fn suite_time(execution: &Execution) -> f64 {
    execution.elapsed_ms().map_or(0.0, |ms| ms / 1000.0)
}

/// Even split of the suite time over its assertions.
///
/// The runner does not time assertions individually, so this is an
/// approximation, not a measurement.
pub fn case_time(suite_time: f64, assertions: usize) -> f64 {
    if assertions == 0 {
        0.0
    } else {
        suite_time / assertions as f64
    }
}

/// Package and name joined by the path separator, skipping empty sides.
pub fn classname(package: &str, name: &str) -> String {
    [package, name]
        .iter()
        .filter(|s| !s.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(DEFAULT_SEPARATOR)
}

/// `(package, name)` for the execution's item.
///
/// The package is the resolved path of the item's parent; an item that is
/// not part of the collection tree gets an empty package.
fn suite_names(execution: &Execution, tree: &CollectionTree) -> (String, String) {
    let found = tree.find_item(execution.item.id.as_deref(), execution.item.name.as_deref());

    match found.and_then(|id| tree.node(id)) {
        Some(node) => {
            let package = resolve(tree, node.parent, DEFAULT_SEPARATOR).unwrap_or_default();
            (package, node.name_or_id().to_string())
        }
        None => (
            String::new(),
            execution.item.name_or_id().unwrap_or_default().to_string(),
        ),
    }
}
