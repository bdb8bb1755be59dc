use serde::Deserialize;
use serde_json::Value;

use crate::collection::collection_model::CollectionDefinition;

// ============================================================================
// Run summary — the finalized trace handed over at end of run
// ============================================================================

/// Everything the collection runner knows once a run has finished.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct RunSummary {
    #[serde(default, deserialize_with = "crate::trace::lenient::deserialize")]
    pub collection: CollectionDefinition,

    #[serde(default, deserialize_with = "crate::trace::lenient::deserialize")]
    pub environment: VariableScope,

    #[serde(default, deserialize_with = "crate::trace::lenient::deserialize")]
    pub globals: VariableScope,

    #[serde(default, deserialize_with = "crate::trace::lenient::deserialize")]
    pub run: Run,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Run {
    #[serde(default, deserialize_with = "crate::trace::lenient::deserialize")]
    pub stats: RunStats,

    /// Executions in the order they ran; `None` when the runner recorded none
    #[serde(default, deserialize_with = "crate::trace::lenient::seq")]
    pub executions: Option<Vec<Execution>>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct RunStats {
    #[serde(default, deserialize_with = "crate::trace::lenient::deserialize")]
    pub tests: StatCounter,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct StatCounter {
    #[serde(default, deserialize_with = "crate::trace::lenient::deserialize")]
    pub total: Option<u64>,
}

impl RunSummary {
    /// Executions, or an empty slice when the trace is absent.
    pub fn executions(&self) -> &[Execution] {
        self.run.executions.as_deref().unwrap_or(&[])
    }
}

// ============================================================================
// Variable scopes
// ============================================================================

/// Ordered key/value pairs of one variable scope.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct VariableScope {
    #[serde(default, deserialize_with = "crate::trace::lenient::seq")]
    pub values: Option<Vec<Variable>>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Variable {
    pub key: String,

    #[serde(default)]
    pub value: Value,

    #[serde(default)]
    pub disabled: bool,
}

impl VariableScope {
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Self {
            values: Some(
                pairs
                    .into_iter()
                    .map(|(k, v)| Variable {
                        key: k.into(),
                        value: v.into(),
                        disabled: false,
                    })
                    .collect(),
            ),
        }
    }

    /// Enabled variables in declaration order.
    pub fn enabled(&self) -> impl Iterator<Item = &Variable> {
        self.values.iter().flatten().filter(|v| !v.disabled)
    }
}

impl Variable {
    /// Strings verbatim, nulls empty, anything else as JSON text.
    pub fn value_text(&self) -> String {
        match &self.value {
            Value::String(s) => s.clone(),
            Value::Null => String::new(),
            other => other.to_string(),
        }
    }
}

// ============================================================================
// Execution records
// ============================================================================

/// One request attempt and everything that ran around it.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Execution {
    #[serde(default, deserialize_with = "crate::trace::lenient::deserialize")]
    pub item: ItemRef,

    #[serde(default, deserialize_with = "crate::trace::lenient::deserialize")]
    pub cursor: Cursor,

    #[serde(default, deserialize_with = "crate::trace::lenient::deserialize")]
    pub request: Option<Request>,

    #[serde(default, deserialize_with = "crate::trace::lenient::deserialize")]
    pub response: Option<Response>,

    #[serde(default, deserialize_with = "crate::trace::lenient::seq")]
    pub assertions: Option<Vec<AssertionResult>>,

    #[serde(
        default,
        alias = "prerequestScriptResults",
        deserialize_with = "crate::trace::lenient::deserialize"
    )]
    pub prerequest_script: Vec<ScriptResult>,

    #[serde(
        default,
        alias = "testScriptResults",
        deserialize_with = "crate::trace::lenient::deserialize"
    )]
    pub test_script: Vec<ScriptResult>,

    #[serde(default, deserialize_with = "crate::trace::lenient::deserialize")]
    pub request_error: Option<ErrorDetail>,
}

impl Execution {
    /// Response time in milliseconds, if the runner recorded one.
    pub fn elapsed_ms(&self) -> Option<f64> {
        self.response
            .as_ref()
            .and_then(|r| r.response_time)
            .filter(|ms| ms.is_finite() && *ms >= 0.0)
    }

    pub fn assertion_count(&self) -> usize {
        self.assertions.as_ref().map_or(0, Vec::len)
    }
}

/// Reference from an execution to its collection item.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ItemRef {
    #[serde(default, deserialize_with = "crate::trace::lenient::deserialize")]
    pub id: Option<String>,

    #[serde(default, deserialize_with = "crate::trace::lenient::deserialize")]
    pub name: Option<String>,
}

impl ItemRef {
    pub fn name_or_id(&self) -> Option<&str> {
        self.name
            .as_deref()
            .filter(|s| !s.is_empty())
            .or(self.id.as_deref().filter(|s| !s.is_empty()))
    }
}

/// Position of an execution inside a (possibly repeated) run.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
pub struct Cursor {
    #[serde(default, deserialize_with = "crate::trace::lenient::deserialize")]
    pub iteration: u64,

    #[serde(default, deserialize_with = "crate::trace::lenient::deserialize")]
    pub position: u64,

    #[serde(default, deserialize_with = "crate::trace::lenient::deserialize")]
    pub length: u64,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Request {
    #[serde(default, deserialize_with = "crate::trace::lenient::deserialize")]
    pub url: Url,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Url {
    #[serde(default, deserialize_with = "crate::trace::lenient::deserialize")]
    pub protocol: Option<String>,

    #[serde(default, deserialize_with = "crate::trace::lenient::deserialize")]
    pub host: Option<Host>,
}

/// Host as either pre-split segments or a dotted string.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Host {
    Segments(Vec<String>),
    Dotted(String),
}

impl Host {
    pub fn segments(&self) -> Vec<&str> {
        match self {
            Host::Segments(parts) => parts.iter().map(String::as_str).collect(),
            Host::Dotted(host) => host.split('.').collect(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    #[serde(default, deserialize_with = "crate::trace::lenient::deserialize")]
    pub response_time: Option<f64>,
}

/// Outcome of a single named assertion.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct AssertionResult {
    #[serde(default, deserialize_with = "crate::trace::lenient::deserialize")]
    pub assertion: String,

    #[serde(default, deserialize_with = "crate::trace::lenient::deserialize")]
    pub error: Option<ErrorDetail>,
}

/// Outcome of one pre-request or test script run.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ScriptResult {
    #[serde(default, deserialize_with = "crate::trace::lenient::deserialize")]
    pub error: Option<ErrorDetail>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ErrorDetail {
    #[serde(default, deserialize_with = "crate::trace::lenient::deserialize")]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "crate::trace::lenient::deserialize")]
    pub message: Option<String>,

    #[serde(default, deserialize_with = "crate::trace::lenient::deserialize")]
    pub stack: Option<String>,

    #[serde(default, deserialize_with = "crate::trace::lenient::deserialize")]
    pub stacktrace: Option<String>,
}

impl ErrorDetail {
    pub fn new(name: &str, message: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            message: Some(message.to_string()),
            stack: None,
            stacktrace: None,
        }
    }

    pub fn with_stack(mut self, stack: &str) -> Self {
        self.stack = Some(stack.to_string());
        self
    }

    /// Stack trace under either of its wire names.
    pub fn trace(&self) -> Option<&str> {
        self.stack.as_deref().or(self.stacktrace.as_deref())
    }

    pub fn message(&self) -> &str {
        self.message.as_deref().unwrap_or_default()
    }
}
