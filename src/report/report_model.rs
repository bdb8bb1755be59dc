// ============================================================================
// Report tree — document → suite → case → failure/error, suite → property
// ============================================================================

pub const REPORT_VERSION: &str = "1.0";
pub const REPORT_ENCODING: &str = "UTF-8";

/// Root `<testsuites>` node. Built once per run and never mutated after
/// it is handed to the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportDocument {
    pub version: String,
    pub encoding: String,

    /// Collection name
    pub name: Option<String>,

    /// Total assertion count across the run
    pub tests: Option<u64>,

    /// Sum of all suite times, in seconds
    pub time: f64,

    pub suites: Vec<SuiteNode>,
}

impl ReportDocument {
    pub fn new(name: Option<String>, tests: Option<u64>) -> Self {
        Self {
            version: REPORT_VERSION.to_string(),
            encoding: REPORT_ENCODING.to_string(),
            name,
            tests,
            time: 0.0,
            suites: Vec::new(),
        }
    }

    pub fn push_suite(&mut self, suite: SuiteNode) {
        self.time += suite.time;
        self.suites.push(suite);
    }

    pub fn total_failures(&self) -> usize {
        self.suites.iter().map(|s| s.failures).sum()
    }

    pub fn total_errors(&self) -> usize {
        self.suites.iter().map(|s| s.errors).sum()
    }
}

/// One `<testsuite>`, aggregated from a single execution.
#[derive(Debug, Clone, PartialEq)]
pub struct SuiteNode {
    pub id: u64,
    pub hostname: String,

    /// Path of the item's parent groups (empty at collection root)
    pub package: String,

    pub name: String,
    pub tests: usize,
    pub failures: usize,
    pub errors: usize,

    /// Local start time, `YYYY-MM-DDTHH:mm:ss.SSS`
    pub timestamp: String,

    /// Response time in seconds
    pub time: f64,

    pub properties: Vec<Property>,
    pub cases: Vec<CaseNode>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    pub name: String,
    pub value: String,
}

impl Property {
    pub fn new(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
        }
    }
}

/// One `<testcase>`: an assertion or a script slot.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseNode {
    pub classname: String,
    pub name: String,
    pub time: f64,
    pub issue: Option<CaseIssue>,
}

/// Which child element a failing case carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueKind {
    /// `<failure>`: an assertion did not hold
    Failure,
    /// `<error>`: a script or the request itself broke
    Error,
}

impl IssueKind {
    pub fn element(self) -> &'static str {
        match self {
            IssueKind::Failure => "failure",
            IssueKind::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseIssue {
    pub kind: IssueKind,
    pub type_name: String,
    pub message: String,

    /// Stack trace(s), rendered as CDATA
    pub body: String,
}
