use crate::report::report_model::{CaseIssue, CaseNode, ReportDocument, SuiteNode};

// ============================================================================
// JUnit XML renderer — standard CI integration format
// ============================================================================

const INDENT: &str = "  ";
const NEWLINE: &str = "\n";

/// Render the report as JUnit XML.
///
/// Produces:
/// ```xml
/// <?xml version="1.0" encoding="UTF-8"?>
/// <testsuites version="1.0" encoding="UTF-8" name="My API" tests="2" time="0.250">
///   <testsuite id="0" hostname="https://example.com" package="Users" name="Create" ...>
///     <properties>
///       <property name="baseUrl" value="https://example.com"/>
///     </properties>
///     <testcase classname="Users / Create" name="Status is 201" time="0.125"/>
///     <testcase classname="Users / Create" name="Has id" time="0.125">
///       <failure type="AssertionError" message="expected undefined to exist"><![CDATA[...]]></failure>
///     </testcase>
///   </testsuite>
/// </testsuites>
/// ```
///
/// Attribute order is fixed. Elements without children self-close, and
/// stack traces go into CDATA so multi-line content survives intact.
pub fn generate_junit_xml(document: &ReportDocument) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "<?xml version=\"{}\" encoding=\"{}\"?>{}",
        escape_xml(&document.version),
        escape_xml(&document.encoding),
        NEWLINE
    ));

    let mut attrs = vec![
        ("version", document.version.clone()),
        ("encoding", document.encoding.clone()),
    ];
    if let Some(name) = &document.name {
        attrs.push(("name", name.clone()));
    }
    if let Some(tests) = document.tests {
        attrs.push(("tests", tests.to_string()));
    }
    attrs.push(("time", seconds(document.time)));

    if document.suites.is_empty() {
        push_empty(&mut out, 0, "testsuites", &attrs);
        return out;
    }

    push_open(&mut out, 0, "testsuites", &attrs);
    for suite in &document.suites {
        write_suite(&mut out, 1, suite);
    }
    push_close(&mut out, 0, "testsuites");

    out
}

fn write_suite(out: &mut String, depth: usize, suite: &SuiteNode) {
    let attrs = [
        ("id", suite.id.to_string()),
        ("hostname", suite.hostname.clone()),
        ("package", suite.package.clone()),
        ("name", suite.name.clone()),
        ("tests", suite.tests.to_string()),
        ("failures", suite.failures.to_string()),
        ("errors", suite.errors.to_string()),
        ("timestamp", suite.timestamp.clone()),
        ("time", seconds(suite.time)),
    ];

    if suite.properties.is_empty() && suite.cases.is_empty() {
        push_empty(out, depth, "testsuite", &attrs);
        return;
    }

    push_open(out, depth, "testsuite", &attrs);

    if !suite.properties.is_empty() {
        push_open(out, depth + 1, "properties", &[]);
        for property in &suite.properties {
            push_empty(
                out,
                depth + 2,
                "property",
                &[
                    ("name", property.name.clone()),
                    ("value", property.value.clone()),
                ],
            );
        }
        push_close(out, depth + 1, "properties");
    }

    for case in &suite.cases {
        write_case(out, depth + 1, case);
    }

    push_close(out, depth, "testsuite");
}

fn write_case(out: &mut String, depth: usize, case: &CaseNode) {
    let attrs = [
        ("classname", case.classname.clone()),
        ("name", case.name.clone()),
        ("time", seconds(case.time)),
    ];

    match &case.issue {
        None => push_empty(out, depth, "testcase", &attrs),
        Some(issue) => {
            push_open(out, depth, "testcase", &attrs);
            write_issue(out, depth + 1, issue);
            push_close(out, depth, "testcase");
        }
    }
}

fn write_issue(out: &mut String, depth: usize, issue: &CaseIssue) {
    let element = issue.kind.element();
    out.push_str(&INDENT.repeat(depth));
    out.push('<');
    out.push_str(element);
    push_attrs(
        out,
        &[
            ("type", issue.type_name.clone()),
            ("message", issue.message.clone()),
        ],
    );
    out.push('>');
    out.push_str(&cdata(&issue.body));
    out.push_str(&format!("</{}>{}", element, NEWLINE));
}

fn push_open(out: &mut String, depth: usize, name: &str, attrs: &[(&str, String)]) {
    out.push_str(&INDENT.repeat(depth));
    out.push('<');
    out.push_str(name);
    push_attrs(out, attrs);
    out.push('>');
    out.push_str(NEWLINE);
}

fn push_empty(out: &mut String, depth: usize, name: &str, attrs: &[(&str, String)]) {
    out.push_str(&INDENT.repeat(depth));
    out.push('<');
    out.push_str(name);
    push_attrs(out, attrs);
    out.push_str("/>");
    out.push_str(NEWLINE);
}

fn push_close(out: &mut String, depth: usize, name: &str) {
    out.push_str(&format!("{}</{}>{}", INDENT.repeat(depth), name, NEWLINE));
}

fn push_attrs(out: &mut String, attrs: &[(&str, String)]) {
    for (key, value) in attrs {
        out.push_str(&format!(" {}=\"{}\"", key, escape_xml(value)));
    }
}

/// Seconds with millisecond precision.
fn seconds(value: f64) -> String {
    format!("{:.3}", value)
}

/// Wrap text in a CDATA section, splitting any `]]>` it contains.
pub fn cdata(s: &str) -> String {
    format!("<![CDATA[{}]]>", s.replace("]]>", "]]]]><![CDATA[>"))
}

/// Escape XML special characters for attribute values.
///
/// Line breaks and tabs become character references so attribute
/// normalization does not fold them into spaces.
pub fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
        .replace('\n', "&#10;")
        .replace('\r', "&#13;")
        .replace('\t', "&#9;")
}
