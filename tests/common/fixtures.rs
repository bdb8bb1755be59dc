use chrono::{NaiveDate, NaiveDateTime};
use junit_full_reporter::trace::trace_model::{Execution, RunSummary};
use serde_json::{Value, json};

/// Fixed report start: 2024-01-01T10:00:00.000
pub fn start() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_milli_opt(10, 0, 0, 0)
        .unwrap()
}

pub fn summary(value: Value) -> RunSummary {
    serde_json::from_value(value).unwrap()
}

pub fn execution(value: Value) -> Execution {
    serde_json::from_value(value).unwrap()
}

/// Collection "Store API" with:
/// - Ping (root level)
/// - Users / Create
/// - Users / Admin / Delete
pub fn store_collection() -> Value {
    json!({
        "id": "col-1",
        "name": "Store API",
        "item": [
            { "id": "ping", "name": "Ping", "request": {} },
            {
                "id": "users",
                "name": "Users",
                "item": [
                    { "id": "create", "name": "Create" },
                    {
                        "id": "admin",
                        "name": "Admin",
                        "item": [ { "id": "delete", "name": "Delete" } ]
                    }
                ]
            }
        ]
    })
}

pub fn passing_assertion(name: &str) -> Value {
    json!({ "assertion": name })
}

pub fn failing_assertion(name: &str, message: &str) -> Value {
    json!({
        "assertion": name,
        "error": {
            "name": "AssertionError",
            "message": message,
            "stack": format!("AssertionError: {}\n    at Object.eval test.js:1:1", message)
        }
    })
}

/// One execution of item `id` with the given response time and assertions.
pub fn execution_json(id: &str, position: u64, response_ms: u64, assertions: Vec<Value>) -> Value {
    json!({
        "item": { "id": id },
        "cursor": { "iteration": 0, "position": position, "length": 3 },
        "request": { "url": { "protocol": "https", "host": ["api", "example", "com"] } },
        "response": { "responseTime": response_ms },
        "assertions": assertions,
        "prerequestScript": [],
        "testScript": [ {} ]
    })
}

/// Three executions over the store collection; the second has a failure.
pub fn store_summary() -> RunSummary {
    summary(json!({
        "collection": store_collection(),
        "environment": { "values": [ { "key": "baseUrl", "value": "https://api.example.com" } ] },
        "globals": { "values": [ { "key": "token", "value": "abc" } ] },
        "run": {
            "stats": { "tests": { "total": 4, "failed": 1 } },
            "executions": [
                execution_json("ping", 0, 250, vec![passing_assertion("Status is 200")]),
                execution_json("create", 1, 1000, vec![
                    passing_assertion("Status is 201"),
                    failing_assertion("Has id", "expected undefined to exist"),
                ]),
                execution_json("delete", 2, 125, vec![passing_assertion("Status is 204")]),
            ]
        }
    }))
}
