// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serde_json::json;

#[test]
fn read_serializes_as_bare_action() {
    let json = serde_json::to_value(Request::Read).unwrap();
    assert_eq!(json, json!({"action": "read"}));
}

#[test]
fn write_serializes_changes_object() {
    let request = Request::Write { changes: Changes::new().set("display", "dim_percent", 0.5) };
    let json = serde_json::to_value(request).unwrap();
    assert_eq!(json, json!({"action": "write", "changes": {"display": {"dim_percent": 0.5}}}));
}

#[test]
fn read_ignores_extra_fields() {
    let decoded: Request = serde_json::from_str(r#"{"action":"read","verbose":true}"#).unwrap();
    assert_eq!(decoded, Request::Read);
}

#[test]
fn write_without_changes_is_empty() {
    let decoded: Request = serde_json::from_str(r#"{"action":"write"}"#).unwrap();
    assert_eq!(decoded, Request::Write { changes: Changes::new() });
}

#[test]
fn write_keeps_int_and_float_kinds() {
    let decoded: Request = serde_json::from_str(
        r#"{"action":"write","changes":{"display":{"day_temp":7000,"dim_percent":0.5}}}"#,
    )
    .unwrap();
    let expected = Changes::new().set("display", "day_temp", 7000).set("display", "dim_percent", 0.5);
    assert_eq!(decoded, Request::Write { changes: expected });
}

#[test]
fn write_drops_non_scalar_values() {
    let decoded: Request = serde_json::from_str(
        r#"{"action":"write","changes":{"display":{"day_temp":[1],"gamma":null},"bogus":3}}"#,
    )
    .unwrap();
    match decoded {
        Request::Write { changes } => assert!(changes.is_empty()),
        other => panic!("expected write, got {other:?}"),
    }
}

#[yare::parameterized(
    unknown_action = { r#"{"action":"delete"}"# },
    missing_action = { r#"{"changes":{}}"# },
    action_case    = { r#"{"action":"READ"}"# },
    action_number  = { r#"{"action":1}"# },
    not_an_object  = { r#"["read"]"# },
    write_sequence = { r#"["write",{"display":{"dim_percent":0.9}}]"# },
    bare_string    = { r#""read""# },
)]
fn rejects_unrecognized(json: &str) {
    assert!(serde_json::from_str::<Request>(json).is_err());
}
