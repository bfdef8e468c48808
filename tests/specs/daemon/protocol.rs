// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wire-level requests and responses

use crate::prelude::*;
use similar_asserts::assert_eq;

#[tokio::test]
async fn read_write_read_roundtrip() {
    let daemon = Daemon::start(dim_schema()).await;

    let read = daemon.raw(br#"{"action":"read"}"#).await;
    assert_eq!(read, json!({"status": "success", "state": {"display": {"dim_percent": 0.3}}}));

    let write = daemon
        .raw(br#"{"action":"write","changes":{"display":{"dim_percent":0.5}}}"#)
        .await;
    assert_eq!(write, json!({"status": "success"}));

    let read = daemon.raw(br#"{"action":"read"}"#).await;
    assert_eq!(read, json!({"status": "success", "state": {"display": {"dim_percent": 0.5}}}));
}

#[tokio::test]
async fn write_without_changes_succeeds() {
    let daemon = Daemon::start(dim_schema()).await;

    let reply = daemon.raw(br#"{"action":"write"}"#).await;

    assert_eq!(reply, json!({"status": "success"}));
}

#[tokio::test]
async fn write_ignores_unknown_and_mistyped_changes() {
    let daemon = Daemon::start(dim_schema()).await;

    let reply = daemon
        .raw(br#"{"action":"write","changes":{"display":{"dim_percent":"bright","gamma":2},"extra":{"x":1}}}"#)
        .await;
    assert_eq!(reply, json!({"status": "success"}));

    let read = daemon.raw(br#"{"action":"read"}"#).await;
    assert_eq!(read["state"], json!({"display": {"dim_percent": 0.3}}));
}

#[tokio::test]
async fn malformed_requests_get_error_status() {
    let daemon = Daemon::start(dim_schema()).await;

    let payloads: [&[u8]; 6] = [
        b"not json",
        br#"{"action":"delete"}"#,
        br#"{"changes":{}}"#,
        b"[]",
        br#"["read"]"#,
        br#"["write",{"display":{"dim_percent":0.9}}]"#,
    ];
    for payload in payloads {
        let reply = daemon.raw(payload).await;
        assert_eq!(reply, json!({"status": "error"}), "payload {:?}", String::from_utf8_lossy(payload));
    }
    let read = daemon.raw(br#"{"action":"read"}"#).await;
    assert_eq!(read["state"], json!({"display": {"dim_percent": 0.3}}));
}

#[tokio::test]
async fn daemon_survives_a_malformed_request() {
    let daemon = Daemon::start(dim_schema()).await;

    daemon.raw(b"{").await;

    let read = daemon.raw(br#"{"action":"read"}"#).await;
    assert_eq!(read["status"], json!("success"));
}
