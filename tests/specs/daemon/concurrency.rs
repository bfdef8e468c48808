// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Many clients at once

use crate::prelude::*;
use similar_asserts::assert_eq;

fn wide_schema() -> Schema {
    let mut builder = Schema::builder();
    for i in 0..8 {
        builder = builder.option("levels", &format!("level_{i}"), 0);
    }
    builder.build()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_writers_on_distinct_options_all_land() {
    let daemon = Daemon::start(wide_schema()).await;

    let writers: Vec<_> = (0..8)
        .map(|i| {
            let client = daemon.client();
            tokio::spawn(async move {
                let option = format!("level_{i}");
                client.write(&Changes::new().set("levels", &option, i * 10)).await
            })
        })
        .collect();
    for writer in writers {
        writer.await.unwrap().unwrap();
    }

    let state = daemon.client().read().await.unwrap();
    for i in 0..8 {
        assert_eq!(state.get("levels", &format!("level_{i}")), Some(&Value::Int(i * 10)));
    }

    let file = daemon.settings_file();
    for i in 0..8 {
        let line = format!("level_{i} = {}", i * 10);
        assert!(file.contains(&line), "missing {line:?} in:\n{file}");
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_readers_see_a_consistent_state() {
    let daemon = Daemon::start(dim_schema()).await;

    let readers: Vec<_> = (0..16)
        .map(|_| {
            let client = daemon.client();
            tokio::spawn(async move { client.read().await })
        })
        .collect();

    for reader in readers {
        let state = reader.await.unwrap().unwrap();
        assert_eq!(state.get("display", "dim_percent"), Some(&Value::Float(0.3)));
    }
}
