// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Schema-reconciling settings persistence.
//!
//! The store has no locking of its own. The daemon keeps it behind a single
//! mutex and every call here runs to completion under that lock.

use std::io;
use std::path::{Path, PathBuf};

use bluedim_core::{Changes, Schema, Settings, Value};
use tracing::{debug, info, warn};

use crate::fs::write_atomic;
use crate::ini;

/// Outcome of a [`SettingsStore::load`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LoadReport {
    /// Options whose value was taken from the file
    pub restored: usize,
    /// Options present in the file whose text did not parse as the schema kind
    pub rejected: usize,
    /// Sections or options in the file that the schema does not know
    pub pruned: usize,
    /// Lines of the file that could not be read at all
    pub skipped_lines: usize,
}

pub struct SettingsStore {
    path: PathBuf,
    schema: Schema,
    state: Settings,
    /// Set after a failed write; cleared by the next successful one.
    persist_failed: bool,
}

impl SettingsStore {
    /// A store holding schema defaults. Nothing is read or written yet.
    pub fn new(path: impl Into<PathBuf>, schema: Schema) -> Self {
        let state = schema.defaults();
        Self { path: path.into(), schema, state, persist_failed: false }
    }

    /// Create a store and [`load`](Self::load) it.
    pub fn open(path: impl Into<PathBuf>, schema: Schema) -> Self {
        let mut store = Self::new(path, schema);
        let report = store.load();
        info!(
            path = %store.path.display(),
            restored = report.restored,
            rejected = report.rejected,
            pruned = report.pruned,
            "settings loaded"
        );
        store
    }

    /// Read the settings file, reconcile it against the schema and rewrite
    /// it fully populated.
    ///
    /// Options the file does not provide, or provides with text that does not
    /// parse as the schema kind, keep their current value. Never fails: an
    /// unreadable file counts as empty and an unwritable one degrades the
    /// store to memory only.
    pub fn load(&mut self) -> LoadReport {
        let doc = match std::fs::read(&self.path) {
            Ok(bytes) => ini::parse(&String::from_utf8_lossy(&bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => ini::IniDocument::default(),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "cannot read settings file, using current values");
                ini::IniDocument::default()
            }
        };

        let mut report = LoadReport { skipped_lines: doc.skipped_lines, ..LoadReport::default() };

        let mut next = self.state.clone();
        for (section, option, current) in self.schema.entries() {
            let Some(text) = doc.get(section, option) else {
                continue;
            };
            match Value::parse_as(current.kind(), text) {
                Ok(value) => {
                    next.apply(section, option, &value);
                    report.restored += 1;
                }
                Err(e) => {
                    warn!(section, option, error = %e, "discarding persisted value");
                    report.rejected += 1;
                }
            }
        }

        for (section, options) in &doc.sections {
            if !self.schema.has_section(section) {
                report.pruned += 1;
                continue;
            }
            report.pruned +=
                options.keys().filter(|o| self.schema.kind_of(section, o).is_none()).count();
        }

        self.state = next;
        self.persist();
        report
    }

    /// Best-effort merge of `changes` into the state.
    ///
    /// Entries for unknown sections or options, and values whose kind differs
    /// from the current value, are skipped silently. Returns the number of
    /// options that were updated; the file is rewritten if any were.
    pub fn apply_changes(&mut self, changes: &Changes) -> usize {
        let mut applied = 0;
        for (section, option, value) in changes.entries() {
            if self.state.apply(section, option, value) {
                applied += 1;
            } else {
                debug!(section, option, "skipping change");
            }
        }
        if applied > 0 {
            self.persist();
        }
        applied
    }

    /// A copy of the current state.
    pub fn snapshot(&self) -> Settings {
        self.state.clone()
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// False while the settings file cannot be written.
    pub fn is_persisting(&self) -> bool {
        !self.persist_failed
    }

    fn persist(&mut self) {
        match write_atomic(&self.path, ini::render(&self.state).as_bytes()) {
            Ok(()) => {
                if self.persist_failed {
                    info!(path = %self.path.display(), "settings file writable again");
                }
                self.persist_failed = false;
            }
            Err(e) => {
                if !self.persist_failed {
                    warn!(
                        path = %self.path.display(),
                        error = %e,
                        "cannot write settings file, keeping settings in memory only"
                    );
                }
                self.persist_failed = true;
            }
        }
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
