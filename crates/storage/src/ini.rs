// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Minimal INI reader and writer for the settings file.
//!
//! The reader never fails: lines it cannot make sense of are skipped and
//! counted so that a hand-edited file with one bad line still yields every
//! other value.

use std::fmt::Write;

use bluedim_core::Settings;
use indexmap::IndexMap;

/// Raw `section → key → text` content of an INI document.
#[derive(Debug, Default, PartialEq)]
pub struct IniDocument {
    pub sections: IndexMap<String, IndexMap<String, String>>,
    /// Number of lines that were neither blank, comments, headers nor
    /// `key = value` pairs inside a section.
    pub skipped_lines: usize,
}

impl IniDocument {
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.sections.get(section).and_then(|s| s.get(key)).map(String::as_str)
    }
}

pub fn parse(text: &str) -> IniDocument {
    let mut doc = IniDocument::default();
    let mut current: Option<String> = None;

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }

        if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            let name = name.trim().to_string();
            doc.sections.entry(name.clone()).or_default();
            current = Some(name);
            continue;
        }

        let pair = line.find(['=', ':']).map(|at| (line[..at].trim(), line[at + 1..].trim()));
        match (&current, pair) {
            (Some(section), Some((key, value))) if !key.is_empty() => {
                doc.sections
                    .entry(section.clone())
                    .or_default()
                    .insert(key.to_string(), value.to_string());
            }
            _ => doc.skipped_lines += 1,
        }
    }

    doc
}

/// Render settings as INI text: one block per section, blank line after each.
pub fn render(settings: &Settings) -> String {
    let mut out = String::new();
    for (section, options) in settings.sections() {
        let _ = writeln!(out, "[{section}]");
        for (option, value) in options {
            let _ = writeln!(out, "{option} = {value}");
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
#[path = "ini_tests.rs"]
mod tests;
