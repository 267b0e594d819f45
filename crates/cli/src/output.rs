// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cleaning of raw client output.
//!
//! The client interleaves upgrade notices with command output. They are
//! stripped by literal prefix match before any parsing; the deeply
//! indented continuation lines after a notice are dropped with it, and a
//! blank line closes the block. Single-space table indentation is NOT
//! treated as continuation, so a listing directly after a notice survives.

/// A line starting with one of these opens an upgrade-notice block.
const NOISE_PREFIXES: &[&str] = &[
    "You are using Apolo CLI",
    "A newer version of the Apolo CLI",
    "To upgrade, run",
];

/// Strip known client noise from captured text.
///
/// Idempotent: cleaning already-clean text returns it unchanged.
pub fn clean(text: &str) -> String {
    let mut kept: Vec<&str> = Vec::new();
    let mut in_noise = false;
    for line in text.lines() {
        if NOISE_PREFIXES.iter().any(|p| line.starts_with(p)) {
            in_noise = true;
            continue;
        }
        if in_noise {
            if line.trim().is_empty() {
                in_noise = false;
                continue;
            }
            if line.starts_with("  ") || line.starts_with('\t') {
                continue;
            }
            in_noise = false;
        }
        kept.push(line);
    }
    kept.join("\n").trim_end().to_string()
}

/// Join cleaned stdout and stderr for error reporting.
pub fn combine(stdout: &str, stderr: &str) -> String {
    match (stdout.is_empty(), stderr.is_empty()) {
        (false, false) => format!("{stdout}\n{stderr}"),
        (false, true) => stdout.to_string(),
        (true, _) => stderr.to_string(),
    }
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
