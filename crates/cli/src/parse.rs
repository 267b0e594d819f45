// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Text scraping of client output.
//!
//! The client has no machine-readable output mode for the commands the
//! harness drives, so structured fields are pulled out of the
//! human-oriented report text. Every pattern used anywhere in the harness
//! lives in this module, pinned by characterization tests on sample
//! outputs.

use std::sync::LazyLock;

use ae_core::{DiskId, JobId};
use regex::Regex;

// Allow expect here as the regexes are compile-time verified to be valid
#[allow(clippy::expect_used)]
static JOB_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Job ID:\s*(job-[\w-]+)").expect("constant regex pattern is valid")
});

#[allow(clippy::expect_used)]
static DISK_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(disk-[\w-]+)\b").expect("constant regex pattern is valid"));

#[allow(clippy::expect_used)]
static LOGIN_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*API URL:\s*(\S+)\s*$").expect("constant regex pattern is valid")
});

#[allow(clippy::expect_used)]
static LOGIN_USER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*User Name:\s*(\S+)\s*$").expect("constant regex pattern is valid")
});

#[allow(clippy::expect_used)]
static LOGIN_ORG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*Current Org:\s*(\S+)\s*$").expect("constant regex pattern is valid")
});

#[allow(clippy::expect_used)]
static LOGIN_PROJECT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*Current Project:\s*(\S+)\s*$").expect("constant regex pattern is valid")
});

/// Fields reported by `apolo config show`.
///
/// Fields absent from the output stay `None`; presence is asserted by the
/// caller, not here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginSession {
    pub url: Option<String>,
    pub user: Option<String>,
    pub org: Option<String>,
    pub project: Option<String>,
}

/// Parse the login confirmation fields out of `config show` text.
pub fn login_session(text: &str) -> LoginSession {
    LoginSession {
        url: capture(&LOGIN_URL, text),
        user: capture(&LOGIN_USER, text),
        org: capture(&LOGIN_ORG, text),
        project: capture(&LOGIN_PROJECT, text),
    }
}

/// Extract a job ID from `apolo run` output.
///
/// Absence of the pattern is not an error; the caller decides whether a
/// missing ID fails the scenario.
pub fn job_id(text: &str) -> Option<JobId> {
    JOB_ID.captures(text).map(|c| JobId::from_string(&c[1]))
}

/// Extract a disk ID from `disk create` output.
pub fn disk_id(text: &str) -> Option<DiskId> {
    DISK_ID.captures(text).map(|c| DiskId::from_string(&c[1]))
}

/// Read one column from a fixed-width table.
///
/// Locates the header line whose first token equals `header`, then reads
/// the first token of every following non-blank line until the table ends.
/// Separator rows with no alphanumeric content are skipped.
pub fn table_column(text: &str, header: &str) -> Vec<String> {
    let mut lines = text.lines();
    let mut found = false;
    for line in lines.by_ref() {
        if line.split_whitespace().next() == Some(header) {
            found = true;
            break;
        }
    }
    if !found {
        return Vec::new();
    }

    let mut values = Vec::new();
    for line in lines {
        if line.trim().is_empty() {
            break;
        }
        if !line.chars().any(char::is_alphanumeric) {
            continue;
        }
        if let Some(first) = line.split_whitespace().next() {
            values.push(first.to_string());
        }
    }
    values
}

/// The `Name` column of an admin listing table.
pub fn name_table(text: &str) -> Vec<String> {
    table_column(text, "Name")
}

/// Non-empty trimmed lines, for flat listings like `apolo ls`.
pub fn lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(ToString::to_string)
        .collect()
}

fn capture(re: &Regex, text: &str) -> Option<String> {
    re.captures(text).map(|c| c[1].to_string())
}

#[cfg(test)]
#[path = "parse_tests.rs"]
mod tests;
