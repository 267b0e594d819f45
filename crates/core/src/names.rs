// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Logical-name to generated-name mapping.
//!
//! Scenarios refer to resources by stable human-readable names ("my org",
//! "first project"). Each registry maps those to randomly suffixed platform
//! names so concurrent test runs never collide, while repeated lookups
//! within one scenario resolve to the same generated name.

use std::collections::HashMap;

use parking_lot::Mutex;

/// Lowercase alphanumeric alphabet. Platform resource names reject the
/// `_` and `-`-prefixed forms the default nanoid alphabet can produce.
const NAME_ALPHABET: [char; 36] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i',
    'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z',
];

const SUFFIX_LEN: usize = 8;

/// Kind of platform resource a generated name belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Organization,
    Project,
    User,
    Job,
    Disk,
    Secret,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Organization => "org",
            ResourceKind::Project => "proj",
            ResourceKind::User => "user",
            ResourceKind::Job => "job",
            ResourceKind::Disk => "disk",
            ResourceKind::Secret => "secret",
        }
    }
}

/// Per-scenario registry of generated resource names.
#[derive(Debug, Default)]
pub struct NameRegistry {
    names: Mutex<HashMap<(ResourceKind, String), String>>,
}

impl NameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a logical name to its generated platform name, generating
    /// and memoizing one on first use.
    pub fn resolve(&self, kind: ResourceKind, logical: &str) -> String {
        let mut names = self.names.lock();
        names
            .entry((kind, logical.to_string()))
            .or_insert_with(|| generate(kind, logical))
            .clone()
    }

    /// Look up a previously resolved name without generating a new one.
    pub fn get(&self, kind: ResourceKind, logical: &str) -> Option<String> {
        self.names.lock().get(&(kind, logical.to_string())).cloned()
    }
}

fn generate(kind: ResourceKind, logical: &str) -> String {
    let slug: String = logical
        .trim()
        .to_ascii_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect();
    format!(
        "e2e-{}-{}-{}",
        kind.as_str(),
        slug.trim_matches('-'),
        nanoid::nanoid!(SUFFIX_LEN, &NAME_ALPHABET)
    )
}

#[cfg(test)]
#[path = "names_tests.rs"]
mod tests;
