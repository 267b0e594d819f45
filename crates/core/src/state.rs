// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Application lifecycle states reported by the platform.

use serde::{Deserialize, Serialize};

/// State of an installed application instance.
///
/// Observed via the events/instances endpoints: `queued → progressing →
/// {healthy | degraded}`, and separately `any → uninstalled`. Wire strings
/// are matched case-insensitively; anything unrecognized is preserved in
/// `Unknown` rather than dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AppState {
    Queued,
    Progressing,
    Healthy,
    Degraded,
    Uninstalled,
    Unknown(String),
}

impl AppState {
    /// Parse a wire state string, case-insensitively.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "queued" => AppState::Queued,
            "progressing" => AppState::Progressing,
            "healthy" => AppState::Healthy,
            "degraded" => AppState::Degraded,
            "uninstalled" => AppState::Uninstalled,
            _ => AppState::Unknown(s.trim().to_string()),
        }
    }

    /// True for states after which no further automatic transition happens.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            AppState::Healthy | AppState::Degraded | AppState::Uninstalled
        )
    }

    pub fn as_str(&self) -> &str {
        match self {
            AppState::Queued => "queued",
            AppState::Progressing => "progressing",
            AppState::Healthy => "healthy",
            AppState::Degraded => "degraded",
            AppState::Uninstalled => "uninstalled",
            AppState::Unknown(s) => s,
        }
    }
}

impl From<String> for AppState {
    fn from(s: String) -> Self {
        AppState::parse(&s)
    }
}

impl From<AppState> for String {
    fn from(state: AppState) -> Self {
        state.as_str().to_string()
    }
}

impl std::fmt::Display for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
