// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wire types for the app lifecycle endpoints.

use ae_core::{AppId, AppState};
use serde::Deserialize;

/// One lifecycle event reported by the events endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct AppEvent {
    pub state: AppState,
    #[serde(default)]
    pub message: Option<String>,
}

/// One row of the instance listing.
#[derive(Debug, Clone, Deserialize)]
pub struct AppInstance {
    pub id: AppId,
    #[serde(default)]
    pub name: Option<String>,
    pub state: AppState,
}

/// Events payload, items ordered oldest first.
#[derive(Debug, Deserialize)]
pub(crate) struct EventsResponse {
    pub items: Vec<AppEvent>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct InstancesResponse {
    pub items: Vec<AppInstance>,
}
