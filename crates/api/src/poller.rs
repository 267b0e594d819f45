// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bounded polling for application lifecycle transitions.

use std::time::Duration;

use ae_core::{AppId, AppState};
use async_trait::async_trait;
use thiserror::Error;

use crate::error::ApiError;
use crate::types::{AppEvent, AppInstance};

/// Interval/deadline pair injected into every polling loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub interval: Duration,
    pub timeout: Duration,
}

impl PollPolicy {
    /// Defaults for install readiness.
    pub const READY: PollPolicy = PollPolicy {
        interval: Duration::from_secs(20),
        timeout: Duration::from_secs(600),
    };

    /// Defaults for uninstall completion.
    pub const UNINSTALL: PollPolicy = PollPolicy {
        interval: Duration::from_secs(10),
        timeout: Duration::from_secs(300),
    };

    pub fn new(interval: Duration, timeout: Duration) -> Self {
        Self { interval, timeout }
    }
}

#[derive(Debug, Error)]
pub enum PollError {
    #[error("application {app_id} became degraded: {}", .message.as_deref().unwrap_or("no details"))]
    Degraded {
        app_id: AppId,
        message: Option<String>,
    },

    #[error("timed out after {waited:?} waiting for {what} of {app_id}")]
    Timeout {
        app_id: AppId,
        what: &'static str,
        waited: Duration,
    },

    /// The target app was absent from the instance listing. Absence is an
    /// error, not implicit uninstall success.
    #[error("application {app_id} not present in instance list")]
    NotFound { app_id: AppId },

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Source of application lifecycle observations.
///
/// The HTTP client implements this; tests script it.
#[async_trait]
pub trait AppStatusSource {
    /// The most recent lifecycle event for the app, if any were reported.
    async fn latest_event(&self, app_id: &AppId) -> Result<Option<AppEvent>, ApiError>;

    /// Current instance listing for the scope.
    async fn instances(&self) -> Result<Vec<AppInstance>, ApiError>;
}

/// Poll until the app reports `healthy`.
///
/// `degraded` fails immediately without waiting out the remaining budget,
/// as does any API error. Anything else re-polls every `policy.interval`
/// until `policy.timeout` elapses.
pub async fn wait_until_ready<S: AppStatusSource + ?Sized>(
    source: &S,
    app_id: &AppId,
    policy: PollPolicy,
) -> Result<AppEvent, PollError> {
    let started = tokio::time::Instant::now();
    loop {
        match source.latest_event(app_id).await? {
            Some(event) => match event.state {
                AppState::Healthy => {
                    tracing::info!(%app_id, "application healthy");
                    return Ok(event);
                }
                AppState::Degraded => {
                    return Err(PollError::Degraded {
                        app_id: app_id.clone(),
                        message: event.message,
                    });
                }
                ref state => {
                    tracing::debug!(%app_id, %state, "application not ready yet");
                }
            },
            None => tracing::debug!(%app_id, "no lifecycle events yet"),
        }
        sleep_or_timeout(started, policy, app_id, "readiness").await?;
    }
}

/// Poll the instance listing until the app reports `uninstalled`
/// (case-insensitively, via wire-state parsing).
///
/// The target must be present in every response; a listing without it
/// raises [`PollError::NotFound`] rather than counting as success.
pub async fn wait_until_uninstalled<S: AppStatusSource + ?Sized>(
    source: &S,
    app_id: &AppId,
    policy: PollPolicy,
) -> Result<AppInstance, PollError> {
    let started = tokio::time::Instant::now();
    loop {
        let instances = source.instances().await?;
        let instance = instances
            .into_iter()
            .find(|i| &i.id == app_id)
            .ok_or_else(|| PollError::NotFound {
                app_id: app_id.clone(),
            })?;

        if instance.state == AppState::Uninstalled {
            tracing::info!(%app_id, "application uninstalled");
            return Ok(instance);
        }
        tracing::debug!(%app_id, state = %instance.state, "application still installed");
        sleep_or_timeout(started, policy, app_id, "uninstall").await?;
    }
}

async fn sleep_or_timeout(
    started: tokio::time::Instant,
    policy: PollPolicy,
    app_id: &AppId,
    what: &'static str,
) -> Result<(), PollError> {
    if started.elapsed() + policy.interval > policy.timeout {
        return Err(PollError::Timeout {
            app_id: app_id.clone(),
            what,
            waited: started.elapsed(),
        });
    }
    tokio::time::sleep(policy.interval).await;
    Ok(())
}

#[cfg(test)]
#[path = "poller_tests.rs"]
mod tests;
