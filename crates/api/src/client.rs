// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bearer-authenticated JSON client for the platform API.

use std::time::Duration;

use ae_core::AppId;
use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;
use url::Url;

use crate::error::ApiError;
use crate::poller::AppStatusSource;
use crate::types::{AppEvent, AppInstance, EventsResponse, InstancesResponse};

/// Fixed client-side timeout applied to every request.
pub const API_TIMEOUT: Duration = Duration::from_secs(10);

pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    token: String,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

impl ApiClient {
    pub fn new(base_url: Url, token: impl Into<String>) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(API_TIMEOUT)
            .build()
            .map_err(ApiError::Client)?;
        Ok(Self {
            http,
            base_url,
            token: token.into(),
        })
    }

    pub async fn get(&self, path: &str) -> Result<Value, ApiError> {
        self.request(Method::GET, path, None).await
    }

    pub async fn post(&self, path: &str, body: &Value) -> Result<Value, ApiError> {
        self.request(Method::POST, path, Some(body)).await
    }

    pub async fn put(&self, path: &str, body: &Value) -> Result<Value, ApiError> {
        self.request(Method::PUT, path, Some(body)).await
    }

    pub async fn delete(&self, path: &str) -> Result<Value, ApiError> {
        self.request(Method::DELETE, path, None).await
    }

    /// Lifecycle events for one app instance, oldest first.
    pub async fn app_events(
        &self,
        org: &str,
        project: &str,
        app_id: &AppId,
    ) -> Result<Vec<AppEvent>, ApiError> {
        let path = format!("/api/v1/orgs/{org}/projects/{project}/apps/{app_id}/events");
        let value = self.get(&path).await?;
        let events: EventsResponse =
            serde_json::from_value(value).map_err(|source| ApiError::Decode { url: path, source })?;
        Ok(events.items)
    }

    /// Current app instance listing for an org/project.
    pub async fn app_instances(
        &self,
        org: &str,
        project: &str,
    ) -> Result<Vec<AppInstance>, ApiError> {
        let path = format!("/api/v1/orgs/{org}/projects/{project}/apps");
        let value = self.get(&path).await?;
        let instances: InstancesResponse =
            serde_json::from_value(value).map_err(|source| ApiError::Decode { url: path, source })?;
        Ok(instances.items)
    }

    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Value, ApiError> {
        let url = self.base_url.join(path).map_err(|source| ApiError::Url {
            path: path.to_string(),
            source,
        })?;

        let mut request = self
            .http
            .request(method, url.clone())
            .bearer_auth(&self.token);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|source| ApiError::Http {
            url: url.to_string(),
            source,
        })?;
        let status = response.status();
        let text = response.text().await.map_err(|source| ApiError::Http {
            url: url.to_string(),
            source,
        })?;

        if !status.is_success() {
            tracing::warn!(%url, status = status.as_u16(), "unexpected API status");
            return Err(ApiError::UnexpectedStatus {
                url: url.to_string(),
                status: status.as_u16(),
                body: text,
            });
        }

        if text.is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|source| ApiError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

/// An org/project-scoped view of the app lifecycle endpoints.
#[derive(Debug)]
pub struct AppScope {
    client: ApiClient,
    org: String,
    project: String,
}

impl AppScope {
    pub fn new(client: ApiClient, org: impl Into<String>, project: impl Into<String>) -> Self {
        Self {
            client,
            org: org.into(),
            project: project.into(),
        }
    }
}

#[async_trait]
impl AppStatusSource for AppScope {
    async fn latest_event(&self, app_id: &AppId) -> Result<Option<AppEvent>, ApiError> {
        let mut events = self
            .client
            .app_events(&self.org, &self.project, app_id)
            .await?;
        Ok(events.pop())
    }

    async fn instances(&self) -> Result<Vec<AppInstance>, ApiError> {
        self.client.app_instances(&self.org, &self.project).await
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
