// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Typed view of the YAML test-data file.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use url::Url;

/// Where the harness looks when no explicit path is given.
pub const DEFAULT_CONFIG_PATH: &str = "tests/test_data.yaml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    Missing { path: PathBuf },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid YAML in {path}: {source}")]
    Yaml {
        path: PathBuf,
        source: serde_yaml::Error,
    },
}

/// Everything a scenario needs to reach one environment.
#[derive(Debug, Clone, Deserialize)]
pub struct HarnessConfig {
    pub base_url: Url,
    pub cli_login_url: Url,
    pub auth: AuthConfig,
    pub project: String,
    pub endpoints: Endpoints,
}

#[derive(Clone, Deserialize)]
pub struct AuthConfig {
    pub token: String,
    pub username: String,
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("token", &"[REDACTED]")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Endpoints {
    /// Format string taking `{organization}` and `{project}`.
    pub templates: String,
}

impl Endpoints {
    /// Substitute the org/project placeholders of the templates endpoint.
    pub fn templates_url(&self, organization: &str, project: &str) -> String {
        self.templates
            .replace("{organization}", organization)
            .replace("{project}", project)
    }
}

impl HarnessConfig {
    /// Load and parse the YAML config at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::Missing {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::from_str(&content).map_err(|source| ConfigError::Yaml {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load from [`DEFAULT_CONFIG_PATH`] relative to the working directory.
    pub fn load_default() -> Result<Self, ConfigError> {
        Self::load(DEFAULT_CONFIG_PATH)
    }
}

#[cfg(test)]
#[path = "harness_tests.rs"]
mod tests;
