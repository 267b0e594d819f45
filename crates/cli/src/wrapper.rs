// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The `apolo` client wrapper.

use std::path::PathBuf;
use std::time::Duration;

use ae_core::{DiskId, JobId};
use ae_process::{run_with_timeout, CLI_COMMAND_TIMEOUT};

use crate::error::CliError;
use crate::output;
use crate::parse::{self, LoginSession};

/// Typed interface to one `apolo` binary.
///
/// Construct one per scenario. Every method returns its own parsed result;
/// nothing is remembered between calls, so there is no run/parse ordering
/// to get wrong and no state to race on.
#[derive(Debug, Clone)]
pub struct ApoloCli {
    binary: PathBuf,
    timeout: Duration,
}

impl Default for ApoloCli {
    fn default() -> Self {
        Self::new()
    }
}

impl ApoloCli {
    pub fn new() -> Self {
        Self {
            binary: PathBuf::from("apolo"),
            timeout: CLI_COMMAND_TIMEOUT,
        }
    }

    /// Point the wrapper at a specific client binary.
    pub fn with_binary(mut self, binary: impl Into<PathBuf>) -> Self {
        self.binary = binary.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    // -----------------------------------------------------------------------
    // Login
    // -----------------------------------------------------------------------

    /// `apolo config login-with-token <token> <url>`
    pub async fn login_with_token(&self, token: &str, url: &str) -> Result<(), CliError> {
        self.run(&["config", "login-with-token", token, url]).await?;
        Ok(())
    }

    /// `apolo config show`, parsed into the login confirmation fields.
    pub async fn config_show(&self) -> Result<LoginSession, CliError> {
        let out = self.run(&["config", "show"]).await?;
        Ok(parse::login_session(&out))
    }

    /// Verify the current login against `expected`, reporting every
    /// mismatching field at once.
    pub async fn verify_login(&self, expected: &LoginExpectation) -> Result<(), CliError> {
        let session = self.config_show().await?;
        let mismatches = expected.diff(&session);
        if mismatches.is_empty() {
            Ok(())
        } else {
            Err(CliError::LoginMismatch { mismatches })
        }
    }

    // -----------------------------------------------------------------------
    // Organizations
    // -----------------------------------------------------------------------

    pub async fn add_org(&self, name: &str) -> Result<(), CliError> {
        self.run(&["admin", "add-org", name]).await?;
        Ok(())
    }

    /// `apolo admin get-orgs`, parsed from the `Name` table column.
    pub async fn get_organizations(&self) -> Result<Vec<String>, CliError> {
        let out = self.run(&["admin", "get-orgs"]).await?;
        Ok(parse::name_table(&out))
    }

    pub async fn remove_org(&self, name: &str) -> Result<(), CliError> {
        self.run(&["admin", "remove-org", name]).await?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Projects
    // -----------------------------------------------------------------------

    pub async fn add_project(&self, org: &str, name: &str) -> Result<(), CliError> {
        self.run(&["admin", "add-project", org, name]).await?;
        Ok(())
    }

    pub async fn get_projects(&self, org: &str) -> Result<Vec<String>, CliError> {
        let out = self.run(&["admin", "get-projects", org]).await?;
        Ok(parse::name_table(&out))
    }

    pub async fn remove_project(&self, org: &str, name: &str) -> Result<(), CliError> {
        self.run(&["admin", "remove-project", org, name]).await?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Org users and roles
    // -----------------------------------------------------------------------

    pub async fn add_org_user(&self, org: &str, user: &str, role: &str) -> Result<(), CliError> {
        self.run(&["admin", "add-org-user", org, user, role]).await?;
        Ok(())
    }

    pub async fn get_org_users(&self, org: &str) -> Result<Vec<String>, CliError> {
        let out = self.run(&["admin", "get-org-users", org]).await?;
        Ok(parse::name_table(&out))
    }

    pub async fn remove_org_user(&self, org: &str, user: &str) -> Result<(), CliError> {
        self.run(&["admin", "remove-org-user", org, user]).await?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Jobs
    // -----------------------------------------------------------------------

    /// `apolo run --name <name> <image> -- <command…>`.
    ///
    /// Returns the extracted job ID, or `None` when the client output has
    /// no `Job ID:` line; the caller decides whether that fails the
    /// scenario.
    pub async fn run_job(
        &self,
        name: &str,
        image: &str,
        command: &[&str],
        timeout: Duration,
    ) -> Result<Option<JobId>, CliError> {
        let mut args = vec!["run", "--name", name, image, "--"];
        args.extend_from_slice(command);
        let out = self.run_with(&args, timeout).await?;
        Ok(parse::job_id(&out))
    }

    pub async fn kill_job(&self, id: &JobId) -> Result<(), CliError> {
        self.run(&["job", "kill", id.as_str()]).await?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Disks
    // -----------------------------------------------------------------------

    pub async fn create_disk(&self, size: &str) -> Result<Option<DiskId>, CliError> {
        let out = self.run(&["disk", "create", size]).await?;
        Ok(parse::disk_id(&out))
    }

    pub async fn list_disks(&self) -> Result<Vec<String>, CliError> {
        let out = self.run(&["disk", "ls"]).await?;
        Ok(parse::table_column(&out, "Id"))
    }

    pub async fn remove_disk(&self, id: &DiskId) -> Result<(), CliError> {
        self.run(&["disk", "rm", id.as_str()]).await?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Secrets
    // -----------------------------------------------------------------------

    pub async fn add_secret(&self, name: &str, value: &str) -> Result<(), CliError> {
        self.run(&["secret", "add", name, value]).await?;
        Ok(())
    }

    pub async fn list_secrets(&self) -> Result<Vec<String>, CliError> {
        let out = self.run(&["secret", "ls"]).await?;
        Ok(parse::table_column(&out, "Key"))
    }

    pub async fn remove_secret(&self, name: &str) -> Result<(), CliError> {
        self.run(&["secret", "rm", name]).await?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Storage
    // -----------------------------------------------------------------------

    pub async fn mkdir(&self, path: &str) -> Result<(), CliError> {
        self.run(&["mkdir", path]).await?;
        Ok(())
    }

    pub async fn list_storage(&self, path: &str) -> Result<Vec<String>, CliError> {
        let out = self.run(&["ls", path]).await?;
        Ok(parse::lines(&out))
    }

    pub async fn remove_path(&self, path: &str) -> Result<(), CliError> {
        self.run(&["rm", path]).await?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Invocation plumbing
    // -----------------------------------------------------------------------

    async fn run(&self, args: &[&str]) -> Result<String, CliError> {
        self.run_with(args, self.timeout).await
    }

    /// Run one client invocation and apply the failure policy: non-zero
    /// exit or any stderr output raises, carrying the cleaned combined
    /// text verbatim for domain-specific matching.
    async fn run_with(&self, args: &[&str], timeout: Duration) -> Result<String, CliError> {
        let program = self.binary.to_string_lossy();
        let output = run_with_timeout(program.as_ref(), args.iter().copied(), timeout).await?;

        let stdout = output::clean(&output.stdout);
        let stderr = output::clean(&output.stderr);
        if !output.success() || !stderr.is_empty() {
            tracing::warn!(
                command = %output.command,
                exit_code = output.exit_code,
                "client command failed"
            );
            return Err(CliError::CommandFailed {
                command: output.command,
                output: output::combine(&stdout, &stderr),
            });
        }

        tracing::info!(
            command = %output.command,
            elapsed_ms = output.duration.as_millis() as u64,
            "client command ok"
        );
        Ok(stdout)
    }
}

/// Expected `config show` fields after a login.
///
/// All four fields are compared exactly, including `None` for an org or
/// project that should be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginExpectation {
    pub url: Option<String>,
    pub user: Option<String>,
    pub org: Option<String>,
    pub project: Option<String>,
}

impl LoginExpectation {
    pub fn new(url: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            user: Some(user.into()),
            org: None,
            project: None,
        }
    }

    pub fn org(mut self, org: impl Into<String>) -> Self {
        self.org = Some(org.into());
        self
    }

    pub fn project(mut self, project: impl Into<String>) -> Self {
        self.project = Some(project.into());
        self
    }

    fn diff(&self, actual: &LoginSession) -> Vec<String> {
        let mut mismatches = Vec::new();
        let fields = [
            ("url", &self.url, &actual.url),
            ("user", &self.user, &actual.user),
            ("org", &self.org, &actual.org),
            ("project", &self.project, &actual.project),
        ];
        for (field, expected, got) in fields {
            if expected != got {
                mismatches.push(format!("{field}: expected {expected:?}, got {got:?}"));
            }
        }
        mismatches
    }
}

#[cfg(test)]
#[path = "wrapper_tests.rs"]
mod tests;
