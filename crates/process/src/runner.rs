// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Async subprocess spawn/wait with captured output.

use std::process::Stdio;
use std::time::{Duration, Instant};

use thiserror::Error;
use tokio::process::{Child, Command};

/// Default deadline for a single platform CLI invocation.
pub const CLI_COMMAND_TIMEOUT: Duration = Duration::from_secs(300);

/// Errors from spawning or waiting on an external process.
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("binary not found: {program}")]
    NotFound { program: String },
    #[error("failed to spawn `{command}`: {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },
    #[error("`{what}` timed out after {timeout:?}")]
    Timeout { what: String, timeout: Duration },
    #[error("failed to collect output of `{what}`: {source}")]
    Output {
        what: String,
        source: std::io::Error,
    },
}

/// Record of one completed process invocation.
#[derive(Debug)]
pub struct CommandOutput {
    /// The rendered command line, for log and error messages.
    pub command: String,
    /// Exit code, or -1 when the process was killed by a signal.
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
    /// Wall-clock time from spawn to exit.
    pub duration: Duration,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Stdout and stderr joined for error reporting.
    pub fn combined(&self) -> String {
        let stdout = self.stdout.trim_end();
        let stderr = self.stderr.trim_end();
        match (stdout.is_empty(), stderr.is_empty()) {
            (false, false) => format!("{stdout}\n{stderr}"),
            (false, true) => stdout.to_string(),
            (true, _) => stderr.to_string(),
        }
    }
}

/// Handle to a spawned process.
///
/// Dropping the handle kills the process; a handle that is waited on to
/// completion reaps it normally.
#[derive(Debug)]
pub struct CommandHandle {
    child: Child,
    command: String,
    started: Instant,
}

/// Spawn `program` with `args`, capturing stdout and stderr.
///
/// Non-blocking; returns as soon as the process is started. A binary that
/// cannot be resolved on the search path fails immediately with
/// [`ProcessError::NotFound`].
pub fn spawn<I, S>(program: &str, args: I) -> Result<CommandHandle, ProcessError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let args: Vec<String> = args.into_iter().map(Into::into).collect();
    let command = render(program, &args);

    let mut cmd = Command::new(program);
    cmd.args(&args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    tracing::debug!(%command, "spawning");
    let child = cmd.spawn().map_err(|source| match source.kind() {
        std::io::ErrorKind::NotFound => ProcessError::NotFound {
            program: program.to_string(),
        },
        _ => ProcessError::Spawn {
            command: command.clone(),
            source,
        },
    })?;

    Ok(CommandHandle {
        child,
        command,
        started: Instant::now(),
    })
}

impl CommandHandle {
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Suspend until the process exits or `timeout` elapses.
    ///
    /// A process that outlives the deadline is killed before the timeout
    /// error is returned; no child is left running.
    pub async fn wait(self, timeout: Duration) -> Result<CommandOutput, ProcessError> {
        let CommandHandle {
            child,
            command,
            started,
        } = self;

        match tokio::time::timeout(timeout, child.wait_with_output()).await {
            Ok(Ok(output)) => {
                let output = CommandOutput {
                    command,
                    exit_code: output.status.code().unwrap_or(-1),
                    stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                    stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
                    duration: started.elapsed(),
                };
                tracing::debug!(
                    command = %output.command,
                    exit_code = output.exit_code,
                    elapsed_ms = output.duration.as_millis() as u64,
                    "process exited"
                );
                Ok(output)
            }
            Ok(Err(source)) => Err(ProcessError::Output {
                what: command,
                source,
            }),
            Err(_) => {
                // The elapsed wait_with_output future owned the child, so
                // dropping it triggers kill_on_drop.
                tracing::warn!(command = %command, ?timeout, "process timed out, killed");
                Err(ProcessError::Timeout {
                    what: command,
                    timeout,
                })
            }
        }
    }
}

/// Spawn and wait in one step.
pub async fn run_with_timeout<I, S>(
    program: &str,
    args: I,
    timeout: Duration,
) -> Result<CommandOutput, ProcessError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    spawn(program, args)?.wait(timeout).await
}

fn render(program: &str, args: &[String]) -> String {
    let mut out = String::from(program);
    for arg in args {
        out.push(' ');
        out.push_str(arg);
    }
    out
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
