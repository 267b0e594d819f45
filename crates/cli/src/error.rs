// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Errors raised by the client wrapper.

use ae_process::ProcessError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    /// The client exited non-zero or wrote to stderr. The cleaned combined
    /// output is carried verbatim for domain-specific matching.
    #[error("`{command}` failed:\n{output}")]
    CommandFailed { command: String, output: String },

    /// One or more login confirmation fields did not match expectations.
    #[error("login verification failed: {}", .mismatches.join("; "))]
    LoginMismatch { mismatches: Vec<String> },

    #[error(transparent)]
    Process(#[from] ProcessError),
}

impl CliError {
    /// The cleaned client output attached to a command failure, if any.
    pub fn output(&self) -> Option<&str> {
        match self {
            CliError::CommandFailed { output, .. } => Some(output),
            _ => None,
        }
    }
}
