// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Subprocess execution for the Apolo end-to-end harness.
//!
//! Spawns external binaries with captured stdio and bounded wait times.
//! The platform CLI wrapper sits on top of this; nothing here knows about
//! `apolo` subcommands or their output formats.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod runner;

pub use runner::{
    run_with_timeout, spawn, CommandHandle, CommandOutput, ProcessError, CLI_COMMAND_TIMEOUT,
};
