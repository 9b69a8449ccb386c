// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Command-runner seam for external tool invocations

mod process;

pub use process::ProcessRunner;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod scripted;
#[cfg(any(test, feature = "test-support"))]
pub use scripted::{RecordedCommand, ScriptedRunner};

use async_trait::async_trait;
use std::io;
use std::path::Path;

/// Captured result of one external command invocation.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// True when the command exited zero.
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Runs external commands on behalf of an adapter.
///
/// The single side-effecting primitive in this crate. `Err` means the
/// process could not be spawned at all (tool missing, permissions); a tool
/// that ran and failed is reported through [`CommandOutput::exit_code`].
#[async_trait]
pub trait CommandRunner: Clone + Send + Sync + 'static {
    /// Run `program` with `args` in `cwd`, capturing output.
    async fn run(&self, program: &str, args: &[&str], cwd: &Path) -> io::Result<CommandOutput>;
}
