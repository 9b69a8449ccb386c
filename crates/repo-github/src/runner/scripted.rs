// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scripted command runner for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{CommandOutput, CommandRunner};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// One invocation seen by the scripted runner.
#[derive(Debug, Clone)]
pub struct RecordedCommand {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
}

impl RecordedCommand {
    /// The full argv line, convenient for assertions.
    pub fn line(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}

enum Scripted {
    Output(CommandOutput),
    SpawnError(String),
}

/// Command runner that replays queued canned results and records every call.
///
/// An exhausted script surfaces as a spawn error so a test that issues more
/// commands than it scripted fails loudly instead of seeing empty output.
#[derive(Clone, Default)]
pub struct ScriptedRunner {
    script: Arc<Mutex<VecDeque<Scripted>>>,
    calls: Arc<Mutex<Vec<RecordedCommand>>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful invocation producing `stdout`.
    pub fn push_ok(&self, stdout: &str) {
        self.push_output(0, stdout, "");
    }

    /// Queue a failed invocation with `exit_code` and `stderr`.
    pub fn push_fail(&self, exit_code: i32, stderr: &str) {
        self.push_output(exit_code, "", stderr);
    }

    /// Queue an invocation result with full control over the output.
    pub fn push_output(&self, exit_code: i32, stdout: &str, stderr: &str) {
        self.script
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(Scripted::Output(CommandOutput {
                exit_code,
                stdout: stdout.to_string(),
                stderr: stderr.to_string(),
            }));
    }

    /// Queue a spawn failure (tool not installed / not on PATH).
    pub fn push_spawn_error(&self, message: &str) {
        self.script
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(Scripted::SpawnError(message.to_string()));
    }

    /// All invocations seen so far.
    pub fn calls(&self) -> Vec<RecordedCommand> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[async_trait]
impl CommandRunner for ScriptedRunner {
    async fn run(&self, program: &str, args: &[&str], cwd: &Path) -> io::Result<CommandOutput> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(RecordedCommand {
                program: program.to_string(),
                args: args.iter().map(|a| (*a).to_string()).collect(),
                cwd: cwd.to_path_buf(),
            });

        match self
            .script
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front()
        {
            Some(Scripted::Output(output)) => Ok(output),
            Some(Scripted::SpawnError(message)) => Err(io::Error::other(message)),
            None => Err(io::Error::other("scripted runner exhausted")),
        }
    }
}
