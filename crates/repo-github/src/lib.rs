// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! GitHub-backed repository adapter for the herd orchestrator
//!
//! Implements `herd_core::RepoAdapter` by shelling out to the git CLI for
//! branch/worktree/push/log operations and to the gh CLI for pull requests.
//! The only side-effecting primitive is the [`runner::CommandRunner`] seam,
//! which tests replace with a scripted double.

pub mod repo;
pub mod runner;
pub mod traced;

pub use repo::{GitHubRepoAdapter, NoOpRepoAdapter};
pub use runner::{CommandOutput, CommandRunner, ProcessRunner};
pub use traced::TracedRepoAdapter;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use repo::{FakeRepoAdapter, RepoCall};
#[cfg(any(test, feature = "test-support"))]
pub use runner::{RecordedCommand, ScriptedRunner};
