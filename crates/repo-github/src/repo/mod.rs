// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Repository adapters backed by the git and gh CLIs

mod github;
mod noop;

pub use github::GitHubRepoAdapter;
pub use noop::NoOpRepoAdapter;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeRepoAdapter, RepoCall};

use herd_core::RepoOperationError;
use std::path::{Path, PathBuf};

/// Resolve `path` against the process working directory without requiring
/// it to exist yet (worktree targets usually do not, so canonicalization
/// is off the table).
pub(crate) fn absolute_path(path: &Path) -> Result<PathBuf, RepoOperationError> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .map_err(|e| {
            RepoOperationError::new(format!(
                "failed to resolve worktree path {}: {e}",
                path.display()
            ))
        })
}
