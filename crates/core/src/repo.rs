// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Repository adapter contract

use crate::types::{CommitInfo, LogFilter, PRRecord};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error raised for any failed repository operation.
///
/// All failure paths collapse into this one kind: the message names the
/// high-level operation's target and carries the external tool's diagnostic
/// text (or a parse-failure description). Callers get no finer-grained
/// classification than the message itself.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct RepoOperationError {
    message: String,
}

impl RepoOperationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Adapter for repository operations (branches, worktrees, pull requests,
/// commit history).
///
/// Backends are substituted polymorphically; callers never branch on the
/// concrete forge. Implementations hold no state beyond their repository
/// identity, so every call is independent.
#[async_trait]
pub trait RepoAdapter: Clone + Send + Sync + 'static {
    /// Create a branch `name` pointing at `base`; returns the branch name.
    async fn create_branch(&self, name: &str, base: &str) -> Result<String, RepoOperationError>;

    /// Create a worktree at `path` checked out to `branch`, creating the
    /// branch when it does not exist yet; returns the absolute path.
    async fn create_worktree(
        &self,
        branch: &str,
        path: &Path,
    ) -> Result<PathBuf, RepoOperationError>;

    /// Remove the worktree at `path`.
    async fn remove_worktree(&self, path: &Path) -> Result<(), RepoOperationError>;

    /// Push `branch` to the `origin` remote, setting it as upstream.
    async fn push(&self, branch: &str) -> Result<(), RepoOperationError>;

    /// Open a pull request; returns the forge's PR identifier.
    async fn create_pr(
        &self,
        title: &str,
        body: &str,
        head: &str,
        base: &str,
    ) -> Result<String, RepoOperationError>;

    /// Fetch the current state of a pull request.
    async fn get_pr(&self, id: &str) -> Result<PRRecord, RepoOperationError>;

    /// Merge a pull request with a merge commit (never squash or rebase).
    async fn merge_pr(&self, id: &str) -> Result<(), RepoOperationError>;

    /// Post a comment on a pull request's issue thread.
    async fn add_pr_comment(&self, id: &str, body: &str) -> Result<(), RepoOperationError>;

    /// Read commit history, most recent first.
    async fn get_log(&self, filter: &LogFilter) -> Result<Vec<CommitInfo>, RepoOperationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_displays_its_message_verbatim() {
        let err = RepoOperationError::new("failed to push branch main: rejected");
        assert_eq!(err.to_string(), "failed to push branch main: rejected");
        assert_eq!(err.message(), "failed to push branch main: rejected");
    }
}
