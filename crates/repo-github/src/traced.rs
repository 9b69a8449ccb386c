// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrapper for consistent observability

use async_trait::async_trait;
use herd_core::repo::{RepoAdapter, RepoOperationError};
use herd_core::types::{CommitInfo, LogFilter, PRRecord};
use std::path::{Path, PathBuf};

/// Wrapper that adds tracing to any RepoAdapter
#[derive(Clone)]
pub struct TracedRepoAdapter<R> {
    inner: R,
}

impl<R> TracedRepoAdapter<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<R: RepoAdapter> RepoAdapter for TracedRepoAdapter<R> {
    async fn create_branch(&self, name: &str, base: &str) -> Result<String, RepoOperationError> {
        let span = tracing::info_span!("repo.create_branch", name, base);
        let _guard = span.enter();

        let result = self.inner.create_branch(name, base).await;
        match &result {
            Ok(_) => tracing::info!("branch created"),
            Err(e) => tracing::error!(error = %e, "create branch failed"),
        }

        result
    }

    async fn create_worktree(
        &self,
        branch: &str,
        path: &Path,
    ) -> Result<PathBuf, RepoOperationError> {
        let span = tracing::info_span!("repo.create_worktree", branch, path = %path.display());
        let _guard = span.enter();

        tracing::info!("adding worktree");

        let start = std::time::Instant::now();
        let result = self.inner.create_worktree(branch, path).await;
        let elapsed = start.elapsed();

        match &result {
            Ok(resolved) => tracing::info!(
                path = %resolved.display(),
                elapsed_ms = elapsed.as_millis() as u64,
                "worktree added"
            ),
            Err(e) => {
                tracing::error!(elapsed_ms = elapsed.as_millis() as u64, error = %e, "failed")
            }
        }

        result
    }

    async fn remove_worktree(&self, path: &Path) -> Result<(), RepoOperationError> {
        let span = tracing::info_span!("repo.remove_worktree", path = %path.display());
        let _guard = span.enter();

        let result = self.inner.remove_worktree(path).await;
        // Removal failing is often acceptable (worktree already gone)
        match &result {
            Ok(()) => tracing::info!("worktree removed"),
            Err(e) => tracing::warn!(error = %e, "worktree remove failed (may be expected)"),
        }

        result
    }

    async fn push(&self, branch: &str) -> Result<(), RepoOperationError> {
        let span = tracing::info_span!("repo.push", branch);
        let _guard = span.enter();

        tracing::info!("pushing");

        let start = std::time::Instant::now();
        let result = self.inner.push(branch).await;
        let elapsed = start.elapsed();

        match &result {
            Ok(()) => tracing::info!(elapsed_ms = elapsed.as_millis() as u64, "pushed"),
            Err(e) => {
                tracing::error!(elapsed_ms = elapsed.as_millis() as u64, error = %e, "push failed")
            }
        }

        result
    }

    async fn create_pr(
        &self,
        title: &str,
        body: &str,
        head: &str,
        base: &str,
    ) -> Result<String, RepoOperationError> {
        let span = tracing::info_span!("repo.create_pr", head, base);
        let _guard = span.enter();

        tracing::info!(title, "opening PR");

        let result = self.inner.create_pr(title, body, head, base).await;
        match &result {
            Ok(id) => tracing::info!(id, "PR opened"),
            Err(e) => tracing::error!(error = %e, "create PR failed"),
        }

        result
    }

    async fn get_pr(&self, id: &str) -> Result<PRRecord, RepoOperationError> {
        let result = self.inner.get_pr(id).await;
        tracing::trace!(
            id,
            status = result.as_ref().map(|pr| pr.status.as_str()).ok(),
            "fetched PR"
        );
        result
    }

    async fn merge_pr(&self, id: &str) -> Result<(), RepoOperationError> {
        let span = tracing::info_span!("repo.merge_pr", id);
        let _guard = span.enter();

        let start = std::time::Instant::now();
        let result = self.inner.merge_pr(id).await;
        let elapsed = start.elapsed();

        match &result {
            Ok(()) => tracing::info!(elapsed_ms = elapsed.as_millis() as u64, "PR merged"),
            Err(e) => {
                tracing::error!(elapsed_ms = elapsed.as_millis() as u64, error = %e, "merge failed")
            }
        }

        result
    }

    async fn add_pr_comment(&self, id: &str, body: &str) -> Result<(), RepoOperationError> {
        let span = tracing::info_span!("repo.add_pr_comment", id);
        let _guard = span.enter();

        tracing::debug!(body_len = body.len(), "commenting");
        let result = self.inner.add_pr_comment(id, body).await;

        match &result {
            Ok(()) => tracing::debug!("comment posted"),
            Err(e) => tracing::error!(error = %e, "comment failed"),
        }

        result
    }

    async fn get_log(&self, filter: &LogFilter) -> Result<Vec<CommitInfo>, RepoOperationError> {
        let result = self.inner.get_log(filter).await;
        tracing::trace!(
            count = result.as_ref().map(|v| v.len()).ok(),
            "fetched log"
        );
        result
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
