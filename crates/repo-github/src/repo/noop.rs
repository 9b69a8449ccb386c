// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! No-op repo adapter for when repository side effects are disabled.

use async_trait::async_trait;
use herd_core::repo::{RepoAdapter, RepoOperationError};
use herd_core::types::{CommitInfo, LogFilter, PRRecord};
use std::path::{Path, PathBuf};

/// Repo adapter that does nothing.
///
/// Used for dry runs or deployments without forge access. Every operation
/// succeeds and returns an empty or default value.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOpRepoAdapter;

impl NoOpRepoAdapter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl RepoAdapter for NoOpRepoAdapter {
    async fn create_branch(&self, name: &str, _base: &str) -> Result<String, RepoOperationError> {
        Ok(name.to_string())
    }

    async fn create_worktree(
        &self,
        _branch: &str,
        path: &Path,
    ) -> Result<PathBuf, RepoOperationError> {
        super::absolute_path(path)
    }

    async fn remove_worktree(&self, _path: &Path) -> Result<(), RepoOperationError> {
        Ok(())
    }

    async fn push(&self, _branch: &str) -> Result<(), RepoOperationError> {
        Ok(())
    }

    async fn create_pr(
        &self,
        _title: &str,
        _body: &str,
        _head: &str,
        _base: &str,
    ) -> Result<String, RepoOperationError> {
        Ok(String::new())
    }

    async fn get_pr(&self, id: &str) -> Result<PRRecord, RepoOperationError> {
        Ok(PRRecord {
            id: id.to_string(),
            title: String::new(),
            branch: String::new(),
            base: String::new(),
            status: "open".to_string(),
            lines_added: 0,
            lines_deleted: 0,
            files_changed: 0,
            url: None,
            merged_at: None,
            closed_at: None,
        })
    }

    async fn merge_pr(&self, _id: &str) -> Result<(), RepoOperationError> {
        Ok(())
    }

    async fn add_pr_comment(&self, _id: &str, _body: &str) -> Result<(), RepoOperationError> {
        Ok(())
    }

    async fn get_log(&self, _filter: &LogFilter) -> Result<Vec<CommitInfo>, RepoOperationError> {
        Ok(Vec::new())
    }
}
