// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake repository adapter for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use async_trait::async_trait;
use chrono::Utc;
use herd_core::repo::{RepoAdapter, RepoOperationError};
use herd_core::types::{CommitInfo, LogFilter, PRRecord};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Recorded repo call
#[derive(Debug, Clone)]
pub enum RepoCall {
    CreateBranch { name: String, base: String },
    CreateWorktree { branch: String, path: PathBuf },
    RemoveWorktree { path: PathBuf },
    Push { branch: String },
    CreatePr { title: String, head: String, base: String },
    GetPr { id: String },
    MergePr { id: String },
    AddPrComment { id: String, body: String },
    GetLog { filter: LogFilter },
}

#[derive(Default)]
struct FakeState {
    branches: HashSet<String>,
    worktrees: HashMap<PathBuf, String>,
    prs: HashMap<String, PRRecord>,
    comments: HashMap<String, Vec<String>>,
    log: Vec<CommitInfo>,
    last_pr_number: u64,
}

/// In-memory repository adapter for orchestrator-level tests.
///
/// Tracks branches, worktrees, and a PR lifecycle well enough for callers
/// to exercise their own logic, and records every call for assertions.
#[derive(Clone, Default)]
pub struct FakeRepoAdapter {
    state: Arc<Mutex<FakeState>>,
    calls: Arc<Mutex<Vec<RepoCall>>>,
}

impl FakeRepoAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<RepoCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Pre-populate a branch so worktree/push operations against it succeed.
    pub fn seed_branch(&self, name: &str) {
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .branches
            .insert(name.to_string());
    }

    /// Pre-populate the commit log, most recent first.
    pub fn seed_commit(&self, commit: CommitInfo) {
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .log
            .push(commit);
    }

    /// Branch a worktree is checked out to, if the worktree exists.
    pub fn worktree_branch(&self, path: &Path) -> Option<String> {
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .worktrees
            .get(path)
            .cloned()
    }

    /// Comments posted to a PR so far.
    pub fn pr_comments(&self, id: &str) -> Vec<String> {
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .comments
            .get(id)
            .cloned()
            .unwrap_or_default()
    }

    fn record(&self, call: RepoCall) {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).push(call);
    }
}

#[async_trait]
impl RepoAdapter for FakeRepoAdapter {
    async fn create_branch(&self, name: &str, base: &str) -> Result<String, RepoOperationError> {
        self.record(RepoCall::CreateBranch {
            name: name.to_string(),
            base: base.to_string(),
        });

        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        if !state.branches.insert(name.to_string()) {
            return Err(RepoOperationError::new(format!(
                "failed to create branch {name}: branch already exists"
            )));
        }
        Ok(name.to_string())
    }

    async fn create_worktree(
        &self,
        branch: &str,
        path: &Path,
    ) -> Result<PathBuf, RepoOperationError> {
        self.record(RepoCall::CreateWorktree {
            branch: branch.to_string(),
            path: path.to_path_buf(),
        });

        let worktree_path = super::absolute_path(path)?;
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        if state.worktrees.contains_key(&worktree_path) {
            return Err(RepoOperationError::new(format!(
                "failed to create worktree at {}: path already in use",
                worktree_path.display()
            )));
        }

        // Unknown branches are created alongside the worktree, like the
        // real adapter's combined invocation.
        state.branches.insert(branch.to_string());
        state
            .worktrees
            .insert(worktree_path.clone(), branch.to_string());
        Ok(worktree_path)
    }

    async fn remove_worktree(&self, path: &Path) -> Result<(), RepoOperationError> {
        self.record(RepoCall::RemoveWorktree {
            path: path.to_path_buf(),
        });

        let worktree_path = super::absolute_path(path)?;
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        if state.worktrees.remove(&worktree_path).is_none() {
            return Err(RepoOperationError::new(format!(
                "failed to remove worktree at {}: not a working tree",
                worktree_path.display()
            )));
        }
        Ok(())
    }

    async fn push(&self, branch: &str) -> Result<(), RepoOperationError> {
        self.record(RepoCall::Push {
            branch: branch.to_string(),
        });

        let state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        if !state.branches.contains(branch) {
            return Err(RepoOperationError::new(format!(
                "failed to push branch {branch}: branch not found"
            )));
        }
        Ok(())
    }

    async fn create_pr(
        &self,
        title: &str,
        _body: &str,
        head: &str,
        base: &str,
    ) -> Result<String, RepoOperationError> {
        self.record(RepoCall::CreatePr {
            title: title.to_string(),
            head: head.to_string(),
            base: base.to_string(),
        });

        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.last_pr_number += 1;
        let id = state.last_pr_number.to_string();
        state.prs.insert(
            id.clone(),
            PRRecord {
                id: id.clone(),
                title: title.to_string(),
                branch: head.to_string(),
                base: base.to_string(),
                status: "open".to_string(),
                lines_added: 0,
                lines_deleted: 0,
                files_changed: 0,
                url: Some(format!("https://github.com/fake/fake/pull/{id}")),
                merged_at: None,
                closed_at: None,
            },
        );
        Ok(id)
    }

    async fn get_pr(&self, id: &str) -> Result<PRRecord, RepoOperationError> {
        self.record(RepoCall::GetPr { id: id.to_string() });

        let state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state
            .prs
            .get(id)
            .cloned()
            .ok_or_else(|| RepoOperationError::new(format!("failed to get PR {id}: not found")))
    }

    async fn merge_pr(&self, id: &str) -> Result<(), RepoOperationError> {
        self.record(RepoCall::MergePr { id: id.to_string() });

        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        let Some(pr) = state.prs.get_mut(id) else {
            return Err(RepoOperationError::new(format!(
                "failed to merge PR {id}: not found"
            )));
        };
        pr.status = "merged".to_string();
        let now = Utc::now().fixed_offset();
        pr.merged_at = Some(now);
        pr.closed_at = Some(now);
        Ok(())
    }

    async fn add_pr_comment(&self, id: &str, body: &str) -> Result<(), RepoOperationError> {
        self.record(RepoCall::AddPrComment {
            id: id.to_string(),
            body: body.to_string(),
        });

        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        if !state.prs.contains_key(id) {
            return Err(RepoOperationError::new(format!(
                "failed to add comment to PR {id}: not found"
            )));
        }
        state
            .comments
            .entry(id.to_string())
            .or_default()
            .push(body.to_string());
        Ok(())
    }

    async fn get_log(&self, filter: &LogFilter) -> Result<Vec<CommitInfo>, RepoOperationError> {
        self.record(RepoCall::GetLog {
            filter: filter.clone(),
        });

        let state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        let commits = state
            .log
            .iter()
            .filter(|c| match filter.since {
                Some(since) => c.timestamp >= since,
                None => true,
            })
            .take(filter.limit)
            .map(|c| CommitInfo {
                branch: filter.branch.clone(),
                ..c.clone()
            })
            .collect();
        Ok(commits)
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
