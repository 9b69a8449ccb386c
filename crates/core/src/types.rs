// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Domain records exchanged between the orchestrator and repo adapters

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

/// Snapshot of a pull request as reported by the forge.
///
/// Built fresh on every `get_pr` call; never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PRRecord {
    pub id: String,
    pub title: String,
    /// Head branch the PR was opened from.
    pub branch: String,
    /// Base branch the PR targets.
    pub base: String,
    /// Lower-cased forge state: "open", "closed", "merged", ...
    pub status: String,
    pub lines_added: u64,
    pub lines_deleted: u64,
    pub files_changed: u64,
    pub url: Option<String>,
    pub merged_at: Option<DateTime<FixedOffset>>,
    pub closed_at: Option<DateTime<FixedOffset>>,
}

/// One commit from a repository's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitInfo {
    pub sha: String,
    pub message: String,
    pub author: String,
    pub timestamp: DateTime<FixedOffset>,
    /// Branch filter the log query ran with, not the commit's own branch.
    pub branch: Option<String>,
}

/// Filters for a commit-log query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogFilter {
    /// Only commits at or after this instant.
    pub since: Option<DateTime<Utc>>,
    /// Ref whose history is walked; the checked-out branch when `None`.
    pub branch: Option<String>,
    /// Hard cap on returned entries.
    pub limit: usize,
}

impl Default for LogFilter {
    fn default() -> Self {
        Self {
            since: None,
            branch: None,
            limit: 50,
        }
    }
}
