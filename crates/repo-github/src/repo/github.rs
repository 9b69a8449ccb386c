// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! GitHub repository adapter
//!
//! Translation glue between the orchestrator's repo vocabulary and the
//! git/gh CLIs. Each operation issues at most two child-process
//! invocations through the [`CommandRunner`] seam and parses the output
//! back into `herd-core` records. No state is retained beyond the
//! repository identity resolved at construction.

use crate::runner::{CommandOutput, CommandRunner, ProcessRunner};
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use herd_core::repo::{RepoAdapter, RepoOperationError};
use herd_core::types::{CommitInfo, LogFilter, PRRecord};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// JSON fields requested from `gh pr view`.
const PR_VIEW_FIELDS: &str = "number,title,body,state,headRefName,baseRefName,url,additions,deletions,changedFiles,mergedAt,closedAt";

/// Per-commit format handed to `git log`: hash, author, ISO date, subject.
const LOG_FORMAT: &str = "%H|||%an|||%ai|||%s";

const LOG_DELIMITER: &str = "|||";

/// GitHub-backed repository adapter.
///
/// Owner and name are either supplied explicitly or detected once from the
/// `origin` remote. Detection is best-effort: when the remote cannot be
/// read or is not a recognizable GitHub URL, both stay empty and no error
/// is raised. Callers that need a reliable identity pass one explicitly.
#[derive(Clone)]
pub struct GitHubRepoAdapter<R = ProcessRunner> {
    root: PathBuf,
    owner: String,
    name: String,
    runner: R,
}

impl GitHubRepoAdapter<ProcessRunner> {
    /// Open an adapter for the repository at `root`, auto-detecting
    /// owner/name from the `origin` remote.
    pub async fn open(root: impl Into<PathBuf>) -> Self {
        Self::with_runner(root, ProcessRunner::new()).await
    }

    /// Open an adapter with an explicit owner/name; no detection runs.
    pub fn with_repo(
        root: impl Into<PathBuf>,
        owner: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self::with_repo_and_runner(root, owner, name, ProcessRunner::new())
    }
}

impl<R: CommandRunner> GitHubRepoAdapter<R> {
    /// Like [`GitHubRepoAdapter::open`] with an injected command runner.
    pub async fn with_runner(root: impl Into<PathBuf>, runner: R) -> Self {
        let root = root.into();
        let (owner, name) = detect_repo(&runner, &root).await.unwrap_or_default();
        Self {
            root,
            owner,
            name,
            runner,
        }
    }

    /// Like [`GitHubRepoAdapter::with_repo`] with an injected command runner.
    pub fn with_repo_and_runner(
        root: impl Into<PathBuf>,
        owner: impl Into<String>,
        name: impl Into<String>,
        runner: R,
    ) -> Self {
        Self {
            root: root.into(),
            owner: owner.into(),
            name: name.into(),
            runner,
        }
    }

    /// Repository owner; empty when auto-detection failed.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Repository name; empty when auto-detection failed.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Repository root the adapter operates in.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn slug(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }

    /// Run a tool in the repo root, mapping both spawn failures and
    /// non-zero exits into a `RepoOperationError` that names `what`.
    async fn run_checked(
        &self,
        program: &str,
        args: &[&str],
        what: &str,
    ) -> Result<CommandOutput, RepoOperationError> {
        let output = self
            .runner
            .run(program, args, &self.root)
            .await
            .map_err(|e| RepoOperationError::new(format!("failed to {what}: {e}")))?;

        if !output.success() {
            return Err(RepoOperationError::new(format!(
                "failed to {what}: {}",
                output.stderr.trim()
            )));
        }

        Ok(output)
    }
}

#[async_trait]
impl<R: CommandRunner> RepoAdapter for GitHubRepoAdapter<R> {
    async fn create_branch(&self, name: &str, base: &str) -> Result<String, RepoOperationError> {
        self.run_checked(
            "git",
            &["branch", name, base],
            &format!("create branch {name}"),
        )
        .await?;
        Ok(name.to_string())
    }

    async fn create_worktree(
        &self,
        branch: &str,
        path: &Path,
    ) -> Result<PathBuf, RepoOperationError> {
        let worktree_path = super::absolute_path(path)?;
        let path_arg = worktree_path.to_string_lossy().into_owned();
        let what = format!("create worktree at {}", worktree_path.display());

        // Probe whether the branch exists. A spawn failure here is fatal;
        // a clean non-zero exit just means the branch is new.
        let probe = self
            .runner
            .run("git", &["rev-parse", "--verify", branch], &self.root)
            .await
            .map_err(|e| RepoOperationError::new(format!("failed to {what}: {e}")))?;

        if probe.success() {
            self.run_checked("git", &["worktree", "add", &path_arg, branch], &what)
                .await?;
        } else {
            self.run_checked("git", &["worktree", "add", &path_arg, "-b", branch], &what)
                .await?;
        }

        Ok(worktree_path)
    }

    async fn remove_worktree(&self, path: &Path) -> Result<(), RepoOperationError> {
        let path_arg = path.to_string_lossy().into_owned();
        self.run_checked(
            "git",
            &["worktree", "remove", &path_arg],
            &format!("remove worktree at {}", path.display()),
        )
        .await?;
        Ok(())
    }

    async fn push(&self, branch: &str) -> Result<(), RepoOperationError> {
        self.run_checked(
            "git",
            &["push", "-u", "origin", branch],
            &format!("push branch {branch}"),
        )
        .await?;
        Ok(())
    }

    async fn create_pr(
        &self,
        title: &str,
        body: &str,
        head: &str,
        base: &str,
    ) -> Result<String, RepoOperationError> {
        let slug = self.slug();
        let output = self
            .run_checked(
                "gh",
                &[
                    "pr", "create", "--title", title, "--body", body, "--head", head, "--base",
                    base, "--repo", &slug,
                ],
                "create PR",
            )
            .await?;

        // gh prints the PR URL on stdout; the final path segment is the
        // PR number.
        let url = output.stdout.trim();
        let id = url.rsplit('/').next().unwrap_or(url);
        Ok(id.to_string())
    }

    async fn get_pr(&self, id: &str) -> Result<PRRecord, RepoOperationError> {
        let slug = self.slug();
        let output = self
            .run_checked(
                "gh",
                &["pr", "view", id, "--repo", &slug, "--json", PR_VIEW_FIELDS],
                &format!("get PR {id}"),
            )
            .await?;

        let view: PrView = serde_json::from_str(&output.stdout)
            .map_err(|e| RepoOperationError::new(format!("failed to parse PR data: {e}")))?;

        Ok(PRRecord {
            id: view.number.to_string(),
            title: view.title,
            branch: view.head_ref_name,
            base: view.base_ref_name,
            status: view.state.to_lowercase(),
            lines_added: view.additions,
            lines_deleted: view.deletions,
            files_changed: view.changed_files,
            url: view.url,
            merged_at: parse_pr_timestamp(view.merged_at.as_deref())?,
            closed_at: parse_pr_timestamp(view.closed_at.as_deref())?,
        })
    }

    async fn merge_pr(&self, id: &str) -> Result<(), RepoOperationError> {
        let slug = self.slug();
        // --merge: always a merge commit, never squash or rebase.
        self.run_checked(
            "gh",
            &["pr", "merge", id, "--repo", &slug, "--merge"],
            &format!("merge PR {id}"),
        )
        .await?;
        Ok(())
    }

    async fn add_pr_comment(&self, id: &str, body: &str) -> Result<(), RepoOperationError> {
        let endpoint = format!("repos/{}/{}/issues/{id}/comments", self.owner, self.name);
        let body_field = format!("body={body}");
        self.run_checked(
            "gh",
            &["api", &endpoint, "-f", &body_field],
            &format!("add comment to PR {id}"),
        )
        .await?;
        Ok(())
    }

    async fn get_log(&self, filter: &LogFilter) -> Result<Vec<CommitInfo>, RepoOperationError> {
        let mut args: Vec<String> = vec!["log".to_string()];
        if let Some(since) = filter.since {
            args.push(format!("--since={}", since.to_rfc3339()));
        }
        if let Some(branch) = &filter.branch {
            args.push(branch.clone());
        }
        args.push(format!("-{}", filter.limit));
        args.push(format!("--format={LOG_FORMAT}"));

        let arg_refs: Vec<&str> = args.iter().map(String::as_str).collect();
        let output = self.run_checked("git", &arg_refs, "get git log").await?;

        Ok(parse_log(&output.stdout, filter.branch.as_deref()))
    }
}

/// `gh pr view --json` payload. `number` is required; everything else
/// degrades to a default when gh omits it.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PrView {
    number: u64,
    #[serde(default)]
    title: String,
    #[serde(default)]
    state: String,
    #[serde(default)]
    head_ref_name: String,
    #[serde(default = "default_base")]
    base_ref_name: String,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    additions: u64,
    #[serde(default)]
    deletions: u64,
    #[serde(default)]
    changed_files: u64,
    #[serde(default)]
    merged_at: Option<String>,
    #[serde(default)]
    closed_at: Option<String>,
}

fn default_base() -> String {
    "main".to_string()
}

/// Read the `origin` remote URL and extract (owner, name). Any failure,
/// from a missing git binary to an unrecognized URL, yields `None`.
async fn detect_repo<R: CommandRunner>(runner: &R, root: &Path) -> Option<(String, String)> {
    let output = runner
        .run("git", &["remote", "get-url", "origin"], root)
        .await
        .ok()?;
    if !output.success() {
        return None;
    }
    parse_remote_url(output.stdout.trim())
}

/// Extract (owner, name) from a GitHub remote URL.
///
/// Recognizes the scp-style `git@github.com:owner/name[.git]` and plain
/// `https://github.com/owner/name[.git]` forms. Anything that does not
/// yield exactly two non-empty segments is rejected.
fn parse_remote_url(url: &str) -> Option<(String, String)> {
    if !url.contains("github.com") {
        return None;
    }
    let path = url.strip_suffix(".git").unwrap_or(url);

    let segments: Vec<&str> = if path.starts_with("git@") {
        let (_, rest) = path.rsplit_once(':')?;
        rest.split('/').collect()
    } else {
        let mut tail = path.rsplit('/');
        let name = tail.next()?;
        let owner = tail.next()?;
        vec![owner, name]
    };

    match segments.as_slice() {
        [owner, name] if !owner.is_empty() && !name.is_empty() => {
            Some(((*owner).to_string(), (*name).to_string()))
        }
        _ => None,
    }
}

/// Parse an optional RFC 3339 timestamp from gh output. A trailing `Z` is
/// UTC; chrono's parser already reads it as offset +00:00.
fn parse_pr_timestamp(
    value: Option<&str>,
) -> Result<Option<DateTime<FixedOffset>>, RepoOperationError> {
    let Some(raw) = value else {
        return Ok(None);
    };
    DateTime::parse_from_rfc3339(raw).map(Some).map_err(|e| {
        RepoOperationError::new(format!("failed to parse PR data: bad timestamp {raw:?}: {e}"))
    })
}

/// Parse `git log --format=%H|||%an|||%ai|||%s` output.
///
/// Lines without exactly four fields, and lines whose timestamp does not
/// parse, are dropped rather than reported; the tool occasionally emits
/// trailing blanks and the caller wants commits, not diagnostics.
fn parse_log(stdout: &str, branch: Option<&str>) -> Vec<CommitInfo> {
    let mut commits = Vec::new();
    for line in stdout.lines() {
        let fields: Vec<&str> = line.split(LOG_DELIMITER).collect();
        let [sha, author, raw_timestamp, message] = fields.as_slice() else {
            continue;
        };

        // %ai emits "2024-02-14 12:00:00 +0000"; swap the first space for
        // a T to get an offset-aware parseable form.
        let normalized = raw_timestamp.replacen(' ', "T", 1);
        let Ok(timestamp) = DateTime::parse_from_str(&normalized, "%Y-%m-%dT%H:%M:%S %z") else {
            continue;
        };

        commits.push(CommitInfo {
            sha: (*sha).to_string(),
            message: (*message).to_string(),
            author: (*author).to_string(),
            timestamp,
            branch: branch.map(str::to_string),
        });
    }
    commits
}

#[cfg(test)]
#[path = "github_tests.rs"]
mod tests;
