// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::repo::{FakeRepoAdapter, RepoCall};
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;

/// A writer that captures log output for testing
#[derive(Clone, Default)]
struct CapturedLogs {
    logs: Arc<Mutex<Vec<u8>>>,
}

impl CapturedLogs {
    fn new() -> Self {
        Self::default()
    }

    fn contents(&self) -> String {
        let logs = self.logs.lock().unwrap();
        String::from_utf8_lossy(&logs).to_string()
    }
}

impl std::io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.logs.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Run a test with captured tracing output
fn with_tracing<F, Fut>(f: F) -> (String, Fut::Output)
where
    F: FnOnce() -> Fut,
    Fut: std::future::Future,
{
    let logs = CapturedLogs::new();
    let logs_clone = logs.clone();

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_writer(logs_clone)
        .with_ansi(false)
        .without_time()
        .finish();

    let result = tracing::subscriber::with_default(subscriber, || {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap()
            .block_on(f())
    });

    (logs.contents(), result)
}

#[test]
fn traced_create_worktree_logs_entry_and_completion() {
    let (logs, result) = with_tracing(|| async {
        let fake = FakeRepoAdapter::new();
        let traced = TracedRepoAdapter::new(fake);

        traced
            .create_worktree("feature/test", Path::new("/tmp/test-worktree"))
            .await
    });

    assert!(result.is_ok(), "create_worktree should succeed: {result:?}");

    assert!(
        logs.contains("repo.create_worktree"),
        "Should log span name. Logs:\n{logs}"
    );
    assert!(
        logs.contains("feature/test"),
        "Should log branch name. Logs:\n{logs}"
    );
    assert!(
        logs.contains("adding worktree"),
        "Should log entry message. Logs:\n{logs}"
    );
    assert!(
        logs.contains("worktree added"),
        "Should log completion. Logs:\n{logs}"
    );
    assert!(
        logs.contains("elapsed_ms"),
        "Should log timing. Logs:\n{logs}"
    );
}

#[test]
fn traced_push_logs_failure() {
    let (logs, result) = with_tracing(|| async {
        let fake = FakeRepoAdapter::new();
        let traced = TracedRepoAdapter::new(fake);

        // No branch seeded, so the push fails.
        traced.push("missing-branch").await
    });

    assert!(result.is_err());
    assert!(
        logs.contains("repo.push"),
        "Should log span name. Logs:\n{logs}"
    );
    assert!(
        logs.contains("push failed"),
        "Should log the failure. Logs:\n{logs}"
    );
}

#[test]
fn traced_remove_worktree_warns_not_errors_on_failure() {
    let (logs, result) = with_tracing(|| async {
        let fake = FakeRepoAdapter::new();
        let traced = TracedRepoAdapter::new(fake);

        traced.remove_worktree(Path::new("/tmp/never-created")).await
    });

    assert!(result.is_err());
    assert!(
        logs.contains("worktree remove failed"),
        "Should warn about the failure. Logs:\n{logs}"
    );
    assert!(
        logs.contains("WARN"),
        "Removal failure is a warning, not an error. Logs:\n{logs}"
    );
}

#[test]
fn traced_create_pr_logs_the_assigned_id() {
    let (logs, result) = with_tracing(|| async {
        let fake = FakeRepoAdapter::new();
        let traced = TracedRepoAdapter::new(fake);

        traced.create_pr("Test PR", "body", "feature/test", "main").await
    });

    assert_eq!(result.unwrap(), "1");
    assert!(
        logs.contains("repo.create_pr"),
        "Should log span name. Logs:\n{logs}"
    );
    assert!(logs.contains("PR opened"), "Should log completion. Logs:\n{logs}");
}

#[tokio::test]
async fn traced_delegates_to_inner() {
    let fake = FakeRepoAdapter::new();
    let traced = TracedRepoAdapter::new(fake.clone());

    traced.create_branch("feature/branch", "main").await.unwrap();
    traced
        .create_worktree("feature/branch", Path::new("/tmp/worktree"))
        .await
        .unwrap();

    let calls = fake.calls();
    assert_eq!(calls.len(), 2);
    match &calls[1] {
        RepoCall::CreateWorktree { branch, path } => {
            assert_eq!(branch, "feature/branch");
            assert_eq!(path, Path::new("/tmp/worktree"));
        }
        other => panic!("expected CreateWorktree call, got {other:?}"),
    }
}
