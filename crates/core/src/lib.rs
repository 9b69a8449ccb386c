//! herd-core: Core library for the herd orchestrator
//!
//! This crate provides:
//! - Domain records exchanged with repository adapters (PRs, commits)
//! - The `RepoAdapter` trait that forge-specific backends implement

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod repo;
pub mod types;

// Re-exports
pub use repo::{RepoAdapter, RepoOperationError};
pub use types::{CommitInfo, LogFilter, PRRecord};
