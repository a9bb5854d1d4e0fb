// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Repository operations built on a [`CommandRunner`]

use crate::commit::{CommitRecord, log_args, parse_log_output};
use crate::error::{VcsError, VcsResult};
use crate::runner::CommandRunner;
use std::future::Future;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

/// Default number of commits returned by [`GitRepository::recent_commits`]
pub const DEFAULT_COMMIT_LIMIT: usize = 3;

/// Outcome of a pull-then-push synchronization
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Both steps succeeded
    Completed {
        pull_output: String,
        push_output: String,
    },
    /// The pull failed; push was not attempted
    PullFailed { message: String },
    /// The pull succeeded but the push failed. The working copy stays pulled.
    PushFailed {
        pull_output: String,
        push_error: String,
    },
    /// The operation stopped abnormally before reporting a result
    Interrupted { message: String },
}

impl SyncOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SyncOutcome::Completed { .. })
    }
}

/// A single working copy with a fixed remote and branch
///
/// Every operation runs on its own task and holds the repository lock for its
/// whole duration, so concurrent requests never run git against the working
/// copy at the same time and a pull is never interleaved with another
/// request's push. Dropping the returned future does not stop an operation
/// that has started: it runs to completion and keeps the lock until then.
#[derive(Clone)]
pub struct GitRepository {
    inner: Arc<Inner>,
}

struct Inner {
    runner: Arc<dyn CommandRunner>,
    remote: String,
    branch: String,
    lock: Mutex<()>,
}

impl GitRepository {
    pub fn new(
        runner: Arc<dyn CommandRunner>,
        remote: impl Into<String>,
        branch: impl Into<String>,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                runner,
                remote: remote.into(),
                branch: branch.into(),
                lock: Mutex::new(()),
            }),
        }
    }

    pub fn remote(&self) -> &str {
        &self.inner.remote
    }

    pub fn branch(&self) -> &str {
        &self.inner.branch
    }

    /// The most recent `limit` commits on the current branch, newest first
    pub async fn recent_commits(&self, limit: usize) -> VcsResult<Vec<CommitRecord>> {
        self.detached(move |inner| async move {
            let output = inner.runner.run(&log_args(limit)).await?;
            let mut commits = parse_log_output(&output)?;
            commits.truncate(limit);
            Ok::<_, VcsError>(commits)
        })
        .await?
    }

    /// Pull from the configured remote/branch, then push to it
    ///
    /// Failures are reported in the returned [`SyncOutcome`]; nothing is
    /// retried or rolled back.
    pub async fn synchronize(&self) -> SyncOutcome {
        self.detached(|inner| async move { inner.synchronize().await })
            .await
            .unwrap_or_else(|err| SyncOutcome::Interrupted {
                message: err.to_string(),
            })
    }

    /// Raw `git status` text
    pub async fn status(&self) -> VcsResult<String> {
        self.detached(|inner| async move { inner.runner.run(&["status".to_string()]).await })
            .await?
    }

    /// Run `operation` under the repository lock on a spawned task
    async fn detached<F, Fut, T>(&self, operation: F) -> VcsResult<T>
    where
        F: FnOnce(Arc<Inner>) -> Fut + Send + 'static,
        Fut: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        let inner = Arc::clone(&self.inner);
        let task = tokio::spawn(async move {
            let _guard = inner.lock.lock().await;
            operation(Arc::clone(&inner)).await
        });
        task.await.map_err(|err| {
            warn!("repository task ended abnormally: {}", err);
            VcsError::Interrupted(err.to_string())
        })
    }
}

impl Inner {
    async fn synchronize(&self) -> SyncOutcome {
        let pull_output = match self.runner.run(&self.remote_args("pull")).await {
            Ok(output) => output,
            Err(err) => {
                warn!(remote = %self.remote, branch = %self.branch, "pull failed, skipping push");
                return SyncOutcome::PullFailed {
                    message: err.to_string(),
                };
            }
        };

        match self.runner.run(&self.remote_args("push")).await {
            Ok(push_output) => {
                info!(remote = %self.remote, branch = %self.branch, "synchronized");
                SyncOutcome::Completed {
                    pull_output,
                    push_output,
                }
            }
            Err(err) => {
                warn!(
                    remote = %self.remote,
                    branch = %self.branch,
                    "push failed after a successful pull; working copy left pulled"
                );
                SyncOutcome::PushFailed {
                    pull_output,
                    push_error: err.to_string(),
                }
            }
        }
    }

    fn remote_args(&self, verb: &str) -> Vec<String> {
        vec![verb.to_string(), self.remote.clone(), self.branch.clone()]
    }
}

/// Check that `path` is a git working copy (has a `.git` entry)
///
/// `.git` may be a directory or, for linked worktrees and submodules, a file.
pub fn ensure_working_copy(path: &Path) -> VcsResult<()> {
    if path.join(".git").exists() {
        Ok(())
    } else {
        Err(VcsError::NotARepository {
            path: path.to_path_buf(),
        })
    }
}
