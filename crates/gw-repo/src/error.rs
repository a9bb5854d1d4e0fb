// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Error types for git command execution

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Errors produced while running git against the configured repository
///
/// `CommandFailed` displays the raw diagnostic text from git so it can be
/// handed to API callers verbatim.
#[derive(Debug, Error)]
pub enum VcsError {
    #[error("{stderr}")]
    CommandFailed { status: Option<i32>, stderr: String },

    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} {command} timed out after {}s", timeout.as_secs())]
    TimedOut {
        program: String,
        command: String,
        timeout: Duration,
    },

    #[error("malformed log line: {0}")]
    MalformedOutput(String),

    #[error("repository operation stopped: {0}")]
    Interrupted(String),

    #[error("no git repository found at {}", path.display())]
    NotARepository { path: PathBuf },
}

/// Result type for repository operations
pub type VcsResult<T> = Result<T, VcsError>;
