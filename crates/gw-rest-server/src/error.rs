// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Server error types

use gw_repo::VcsError;

/// Server result type
pub type ServerResult<T> = Result<T, ServerError>;

/// Errors that stop the server from starting or running
///
/// Per-request git failures never surface here; handlers turn them into
/// JSON error bodies.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}. Clone the repository to this location first")]
    Repository(#[from] VcsError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}
