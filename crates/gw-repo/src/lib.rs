// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Git access for Gitway.
//!
//! Every operation is a plain invocation of the `git` executable inside the
//! configured working copy. [`CommandRunner`] is the seam: production code
//! uses [`GitCommandRunner`], tests substitute scripted runners.

pub mod commit;
pub mod error;
pub mod repo;
pub mod runner;
pub mod test_helpers;

pub use commit::CommitRecord;
pub use error::{VcsError, VcsResult};
pub use repo::{DEFAULT_COMMIT_LIMIT, GitRepository, SyncOutcome, ensure_working_copy};
pub use runner::{CommandRunner, GitCommandRunner};
