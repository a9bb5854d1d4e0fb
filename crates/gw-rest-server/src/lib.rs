// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Gitway REST API server
//!
//! Exposes recent commits, pull-then-push synchronization and working tree
//! status of a single git working copy over HTTP with JSON responses.

pub mod config;
pub mod dependencies;
pub mod error;
pub mod handlers;
pub mod server;
pub mod state;

pub use config::{RepositoryConfig, ServerConfig};
pub use error::{ServerError, ServerResult};
pub use server::Server;
