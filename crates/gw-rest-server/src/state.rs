// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Server state management

use crate::config::ServerConfig;
use gw_repo::GitRepository;
use std::sync::Arc;

/// Shared server state handed to every handler
#[derive(Clone)]
pub struct AppState {
    /// Server configuration
    pub config: Arc<ServerConfig>,

    /// The served working copy
    pub repository: Arc<GitRepository>,
}

impl AppState {
    /// Get configuration reference
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Number of commits the commits endpoint returns
    pub fn commit_limit(&self) -> usize {
        self.config.repository.commit_limit
    }
}
