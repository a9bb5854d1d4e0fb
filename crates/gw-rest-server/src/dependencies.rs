// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Dependency wiring for the REST server

use crate::{config::ServerConfig, error::ServerResult, state::AppState};
use gw_repo::{CommandRunner, GitCommandRunner, GitRepository, ensure_working_copy};
use std::sync::Arc;

/// Default dependency builder: a git process runner in the configured working copy
pub struct DefaultServerDependencies {
    state: AppState,
}

impl DefaultServerDependencies {
    /// Validate the configuration and check that the repository path is a git
    /// working copy before building any state
    pub fn new(config: ServerConfig) -> ServerResult<Self> {
        config.validate()?;
        ensure_working_copy(&config.repository.path)?;

        let runner = GitCommandRunner::new(config.repository.path.clone())
            .with_program(config.repository.git_binary.clone())
            .with_timeout(config.repository.command_timeout);

        Ok(Self::with_runner(config, Arc::new(runner)))
    }

    /// Wire the server to an arbitrary [`CommandRunner`] without touching the filesystem
    pub fn with_runner(config: ServerConfig, runner: Arc<dyn CommandRunner>) -> Self {
        let repository = Arc::new(GitRepository::new(
            runner,
            config.repository.remote.clone(),
            config.repository.branch.clone(),
        ));

        Self {
            state: AppState {
                config: Arc::new(config),
                repository,
            },
        }
    }

    /// Consume the dependency builder and return the resulting app state
    pub fn into_state(self) -> AppState {
        self.state
    }
}
