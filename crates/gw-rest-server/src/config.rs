// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Server configuration

use crate::error::{ServerError, ServerResult};
use gw_repo::DEFAULT_COMMIT_LIMIT;
use serde::Deserialize;
use std::net::{Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default listen port
pub const DEFAULT_PORT: u16 = 5000;

/// Server configuration
///
/// Built once at startup and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// Address to bind the server to
    pub bind_addr: SocketAddr,

    /// Enable permissive CORS headers for development
    pub enable_cors: bool,

    /// The repository served by this instance
    pub repository: RepositoryConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from((Ipv4Addr::UNSPECIFIED, DEFAULT_PORT)),
            enable_cors: false,
            repository: RepositoryConfig::default(),
        }
    }
}

/// Repository served by the API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryConfig {
    /// Path of the working copy; git runs with this as its working directory
    pub path: PathBuf,

    /// Remote used for pull and push
    pub remote: String,

    /// Branch used for pull and push
    pub branch: String,

    /// Name or path of the git executable
    pub git_binary: String,

    /// Number of commits returned by the commits endpoint
    pub commit_limit: usize,

    /// Optional limit on a single git invocation. `None` waits indefinitely.
    pub command_timeout: Option<Duration>,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("."),
            remote: "origin".to_string(),
            branch: "main".to_string(),
            git_binary: "git".to_string(),
            commit_limit: DEFAULT_COMMIT_LIMIT,
            command_timeout: None,
        }
    }
}

/// Contents of a TOML configuration file; every key is optional
///
/// ```toml
/// bind = "0.0.0.0:5000"
/// cors = false
///
/// [repository]
/// path = "/srv/checkout"
/// remote = "origin"
/// branch = "main"
/// git-binary = "git"
/// commit-limit = 3
/// command-timeout-secs = 120
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileConfig {
    pub bind: Option<SocketAddr>,
    pub cors: Option<bool>,
    #[serde(default)]
    pub repository: FileRepositoryConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileRepositoryConfig {
    pub path: Option<PathBuf>,
    pub remote: Option<String>,
    pub branch: Option<String>,
    pub git_binary: Option<String>,
    pub commit_limit: Option<usize>,
    pub command_timeout_secs: Option<u64>,
}

impl FileConfig {
    /// Read and parse a TOML configuration file
    pub fn load(path: &Path) -> ServerResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|err| {
            ServerError::Config(format!("cannot read {}: {}", path.display(), err))
        })?;
        Self::parse(&contents)
            .map_err(|err| ServerError::Config(format!("{}: {}", path.display(), err)))
    }

    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }
}

impl ServerConfig {
    /// Overlay values present in a configuration file
    pub fn merge_file(mut self, file: FileConfig) -> Self {
        if let Some(bind) = file.bind {
            self.bind_addr = bind;
        }
        if let Some(cors) = file.cors {
            self.enable_cors = cors;
        }

        let repo = file.repository;
        if let Some(path) = repo.path {
            self.repository.path = path;
        }
        if let Some(remote) = repo.remote {
            self.repository.remote = remote;
        }
        if let Some(branch) = repo.branch {
            self.repository.branch = branch;
        }
        if let Some(git_binary) = repo.git_binary {
            self.repository.git_binary = git_binary;
        }
        if let Some(limit) = repo.commit_limit {
            self.repository.commit_limit = limit;
        }
        if let Some(secs) = repo.command_timeout_secs {
            self.repository.command_timeout = Some(Duration::from_secs(secs));
        }
        self
    }

    /// Reject settings the server cannot run with
    pub fn validate(&self) -> ServerResult<()> {
        let repo = &self.repository;
        if repo.commit_limit == 0 {
            return Err(ServerError::Config(
                "commit limit must be at least 1".to_string(),
            ));
        }
        if repo.remote.trim().is_empty() {
            return Err(ServerError::Config("remote name must not be empty".to_string()));
        }
        if repo.branch.trim().is_empty() {
            return Err(ServerError::Config("branch name must not be empty".to_string()));
        }
        if repo.command_timeout == Some(Duration::ZERO) {
            return Err(ServerError::Config(
                "command timeout must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
