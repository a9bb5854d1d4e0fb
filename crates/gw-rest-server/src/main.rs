// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Gitway REST API server binary

use clap::Parser;
use gw_logging::CliLoggingArgs;
use gw_rest_server::config::FileConfig;
use gw_rest_server::{Server, ServerConfig, ServerResult};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(author, version, about = "HTTP API for a single git working copy", long_about = None)]
struct Args {
    /// Bind address for the server [default: 0.0.0.0:5000]
    #[arg(short, long, env = "GITWAY_BIND")]
    bind: Option<SocketAddr>,

    /// Path of the git working copy [default: current directory]
    #[arg(short, long, env = "GITWAY_REPO")]
    repo: Option<PathBuf>,

    /// Remote to pull from and push to [default: origin]
    #[arg(long, env = "GITWAY_REMOTE")]
    remote: Option<String>,

    /// Branch to pull and push [default: main]
    #[arg(long, env = "GITWAY_BRANCH")]
    branch: Option<String>,

    /// git executable to run [default: git]
    #[arg(long, env = "GITWAY_GIT_BINARY")]
    git_binary: Option<String>,

    /// Number of commits returned by /api/commits [default: 3]
    #[arg(long, env = "GITWAY_COMMIT_LIMIT")]
    commit_limit: Option<usize>,

    /// Kill git commands that run longer than this many seconds (no limit when unset)
    #[arg(long, env = "GITWAY_COMMAND_TIMEOUT_SECS")]
    command_timeout_secs: Option<u64>,

    /// Enable permissive CORS for development
    #[arg(long)]
    cors: bool,

    /// TOML configuration file; command-line values take precedence
    #[arg(short, long, env = "GITWAY_CONFIG")]
    config: Option<PathBuf>,

    #[command(flatten)]
    logging: CliLoggingArgs,
}

impl Args {
    fn into_config(self) -> ServerResult<ServerConfig> {
        let mut config = ServerConfig::default();
        if let Some(path) = &self.config {
            config = config.merge_file(FileConfig::load(path)?);
        }

        if let Some(bind) = self.bind {
            config.bind_addr = bind;
        }
        if self.cors {
            config.enable_cors = true;
        }
        let repo = &mut config.repository;
        if let Some(path) = self.repo {
            repo.path = path;
        }
        if let Some(remote) = self.remote {
            repo.remote = remote;
        }
        if let Some(branch) = self.branch {
            repo.branch = branch;
        }
        if let Some(git_binary) = self.git_binary {
            repo.git_binary = git_binary;
        }
        if let Some(limit) = self.commit_limit {
            repo.commit_limit = limit;
        }
        if let Some(secs) = self.command_timeout_secs {
            repo.command_timeout = Some(Duration::from_secs(secs));
        }

        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut args = Args::parse();

    let logging = std::mem::take(&mut args.logging);
    logging.init("gitway")?;

    let config = args.into_config()?;
    tracing::debug!(?config, "resolved configuration");

    let server = match Server::new(config) {
        Ok(server) => server,
        Err(err) => {
            tracing::error!("Refusing to start: {}", err);
            return Err(err.into());
        }
    };
    server.run().await?;

    Ok(())
}
