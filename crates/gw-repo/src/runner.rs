// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Command execution against the repository working copy

use crate::error::{VcsError, VcsResult};
use async_trait::async_trait;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Output, Stdio};
use std::time::Duration;
use tokio::io::AsyncReadExt;
use tokio::process::{Child, Command};
use tracing::{debug, warn};

/// Runs the version-control binary with a fixed working directory
///
/// Implementations return the trimmed standard output when the process exits
/// with status zero and [`VcsError::CommandFailed`] carrying the trimmed
/// standard error otherwise.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run the binary with `args` appended after its name
    async fn run(&self, args: &[String]) -> VcsResult<String>;
}

/// [`CommandRunner`] that spawns the `git` executable directly
///
/// Arguments are passed as an argument vector; no shell is involved, so no
/// quoting rules apply. A started command is never killed because the caller
/// stopped waiting for it; only the optional timeout kills it.
#[derive(Debug, Clone)]
pub struct GitCommandRunner {
    program: String,
    working_dir: PathBuf,
    timeout: Option<Duration>,
}

impl GitCommandRunner {
    /// Runner for `git` in `working_dir`
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        Self {
            program: "git".to_string(),
            working_dir: working_dir.into(),
            timeout: None,
        }
    }

    /// Use a different binary (for example an absolute path to git)
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Kill and fail any command that runs longer than `timeout`
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    fn command(&self, args: &[String]) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(args)
            .current_dir(&self.working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            // git must never block waiting for credentials on a terminal we don't have
            .env("GIT_TERMINAL_PROMPT", "0");
        cmd
    }
}

#[async_trait]
impl CommandRunner for GitCommandRunner {
    async fn run(&self, args: &[String]) -> VcsResult<String> {
        let command_line = args.join(" ");
        debug!(
            program = %self.program,
            cwd = %self.working_dir.display(),
            "running {} {}",
            self.program,
            command_line
        );

        let spawn_error = |source: io::Error| VcsError::Spawn {
            program: self.program.clone(),
            source,
        };
        let mut child = self.command(args).spawn().map_err(spawn_error)?;
        let output = match self.timeout {
            Some(limit) => {
                let waited = tokio::time::timeout(limit, collect_output(&mut child)).await;
                match waited {
                    Ok(result) => result,
                    Err(_) => {
                        warn!("{} {} timed out after {:?}", self.program, command_line, limit);
                        if let Err(err) = child.kill().await {
                            warn!("failed to kill {} {}: {}", self.program, command_line, err);
                        }
                        return Err(VcsError::TimedOut {
                            program: self.program.clone(),
                            command: command_line,
                            timeout: limit,
                        });
                    }
                }
            }
            None => collect_output(&mut child).await,
        }
        .map_err(spawn_error)?;

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            warn!(
                status = ?output.status.code(),
                "{} {} failed: {}",
                self.program,
                command_line,
                stderr
            );
            Err(VcsError::CommandFailed {
                status: output.status.code(),
                stderr,
            })
        }
    }
}

/// Wait for `child` to exit while draining both output pipes
async fn collect_output(child: &mut Child) -> io::Result<Output> {
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let mut stdout_pipe = child.stdout.take();
    let mut stderr_pipe = child.stderr.take();

    let status = {
        let read_stdout = async {
            match stdout_pipe.as_mut() {
                Some(pipe) => pipe.read_to_end(&mut stdout).await.map(|_| ()),
                None => Ok(()),
            }
        };
        let read_stderr = async {
            match stderr_pipe.as_mut() {
                Some(pipe) => pipe.read_to_end(&mut stderr).await.map(|_| ()),
                None => Ok(()),
            }
        };
        let (status, read_out, read_err) = tokio::join!(child.wait(), read_stdout, read_stderr);
        read_out?;
        read_err?;
        status?
    };

    Ok(Output {
        status,
        stdout,
        stderr,
    })
}
