// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Test doubles for code that depends on a [`CommandRunner`]

use crate::error::{VcsError, VcsResult};
use crate::runner::CommandRunner;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

/// [`CommandRunner`] that replays queued results and records every call
///
/// Calls beyond the queued results fail with a `CommandFailed` error whose
/// text names the unexpected command. With a delay, every call is recorded
/// immediately and answered only after sleeping, like a slow git process.
#[derive(Debug, Default)]
pub struct ScriptedRunner {
    responses: Mutex<VecDeque<Result<String, String>>>,
    calls: Mutex<Vec<Vec<String>>>,
    delay: Option<Duration>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sleep for `delay` inside every call before answering
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Queue a successful run producing `stdout`
    pub fn succeed(self, stdout: impl Into<String>) -> Self {
        self.push(Ok(stdout.into()))
    }

    /// Queue a failed run producing `stderr`
    pub fn fail(self, stderr: impl Into<String>) -> Self {
        self.push(Err(stderr.into()))
    }

    fn push(self, response: Result<String, String>) -> Self {
        self.responses.lock().unwrap_or_else(|e| e.into_inner()).push_back(response);
        self
    }

    /// Argument vectors of every call made so far, in order
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Number of calls whose first argument is `verb`
    pub fn count(&self, verb: &str) -> usize {
        self.calls().iter().filter(|args| args.first().map(String::as_str) == Some(verb)).count()
    }
}

#[async_trait]
impl CommandRunner for ScriptedRunner {
    async fn run(&self, args: &[String]) -> VcsResult<String> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).push(args.to_vec());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let next = self.responses.lock().unwrap_or_else(|e| e.into_inner()).pop_front();
        match next {
            Some(Ok(stdout)) => Ok(stdout),
            Some(Err(stderr)) => Err(VcsError::CommandFailed {
                status: Some(1),
                stderr,
            }),
            None => Err(VcsError::CommandFailed {
                status: None,
                stderr: format!("unexpected command: git {}", args.join(" ")),
            }),
        }
    }
}
