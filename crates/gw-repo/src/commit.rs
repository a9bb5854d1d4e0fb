// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Commit records parsed from `git log` output

use crate::error::{VcsError, VcsResult};

/// Field separator used in the log format
pub const FIELD_SEPARATOR: char = '|';

/// `--pretty` format producing one `hash|author|date|subject` line per commit
pub const LOG_PRETTY_FORMAT: &str = "--pretty=format:%h|%an|%ad|%s";

/// One entry of the repository history
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    pub hash: String,
    pub author: String,
    pub date: String,
    pub message: String,
}

impl CommitRecord {
    /// Parse a single `hash|author|date|subject` line
    ///
    /// The subject is everything after the third separator, so subjects that
    /// themselves contain `|` survive intact.
    pub fn parse_line(line: &str) -> VcsResult<Self> {
        let mut fields = line.splitn(4, FIELD_SEPARATOR);
        match (fields.next(), fields.next(), fields.next(), fields.next()) {
            (Some(hash), Some(author), Some(date), Some(message)) => Ok(Self {
                hash: hash.to_string(),
                author: author.to_string(),
                date: date.to_string(),
                message: message.to_string(),
            }),
            _ => Err(VcsError::MalformedOutput(line.to_string())),
        }
    }
}

/// Parse the full output of a log request, skipping empty lines
pub fn parse_log_output(output: &str) -> VcsResult<Vec<CommitRecord>> {
    output
        .lines()
        .filter(|line| !line.is_empty())
        .map(CommitRecord::parse_line)
        .collect()
}

/// Arguments for a log request returning at most `limit` commits
pub fn log_args(limit: usize) -> Vec<String> {
    vec![
        "log".to_string(),
        format!("-{}", limit),
        LOG_PRETTY_FORMAT.to_string(),
        "--date=short".to_string(),
    ]
}
