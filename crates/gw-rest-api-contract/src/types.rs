// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! API contract types for the Gitway REST service

use gw_repo::{CommitRecord, SyncOutcome};
use serde::{Deserialize, Serialize};

/// Top-level `status` field carried by every repository response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Error,
}

impl ResponseStatus {
    pub fn is_success(self) -> bool {
        self == ResponseStatus::Success
    }
}

/// One commit as returned by `GET /api/commits`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitInfo {
    pub hash: String,
    pub author: String,
    pub date: String,
    pub message: String,
}

impl From<CommitRecord> for CommitInfo {
    fn from(record: CommitRecord) -> Self {
        Self {
            hash: record.hash,
            author: record.author,
            date: record.date,
            message: record.message,
        }
    }
}

/// `GET /api/commits` body: `commits` on success, `message` on error
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitsResponse {
    pub status: ResponseStatus,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub commits: Option<Vec<CommitInfo>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub message: Option<String>,
}

impl CommitsResponse {
    pub fn success(commits: Vec<CommitInfo>) -> Self {
        Self {
            status: ResponseStatus::Success,
            commits: Some(commits),
            message: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Error,
            commits: None,
            message: Some(message.into()),
        }
    }
}

/// `POST /api/push` body
///
/// A failed pull carries only `message`. A failed push still carries the
/// pull output, with the push's error text in `push_output`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncResponse {
    pub status: ResponseStatus,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub pull_output: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub push_output: Option<String>,
}

impl From<SyncOutcome> for SyncResponse {
    fn from(outcome: SyncOutcome) -> Self {
        match outcome {
            SyncOutcome::Completed {
                pull_output,
                push_output,
            } => Self {
                status: ResponseStatus::Success,
                message: None,
                pull_output: Some(pull_output),
                push_output: Some(push_output),
            },
            SyncOutcome::PullFailed { message } | SyncOutcome::Interrupted { message } => Self {
                status: ResponseStatus::Error,
                message: Some(message),
                pull_output: None,
                push_output: None,
            },
            SyncOutcome::PushFailed {
                pull_output,
                push_error,
            } => Self {
                status: ResponseStatus::Error,
                message: None,
                pull_output: Some(pull_output),
                push_output: Some(push_error),
            },
        }
    }
}

/// `GET /api/status` body; `data` holds git's text either way
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: ResponseStatus,
    pub data: String,
}

impl StatusResponse {
    pub fn success(data: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Success,
            data: data.into(),
        }
    }

    pub fn error(data: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Error,
            data: data.into(),
        }
    }
}

/// `GET /api/healthz` body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn commits_success_shape() {
        let body = CommitsResponse::success(vec![CommitInfo {
            hash: "abc123".into(),
            author: "Alice".into(),
            date: "2024-01-01".into(),
            message: "Fix bug".into(),
        }]);
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "status": "success",
                "commits": [
                    {"hash": "abc123", "author": "Alice", "date": "2024-01-01", "message": "Fix bug"}
                ]
            })
        );
    }

    #[test]
    fn commits_error_shape() {
        let body = CommitsResponse::error("fatal: bad revision");
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"status": "error", "message": "fatal: bad revision"})
        );
    }

    #[test]
    fn sync_shapes() {
        let completed = SyncResponse::from(SyncOutcome::Completed {
            pull_output: "Already up to date.".into(),
            push_output: "".into(),
        });
        assert_eq!(
            serde_json::to_value(&completed).unwrap(),
            json!({"status": "success", "pull_output": "Already up to date.", "push_output": ""})
        );

        let pull_failed = SyncResponse::from(SyncOutcome::PullFailed {
            message: "fatal: 'upstream' does not appear to be a git repository".into(),
        });
        assert_eq!(
            serde_json::to_value(&pull_failed).unwrap(),
            json!({
                "status": "error",
                "message": "fatal: 'upstream' does not appear to be a git repository"
            })
        );

        let push_failed = SyncResponse::from(SyncOutcome::PushFailed {
            pull_output: "Fast-forward".into(),
            push_error: "! [rejected]".into(),
        });
        assert_eq!(
            serde_json::to_value(&push_failed).unwrap(),
            json!({"status": "error", "pull_output": "Fast-forward", "push_output": "! [rejected]"})
        );
    }

    #[test]
    fn status_uses_data_for_both_outcomes() {
        assert_eq!(
            serde_json::to_value(StatusResponse::success("On branch main")).unwrap(),
            json!({"status": "success", "data": "On branch main"})
        );
        assert_eq!(
            serde_json::to_value(StatusResponse::error("fatal: not a git repository")).unwrap(),
            json!({"status": "error", "data": "fatal: not a git repository"})
        );
    }
}
