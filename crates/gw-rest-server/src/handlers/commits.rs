// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Recent commit history

use crate::state::AppState;
use axum::{Json, extract::State, http::StatusCode};
use gw_rest_api_contract::{CommitInfo, CommitsResponse};

/// `GET /api/commits`: the most recent commits on the current branch
pub async fn list_commits(State(state): State<AppState>) -> (StatusCode, Json<CommitsResponse>) {
    match state.repository.recent_commits(state.commit_limit()).await {
        Ok(records) => {
            let commits = records.into_iter().map(CommitInfo::from).collect();
            (StatusCode::OK, Json(CommitsResponse::success(commits)))
        }
        Err(err) => {
            tracing::error!("Failed to list commits: {}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(CommitsResponse::error(err.to_string())),
            )
        }
    }
}
