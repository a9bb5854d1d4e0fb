// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Working tree status

use crate::state::AppState;
use axum::{Json, extract::State, http::StatusCode};
use gw_rest_api_contract::StatusResponse;

/// `GET /api/status`: git's own status text, unparsed
pub async fn repo_status(State(state): State<AppState>) -> (StatusCode, Json<StatusResponse>) {
    match state.repository.status().await {
        Ok(text) => (StatusCode::OK, Json(StatusResponse::success(text))),
        Err(err) => {
            tracing::error!("Failed to read repository status: {}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(StatusResponse::error(err.to_string())),
            )
        }
    }
}
