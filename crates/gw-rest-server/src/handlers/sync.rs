// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Pull-then-push synchronization

use crate::state::AppState;
use axum::{Json, extract::State, http::StatusCode};
use gw_rest_api_contract::SyncResponse;

/// `POST /api/push`: pull from the configured remote, then push to it
///
/// A failed pull skips the push. A failed push is reported together with the
/// pull output; the pulled changes are kept.
pub async fn synchronize(State(state): State<AppState>) -> (StatusCode, Json<SyncResponse>) {
    let outcome = state.repository.synchronize().await;
    let status = if outcome.is_success() {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    (status, Json(SyncResponse::from(outcome)))
}
