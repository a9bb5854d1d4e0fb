// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Gitway REST API contract types
//!
//! These types fix the JSON shapes returned by the server. They are shared by
//! the server and by tests that decode its responses.

pub mod types;

pub use types::*;
