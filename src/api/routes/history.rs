//! History Routes
//!
//! - GET /api/v1/history - Historical silver prices with a summary

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::dto::HistoryResponse;
use crate::api::error::ApiResult;
use crate::api::state::AppState;

/// GET /api/v1/history
pub async fn get_history(State(state): State<Arc<AppState>>) -> ApiResult<Json<HistoryResponse>> {
    let history = &state.datasets()?.history;

    Ok(Json(HistoryResponse {
        points: history.points().to_vec(),
        summary: history.summary(),
        rows_skipped: history.rows_skipped(),
    }))
}
