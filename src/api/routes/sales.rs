//! Sales Routes
//!
//! - GET /api/v1/sales/top-states?n= - States with the largest purchases
//! - GET /api/v1/sales/top-states/chart?n= - Bar chart specification for them

use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::api::dto::{TopStatesParams, TopStatesResponse};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::chart::BarChartSpec;

/// GET /api/v1/sales/top-states
pub async fn top_states(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TopStatesParams>,
) -> ApiResult<Json<TopStatesResponse>> {
    let n = resolve_n(&state, &params)?;
    let purchases = &state.datasets()?.purchases;

    let states = purchases.top_n(n).into_iter().cloned().collect();

    Ok(Json(TopStatesResponse {
        n,
        total_states: purchases.len(),
        states,
    }))
}

/// GET /api/v1/sales/top-states/chart
pub async fn top_states_chart(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TopStatesParams>,
) -> ApiResult<Json<BarChartSpec>> {
    let n = resolve_n(&state, &params)?;
    let purchases = &state.datasets()?.purchases;

    Ok(Json(BarChartSpec::top_states(&purchases.top_n(n))))
}

fn resolve_n(state: &AppState, params: &TopStatesParams) -> ApiResult<usize> {
    match params.n.unwrap_or(state.pricing.top_n) {
        0 => Err(ApiError::Validation("n must be at least 1".to_string())),
        n => Ok(n),
    }
}
