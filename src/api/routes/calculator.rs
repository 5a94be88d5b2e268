//! Calculator Routes
//!
//! - GET /api/v1/calculator/defaults - Initial form values
//! - POST /api/v1/calculator/cost - Compute and convert a silver cost
//! - GET /api/v1/currencies - Conversion table

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::dto::{
    CalculatorDefaultsResponse, CostRequest, CostResponse, CurrencyListResponse, CurrencyRate,
};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::pricing::{format_converted, format_total, quote_cost, PriceQuote};

/// GET /api/v1/calculator/defaults
pub async fn get_defaults(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<CalculatorDefaultsResponse>> {
    state.datasets()?;
    let pricing = &state.pricing;

    Ok(Json(CalculatorDefaultsResponse {
        weight: pricing.default_weight,
        unit: pricing.default_unit,
        price_per_gram: pricing.default_price_per_gram,
        base_currency: pricing.base_currency.clone(),
        base_symbol: pricing.base_symbol.clone(),
        currencies: state.rates.codes().map(str::to_string).collect(),
    }))
}

/// POST /api/v1/calculator/cost
///
/// Computes `weight_in_grams * price_per_gram` in the base currency and
/// converts it to the requested currency.
pub async fn calculate_cost(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CostRequest>,
) -> ApiResult<Json<CostResponse>> {
    // The whole dashboard is halted while the input files are missing
    state.datasets()?;
    let pricing = &state.pricing;

    let quote = PriceQuote::new(
        req.weight.unwrap_or(pricing.default_weight),
        req.unit.unwrap_or(pricing.default_unit),
        req.price_per_gram.unwrap_or(pricing.default_price_per_gram),
    )?;

    let currency = match req.currency {
        Some(code) => code,
        None => state
            .rates
            .codes()
            .next()
            .map(str::to_string)
            .ok_or_else(|| ApiError::Internal("No currencies configured".to_string()))?,
    };

    let breakdown = quote_cost(&quote, &state.rates, &currency)?;

    tracing::debug!(
        weight_in_grams = breakdown.weight_in_grams,
        total_cost = breakdown.total_cost,
        currency = %breakdown.currency,
        "Calculated silver cost"
    );

    Ok(Json(CostResponse {
        total_cost_display: format_total(&pricing.base_symbol, breakdown.total_cost),
        converted_display: format_converted(&breakdown.currency, breakdown.converted_amount),
        base_currency: pricing.base_currency.clone(),
        breakdown,
    }))
}

/// GET /api/v1/currencies
pub async fn list_currencies(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<CurrencyListResponse>> {
    state.datasets()?;

    let currencies = state
        .rates
        .iter()
        .map(|(code, rate)| CurrencyRate {
            code: code.to_string(),
            rate,
        })
        .collect();

    Ok(Json(CurrencyListResponse {
        base_currency: state.pricing.base_currency.clone(),
        currencies,
    }))
}
