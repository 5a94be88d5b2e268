//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! These types are serialized/deserialized to/from JSON.

use serde::{Deserialize, Serialize};

use crate::dataset::{HistorySummary, PricePoint, PurchaseRecord};
use crate::pricing::{CostBreakdown, WeightUnit};

// ============================================
// CALCULATOR DTOs
// ============================================

/// Values the calculator form starts with
#[derive(Debug, Serialize, Deserialize)]
pub struct CalculatorDefaultsResponse {
    pub weight: f64,
    pub unit: WeightUnit,
    pub price_per_gram: f64,
    pub base_currency: String,
    pub base_symbol: String,
    /// Selectable target currencies
    pub currencies: Vec<String>,
}

/// Cost calculation request. Omitted fields take the calculator defaults.
#[derive(Debug, Default, Deserialize)]
pub struct CostRequest {
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub unit: Option<WeightUnit>,
    #[serde(default)]
    pub price_per_gram: Option<f64>,
    /// Target currency code; defaults to the first configured currency
    #[serde(default)]
    pub currency: Option<String>,
}

/// Cost calculation response
#[derive(Debug, Serialize)]
pub struct CostResponse {
    #[serde(flatten)]
    pub breakdown: CostBreakdown,
    pub base_currency: String,
    /// e.g. `₹8,000.00`
    pub total_cost_display: String,
    /// e.g. `USD 96.00`
    pub converted_display: String,
}

/// Single conversion table entry
#[derive(Debug, Serialize)]
pub struct CurrencyRate {
    pub code: String,
    pub rate: f64,
}

/// Conversion table listing
#[derive(Debug, Serialize)]
pub struct CurrencyListResponse {
    pub base_currency: String,
    pub currencies: Vec<CurrencyRate>,
}

// ============================================
// SALES DTOs
// ============================================

/// Query parameters for the top-states endpoints
#[derive(Debug, Default, Deserialize)]
pub struct TopStatesParams {
    /// Number of states; defaults to the configured `top_n`
    #[serde(default)]
    pub n: Option<usize>,
}

/// Ranked states, largest purchase first
#[derive(Debug, Serialize)]
pub struct TopStatesResponse {
    pub n: usize,
    /// States in the whole file
    pub total_states: usize,
    pub states: Vec<PurchaseRecord>,
}

// ============================================
// HISTORY DTOs
// ============================================

/// Historical price listing
#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub points: Vec<PricePoint>,
    pub summary: Option<HistorySummary>,
    pub rows_skipped: usize,
}

// ============================================
// HEALTH DTOs
// ============================================

/// Full health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status: healthy, unhealthy
    pub status: String,
    /// Dataset status: ok, unavailable
    pub datasets: String,
    /// Load error when datasets are unavailable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Application version
    pub version: String,
}
