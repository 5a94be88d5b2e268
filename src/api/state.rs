//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use std::sync::Arc;
use std::time::Instant;

use crate::api::error::{ApiError, ApiResult};
use crate::config::{ApiConfig, PricingConfig};
use crate::dataset::{DatasetResult, Datasets};
use crate::pricing::ConversionTable;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Input tables, or the message explaining why they could not be loaded
    datasets: Result<Arc<Datasets>, String>,
    /// Currency conversion table
    pub rates: Arc<ConversionTable>,
    /// Calculator defaults and ranking size
    pub pricing: Arc<PricingConfig>,
    /// API configuration
    pub config: Arc<ApiConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    /// Create the state from the outcome of the start-up load.
    ///
    /// A failed load still produces a state: dashboard routes then answer
    /// with the load error instead of data.
    pub fn new(
        loaded: DatasetResult<Datasets>,
        rates: ConversionTable,
        pricing: PricingConfig,
        config: ApiConfig,
    ) -> Self {
        let datasets = loaded.map(Arc::new).map_err(|e| e.to_string());

        Self {
            datasets,
            rates: Arc::new(rates),
            pricing: Arc::new(pricing),
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }

    /// Loaded datasets, or `DataUnavailable` when start-up loading failed
    pub fn datasets(&self) -> ApiResult<&Datasets> {
        self.datasets
            .as_deref()
            .map_err(|e| ApiError::DataUnavailable(e.clone()))
    }

    /// Whether the input files loaded
    pub fn is_ready(&self) -> bool {
        self.datasets.is_ok()
    }

    /// Load error message, if any
    pub fn load_error(&self) -> Option<&str> {
        self.datasets.as_ref().err().map(String::as_str)
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
