//! # Silverdash
//!
//! Silver Price Calculator & Sales Dashboard - the computational backend of a
//! small dashboard that prices silver and ranks the states buying the most of it.
//!
//! ## Features
//!
//! - **Cost calculator**: weight × price per gram in the base currency (INR),
//!   converted through a configurable conversion table
//! - **Top-N sales**: the states with the largest silver purchases, ranked
//!   with a stable tie-break and shaped into a bar chart specification
//! - **Load once**: input CSV files are read at start-up into an immutable
//!   [`Datasets`] value shared by every request
//!
//! ## Modules
//!
//! - [`pricing`]: Cost calculation, conversion table, display formatting
//! - [`dataset`]: CSV loading and top-N selection
//! - [`chart`]: Bar chart specification for the sales view
//! - [`api`]: REST API server with Axum
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust
//! use silverdash::dataset::{PurchaseRecord, PurchaseTable};
//! use silverdash::pricing::{ConversionTable, PriceQuote, WeightUnit};
//!
//! let quote = PriceQuote::new(100.0, WeightUnit::Grams, 80.0).unwrap();
//! assert_eq!(quote.total_cost(), 8000.0);
//!
//! let usd = ConversionTable::default().convert(quote.total_cost(), "USD").unwrap();
//! assert!((usd - 96.0).abs() < 1e-9);
//!
//! let table = PurchaseTable::new(vec![
//!     PurchaseRecord::new("Kerala", 50.0),
//!     PurchaseRecord::new("Andhra Pradesh", 90.0),
//! ]);
//! assert_eq!(table.top_n(1)[0].state, "Andhra Pradesh");
//! ```

pub mod api;
pub mod chart;
pub mod config;
pub mod dataset;
pub mod logging;
pub mod pricing;

// Re-export top-level types for convenience
pub use pricing::{
    quote_cost, ConversionTable, CostBreakdown, PriceQuote, PricingError, PricingResult,
    WeightUnit,
};

pub use dataset::{
    DatasetError, DatasetResult, Datasets, HistorySummary, PriceHistory, PricePoint,
    PurchaseRecord, PurchaseTable,
};

pub use chart::{Bar, BarChartSpec};

pub use api::{build_router, serve, ApiError, AppState};

pub use config::{
    ApiConfig, Config, ConfigError, ConfigLoad, DataConfig, LoggingConfig, PricingConfig,
};
