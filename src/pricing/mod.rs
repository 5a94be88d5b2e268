//! Silver Cost Calculator
//!
//! Turns a weight and a per-gram price into a cost in the base currency,
//! then converts that cost through a [`ConversionTable`].
//!
//! ```rust
//! use silverdash::pricing::{quote_cost, ConversionTable, PriceQuote, WeightUnit};
//!
//! let table = ConversionTable::default();
//! let quote = PriceQuote::new(1.0, WeightUnit::Kilograms, 80.0).unwrap();
//! let cost = quote_cost(&quote, &table, "USD").unwrap();
//!
//! assert_eq!(cost.weight_in_grams, 1000.0);
//! assert_eq!(cost.total_cost, 80_000.0);
//! ```

pub mod error;
pub mod format;
pub mod quote;
pub mod rates;

pub use error::{PricingError, PricingResult};
pub use format::{format_amount, format_converted, format_total};
pub use quote::{quote_cost, CostBreakdown, PriceQuote, WeightUnit};
pub use rates::ConversionTable;
