//! Dashboard Datasets
//!
//! The two input tables the dashboard reads: the historical silver price file
//! and the state-wise purchase file. Both are loaded once, up front, by
//! [`Datasets::load`] and are never mutated afterwards; callers share them
//! behind an `Arc`.

pub mod error;
pub mod history;
pub mod purchases;

pub use error::{DatasetError, DatasetResult};
pub use history::{HistorySummary, PriceHistory, PricePoint};
pub use purchases::{PurchaseRecord, PurchaseTable};

use crate::config::DataConfig;

/// Immutable session data
#[derive(Debug, Clone, Default)]
pub struct Datasets {
    pub history: PriceHistory,
    pub purchases: PurchaseTable,
}

impl Datasets {
    pub fn new(history: PriceHistory, purchases: PurchaseTable) -> Self {
        Self { history, purchases }
    }

    /// Load both input files.
    ///
    /// Either file missing yields [`DatasetError::MissingFile`] and nothing is
    /// returned; there is no partially loaded state.
    pub fn load(config: &DataConfig) -> DatasetResult<Self> {
        let history_path = config.history_path();
        let purchases_path = config.purchases_path();

        let history = PriceHistory::load(&history_path)?;
        let purchases = PurchaseTable::load(&purchases_path)?;

        tracing::info!(
            history_points = history.len(),
            states = purchases.len(),
            "Datasets loaded"
        );

        Ok(Self { history, purchases })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write_fixtures(dir: &std::path::Path) -> DataConfig {
        std::fs::write(
            dir.join("historical_silver_price.csv"),
            "Date,Price\n2024-01-01,72.5\n2024-01-02,73.0\n",
        )
        .unwrap();
        std::fs::write(
            dir.join("state_wise_silver_purchased_kg.csv"),
            "State,Silver_Purchased_kg\nKerala,50\nAndhra Pradesh,90\n",
        )
        .unwrap();

        DataConfig {
            data_dir: dir.to_string_lossy().to_string(),
            ..DataConfig::default()
        }
    }

    #[test]
    fn test_load_both_files() {
        let dir = tempdir().unwrap();
        let config = write_fixtures(dir.path());

        let data = Datasets::load(&config).unwrap();
        assert_eq!(data.history.len(), 2);
        assert_eq!(data.purchases.top_n(1)[0].state, "Andhra Pradesh");
    }

    #[test]
    fn test_missing_purchase_file_halts_load() {
        let dir = tempdir().unwrap();
        let config = write_fixtures(dir.path());
        std::fs::remove_file(dir.path().join("state_wise_silver_purchased_kg.csv")).unwrap();

        let err = Datasets::load(&config).unwrap_err();
        assert!(err.is_missing_file());
        assert!(err.to_string().contains("state_wise_silver_purchased_kg.csv"));
    }

    #[test]
    fn test_missing_history_file_halts_load() {
        let dir = tempdir().unwrap();
        let config = write_fixtures(dir.path());
        std::fs::remove_file(dir.path().join("historical_silver_price.csv")).unwrap();

        assert!(Datasets::load(&config).unwrap_err().is_missing_file());
    }
}
