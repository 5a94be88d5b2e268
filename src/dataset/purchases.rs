//! State-wise silver purchases
//!
//! Loads `State,Silver_Purchased_kg` CSV files and ranks states by volume.

use serde::Serialize;
use std::io::Read;
use std::path::Path;

use super::error::{ensure_exists, DatasetError, DatasetResult};

pub const STATE_COLUMN: &str = "State";
pub const PURCHASED_COLUMN: &str = "Silver_Purchased_kg";

/// Silver bought in one state
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PurchaseRecord {
    pub state: String,
    pub purchased_kg: f64,
}

impl PurchaseRecord {
    pub fn new(state: impl Into<String>, purchased_kg: f64) -> Self {
        Self {
            state: state.into(),
            purchased_kg,
        }
    }
}

/// Purchase records in file order. Read-only once loaded.
#[derive(Debug, Clone, Default)]
pub struct PurchaseTable {
    records: Vec<PurchaseRecord>,
    rows_skipped: usize,
}

impl PurchaseTable {
    pub fn new(records: Vec<PurchaseRecord>) -> Self {
        Self {
            records,
            rows_skipped: 0,
        }
    }

    /// Load the table from a CSV file on disk
    pub fn load(path: &Path) -> DatasetResult<Self> {
        ensure_exists(path)?;
        let file = std::fs::File::open(path)?;
        let table = Self::from_reader(file, path)?;

        if table.rows_skipped > 0 {
            tracing::warn!(
                path = ?path,
                skipped = table.rows_skipped,
                "Skipped rows with no purchase volume"
            );
        }
        tracing::debug!(path = ?path, records = table.len(), "Loaded purchase table");
        Ok(table)
    }

    /// Parse CSV from any reader; `origin` is only used in error messages.
    ///
    /// Blank and `NaN` volumes are missing data: the row is skipped and
    /// counted. Negative or infinite volumes fail the load.
    pub fn from_reader<R: Read>(reader: R, origin: &Path) -> DatasetResult<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        let state_idx = column_index(&headers, STATE_COLUMN, origin)?;
        let kg_idx = column_index(&headers, PURCHASED_COLUMN, origin)?;

        let mut records = Vec::new();
        let mut rows_skipped = 0;
        for (row, result) in reader.records().enumerate() {
            let record = result?;
            let line = row + 2;

            let state = record.get(state_idx).unwrap_or_default().trim();
            let raw_kg = record.get(kg_idx).unwrap_or_default().trim();
            let invalid = || DatasetError::InvalidValue {
                path: origin.to_path_buf(),
                line,
                column: PURCHASED_COLUMN.to_string(),
                value: raw_kg.to_string(),
            };

            if raw_kg.is_empty() {
                rows_skipped += 1;
                continue;
            }
            let purchased_kg = raw_kg.parse::<f64>().map_err(|_| invalid())?;
            if purchased_kg.is_nan() {
                rows_skipped += 1;
                continue;
            }
            if purchased_kg.is_infinite() || purchased_kg < 0.0 {
                return Err(invalid());
            }

            records.push(PurchaseRecord::new(state, purchased_kg));
        }

        Ok(Self {
            records,
            rows_skipped,
        })
    }

    pub fn records(&self) -> &[PurchaseRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Rows dropped because their volume was blank or `NaN`
    pub fn rows_skipped(&self) -> usize {
        self.rows_skipped
    }

    pub fn total_kg(&self) -> f64 {
        self.records.iter().map(|r| r.purchased_kg).sum()
    }

    /// The `n` records with the largest `purchased_kg`, largest first.
    ///
    /// The sort is stable: records with equal volume keep their file order.
    /// `NaN` volumes are never ranked.
    pub fn top_n(&self, n: usize) -> Vec<&PurchaseRecord> {
        let mut ranked: Vec<&PurchaseRecord> = self
            .records
            .iter()
            .filter(|r| !r.purchased_kg.is_nan())
            .collect();
        ranked.sort_by(|a, b| b.purchased_kg.total_cmp(&a.purchased_kg));
        ranked.truncate(n);
        ranked
    }
}

fn column_index(headers: &csv::StringRecord, name: &str, origin: &Path) -> DatasetResult<usize> {
    headers
        .iter()
        .position(|h| h.trim() == name)
        .ok_or_else(|| DatasetError::MissingColumn {
            path: origin.to_path_buf(),
            column: name.to_string(),
        })
}
