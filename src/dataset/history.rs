//! Historical silver prices
//!
//! The history file only needs a date column and a price column; which ones
//! is detected from the header row. Anything else is ignored.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::io::Read;
use std::path::Path;

use super::error::{ensure_exists, DatasetError, DatasetResult};

const DATE_FORMATS: [&str; 8] = [
    "%Y-%m-%d",
    "%d-%m-%Y",
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%Y/%m/%d",
    "%d-%b-%Y",
    "%b %d, %Y",
    "%d %b %Y",
];

const DATETIME_FORMATS: [&str; 3] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%SZ",
];

/// One observed price
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub price: f64,
}

/// Aggregate view of a price history
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistorySummary {
    pub count: usize,
    pub first_date: NaiveDate,
    pub last_date: NaiveDate,
    /// Price on `last_date`
    pub latest_price: f64,
    pub min_price: f64,
    pub max_price: f64,
}

/// Price observations in file order
#[derive(Debug, Clone, Default)]
pub struct PriceHistory {
    points: Vec<PricePoint>,
    rows_skipped: usize,
}

impl PriceHistory {
    pub fn new(points: Vec<PricePoint>) -> Self {
        Self {
            points,
            rows_skipped: 0,
        }
    }

    /// Load the history from a CSV file on disk
    pub fn load(path: &Path) -> DatasetResult<Self> {
        ensure_exists(path)?;
        let file = std::fs::File::open(path)?;
        let history = Self::from_reader(file, path)?;

        if history.rows_skipped > 0 {
            tracing::warn!(
                path = ?path,
                skipped = history.rows_skipped,
                "Skipped unparseable rows in price history"
            );
        }
        tracing::debug!(path = ?path, points = history.len(), "Loaded price history");

        Ok(history)
    }

    /// Parse CSV from any reader; `origin` is only used in error messages
    pub fn from_reader<R: Read>(reader: R, origin: &Path) -> DatasetResult<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        let date_idx = detect_column(&headers, "date", origin)?;
        let price_idx = detect_column(&headers, "price", origin)?;

        let mut points = Vec::new();
        let mut rows_skipped = 0;

        for result in reader.records() {
            let record = match result {
                Ok(r) => r,
                Err(_) => {
                    rows_skipped += 1;
                    continue;
                }
            };

            let date = record.get(date_idx).and_then(parse_date);
            let price = record.get(price_idx).and_then(parse_price);

            match (date, price) {
                (Some(date), Some(price)) => points.push(PricePoint { date, price }),
                _ => rows_skipped += 1,
            }
        }

        Ok(Self {
            points,
            rows_skipped,
        })
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Rows dropped because the date or price did not parse
    pub fn rows_skipped(&self) -> usize {
        self.rows_skipped
    }

    /// `None` when the history is empty
    pub fn summary(&self) -> Option<HistorySummary> {
        let first = self.points.iter().min_by_key(|p| p.date)?;
        // max_by_key returns the last maximum, so a repeated date picks its final row
        let last = self.points.iter().max_by_key(|p| p.date)?;

        let min_price = self.points.iter().map(|p| p.price).fold(f64::INFINITY, f64::min);
        let max_price = self
            .points
            .iter()
            .map(|p| p.price)
            .fold(f64::NEG_INFINITY, f64::max);

        Some(HistorySummary {
            count: self.points.len(),
            first_date: first.date,
            last_date: last.date,
            latest_price: last.price,
            min_price,
            max_price,
        })
    }
}

fn detect_column(
    headers: &csv::StringRecord,
    needle: &str,
    origin: &Path,
) -> DatasetResult<usize> {
    headers
        .iter()
        .position(|h| h.to_lowercase().contains(needle))
        .ok_or_else(|| DatasetError::MissingColumn {
            path: origin.to_path_buf(),
            column: needle.to_string(),
        })
}

/// First format in [`DATE_FORMATS`] that fits wins, so an ambiguous slash
/// date such as `01/02/2024` is read month-first (2 January). Day-first only
/// applies when the first field cannot be a month.
fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
                .map(|dt| dt.date())
        })
}

fn parse_price(raw: &str) -> Option<f64> {
    let cleaned: String = raw.trim().chars().filter(|c| *c != ',').collect();
    cleaned.parse::<f64>().ok().filter(|p| p.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(csv_data: &str) -> DatasetResult<PriceHistory> {
        PriceHistory::from_reader(csv_data.as_bytes(), Path::new("history.csv"))
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_detects_columns_from_header() {
        let csv_data = "Open,Date,Close Price (INR/kg),Volume
1,2024-01-15,\"74,200.50\",10
2,16/01/2024,74500,12";

        let history = parse(csv_data).unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history.points()[0].date, date(2024, 1, 15));
        assert_eq!(history.points()[0].price, 74_200.5);
        assert_eq!(history.points()[1].date, date(2024, 1, 16));
    }

    #[test]
    fn test_skips_unparseable_rows() {
        let csv_data = "date,price
2024-01-15,80
not-a-date,81
2024-01-17,
2024-01-18T09:30:00,82";

        let history = parse(csv_data).unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history.rows_skipped(), 2);
        assert_eq!(history.points()[1].date, date(2024, 1, 18));
    }

    #[test]
    fn test_ambiguous_slash_dates_are_month_first() {
        assert_eq!(parse_date("01/02/2024"), Some(date(2024, 1, 2)));
        assert_eq!(parse_date("12/11/2023"), Some(date(2023, 12, 11)));
        assert_eq!(parse_date("13/02/2024"), Some(date(2024, 2, 13)));
        assert_eq!(parse_date("31/12/2023"), Some(date(2023, 12, 31)));
        assert_eq!(parse_date("13/13/2024"), None);
    }

    #[test]
    fn test_missing_price_column() {
        let err = parse("date,close\n2024-01-15,80").unwrap_err();
        assert!(matches!(err, DatasetError::MissingColumn { ref column, .. } if column == "price"));
    }

    #[test]
    fn test_summary() {
        let history = PriceHistory::new(vec![
            PricePoint { date: date(2024, 3, 1), price: 78.0 },
            PricePoint { date: date(2024, 1, 1), price: 72.5 },
            PricePoint { date: date(2024, 2, 1), price: 81.0 },
        ]);

        let summary = history.summary().unwrap();
        assert_eq!(summary.count, 3);
        assert_eq!(summary.first_date, date(2024, 1, 1));
        assert_eq!(summary.last_date, date(2024, 3, 1));
        assert_eq!(summary.latest_price, 78.0);
        assert_eq!(summary.min_price, 72.5);
        assert_eq!(summary.max_price, 81.0);
    }

    #[test]
    fn test_empty_summary() {
        assert!(PriceHistory::default().summary().is_none());
    }
}
