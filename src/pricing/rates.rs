//! Currency conversion table

use std::collections::BTreeMap;

use super::error::{PricingError, PricingResult};

/// Static INR → USD multiplier used when no rates are configured
pub const DEFAULT_USD_RATE: f64 = 0.012;

/// Mapping from currency code to the multiplier applied to a base-currency
/// amount.
///
/// Codes are stored uppercase and looked up case-insensitively. Every rate is
/// finite and strictly positive.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionTable {
    rates: BTreeMap<String, f64>,
}

impl Default for ConversionTable {
    fn default() -> Self {
        let mut rates = BTreeMap::new();
        rates.insert("USD".to_string(), DEFAULT_USD_RATE);
        Self { rates }
    }
}

impl ConversionTable {
    /// Build a table from `(code, rate)` pairs
    pub fn new<I, S>(entries: I) -> PricingResult<Self>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        let mut rates = BTreeMap::new();

        for (code, rate) in entries {
            let code = normalize(code.as_ref());
            if !rate.is_finite() || rate <= 0.0 {
                return Err(PricingError::InvalidRate { code, rate });
            }
            rates.insert(code, rate);
        }

        Ok(Self { rates })
    }

    /// Look up the stored code and rate for `code`
    pub fn entry(&self, code: &str) -> PricingResult<(&str, f64)> {
        let key = normalize(code);
        self.rates
            .get_key_value(&key)
            .map(|(k, v)| (k.as_str(), *v))
            .ok_or(PricingError::UnknownCurrency(key))
    }

    /// Multiplier for `code`
    pub fn rate(&self, code: &str) -> PricingResult<f64> {
        self.entry(code).map(|(_, rate)| rate)
    }

    /// Convert a base-currency amount into `code`
    pub fn convert(&self, amount: f64, code: &str) -> PricingResult<f64> {
        Ok(amount * self.rate(code)?)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.rates.contains_key(&normalize(code))
    }

    /// Currency codes in sorted order
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.rates.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.rates.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

fn normalize(code: &str) -> String {
    code.trim().to_uppercase()
}
