//! Pricing error types

use thiserror::Error;

/// Errors raised while computing or converting a silver cost
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PricingError {
    /// Target currency has no entry in the conversion table
    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),

    /// Weight or price is negative, NaN or infinite
    #[error("Invalid {field}: {value} (must be a finite, non-negative number)")]
    InvalidQuantity { field: &'static str, value: f64 },

    /// Conversion rate is not a finite positive multiplier
    #[error("Invalid conversion rate for {code}: {rate}")]
    InvalidRate { code: String, rate: f64 },
}

/// Result type alias for pricing operations
pub type PricingResult<T> = Result<T, PricingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PricingError::UnknownCurrency("EUR".to_string());
        assert_eq!(err.to_string(), "Unknown currency: EUR");

        let err = PricingError::InvalidQuantity {
            field: "weight",
            value: -1.0,
        };
        assert_eq!(
            err.to_string(),
            "Invalid weight: -1 (must be a finite, non-negative number)"
        );
    }
}
