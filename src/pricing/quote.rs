//! Price quotes and cost breakdowns

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::{PricingError, PricingResult};
use super::rates::ConversionTable;

const GRAMS_PER_KILOGRAM: f64 = 1000.0;

/// Unit the user entered the weight in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    #[default]
    Grams,
    Kilograms,
}

impl WeightUnit {
    /// Multiplier that takes a weight in this unit to grams
    pub fn grams_factor(self) -> f64 {
        match self {
            WeightUnit::Grams => 1.0,
            WeightUnit::Kilograms => GRAMS_PER_KILOGRAM,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WeightUnit::Grams => "grams",
            WeightUnit::Kilograms => "kilograms",
        }
    }
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WeightUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "g" | "gram" | "grams" => Ok(WeightUnit::Grams),
            "kg" | "kilogram" | "kilograms" => Ok(WeightUnit::Kilograms),
            other => Err(format!(
                "Invalid weight unit: '{}'. Valid: grams, kilograms",
                other
            )),
        }
    }
}

/// A single calculator request: how much silver, at what price per gram.
///
/// Built fresh for every interaction and dropped once the cost is known.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceQuote {
    weight: f64,
    unit: WeightUnit,
    price_per_gram: f64,
}

impl PriceQuote {
    /// Create a quote, rejecting negative or non-finite inputs
    pub fn new(weight: f64, unit: WeightUnit, price_per_gram: f64) -> PricingResult<Self> {
        check_quantity("weight", weight)?;
        check_quantity("price_per_gram", price_per_gram)?;

        Ok(Self {
            weight,
            unit,
            price_per_gram,
        })
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn unit(&self) -> WeightUnit {
        self.unit
    }

    pub fn price_per_gram(&self) -> f64 {
        self.price_per_gram
    }

    /// Weight normalized to grams
    pub fn weight_in_grams(&self) -> f64 {
        self.weight * self.unit.grams_factor()
    }

    /// Cost in the base currency. No rounding is applied.
    pub fn total_cost(&self) -> f64 {
        self.weight_in_grams() * self.price_per_gram
    }
}

fn check_quantity(field: &'static str, value: f64) -> PricingResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(PricingError::InvalidQuantity { field, value })
    }
}

/// Everything the calculator derives from one quote
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostBreakdown {
    pub weight: f64,
    pub unit: WeightUnit,
    pub weight_in_grams: f64,
    pub price_per_gram: f64,
    /// Cost in the base currency
    pub total_cost: f64,
    /// Target currency code as stored in the table
    pub currency: String,
    pub rate: f64,
    pub converted_amount: f64,
}

/// Compute the base cost of a quote and convert it to `currency`
pub fn quote_cost(
    quote: &PriceQuote,
    table: &ConversionTable,
    currency: &str,
) -> PricingResult<CostBreakdown> {
    let total_cost = quote.total_cost();
    let (code, rate) = table.entry(currency)?;

    Ok(CostBreakdown {
        weight: quote.weight(),
        unit: quote.unit(),
        weight_in_grams: quote.weight_in_grams(),
        price_per_gram: quote.price_per_gram(),
        total_cost,
        currency: code.to_string(),
        rate,
        converted_amount: total_cost * rate,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grams_are_identity() {
        let quote = PriceQuote::new(250.5, WeightUnit::Grams, 80.0).unwrap();
        assert_eq!(quote.weight_in_grams(), 250.5);
    }

    #[test]
    fn test_kilograms_scale_by_thousand() {
        for weight in [0.0, 0.25, 1.0, 3.75, 1200.0] {
            let quote = PriceQuote::new(weight, WeightUnit::Kilograms, 80.0).unwrap();
            assert_eq!(quote.weight_in_grams(), weight * 1000.0);
        }
    }

    #[test]
    fn test_hundred_grams_at_eighty() {
        let quote = PriceQuote::new(100.0, WeightUnit::Grams, 80.0).unwrap();
        assert_eq!(quote.total_cost(), 8000.0);
    }

    #[test]
    fn test_one_kilogram_at_eighty() {
        let quote = PriceQuote::new(1.0, WeightUnit::Kilograms, 80.0).unwrap();
        assert_eq!(quote.weight_in_grams(), 1000.0);
        assert_eq!(quote.total_cost(), 80_000.0);
    }

    #[test]
    fn test_total_cost_is_unrounded() {
        let quote = PriceQuote::new(3.333, WeightUnit::Grams, 1.111).unwrap();
        assert_eq!(quote.total_cost(), 3.333 * 1.111);
    }

    #[test]
    fn test_rejects_negative_and_non_finite() {
        assert!(matches!(
            PriceQuote::new(-1.0, WeightUnit::Grams, 80.0),
            Err(PricingError::InvalidQuantity { field: "weight", .. })
        ));
        assert!(matches!(
            PriceQuote::new(1.0, WeightUnit::Grams, f64::NAN),
            Err(PricingError::InvalidQuantity {
                field: "price_per_gram",
                ..
            })
        ));
        assert!(PriceQuote::new(f64::INFINITY, WeightUnit::Grams, 1.0).is_err());
    }

    #[test]
    fn test_quote_cost_converts_to_usd() {
        let table = ConversionTable::default();
        let quote = PriceQuote::new(100.0, WeightUnit::Grams, 80.0).unwrap();

        let cost = quote_cost(&quote, &table, "USD").unwrap();
        assert_eq!(cost.total_cost, 8000.0);
        assert_eq!(cost.currency, "USD");
        assert_eq!(cost.rate, 0.012);
        assert!((cost.converted_amount - 96.0).abs() < 1e-9);
    }

    #[test]
    fn test_quote_cost_unknown_currency() {
        let table = ConversionTable::default();
        let quote = PriceQuote::new(100.0, WeightUnit::Grams, 80.0).unwrap();

        let err = quote_cost(&quote, &table, "GBP").unwrap_err();
        assert_eq!(err, PricingError::UnknownCurrency("GBP".to_string()));
    }

    #[test]
    fn test_cost_breakdown_as_csv() {
        let table = ConversionTable::default();
        let quote = PriceQuote::new(2.0, WeightUnit::Kilograms, 80.0).unwrap();
        let cost = quote_cost(&quote, &table, "usd").unwrap();

        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.serialize(&cost).unwrap();
        let out = String::from_utf8(writer.into_inner().unwrap()).unwrap();

        let mut lines = out.lines();
        assert_eq!(
            lines.next(),
            Some("weight,unit,weight_in_grams,price_per_gram,total_cost,currency,rate,converted_amount")
        );
        let row: Vec<&str> = lines.next().unwrap().split(',').collect();
        assert_eq!(&row[..6], &["2.0", "kilograms", "2000.0", "80.0", "160000.0", "USD"]);
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_weight_unit_parsing() {
        assert_eq!("kg".parse::<WeightUnit>().unwrap(), WeightUnit::Kilograms);
        assert_eq!(" Grams ".parse::<WeightUnit>().unwrap(), WeightUnit::Grams);
        assert!("ounces".parse::<WeightUnit>().is_err());
    }
}
