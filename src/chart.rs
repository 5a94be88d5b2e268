//! Bar Chart Specification
//!
//! Describes the top-states bar chart for an external renderer: categories,
//! values and a per-bar colour taken from a sequential blue ramp keyed to the
//! value's magnitude.

use serde::Serialize;

use crate::dataset::purchases::PurchaseRecord;

/// Sequential "Blues" ramp, light to dark
const BLUES: [(u8, u8, u8); 9] = [
    (247, 251, 255),
    (222, 235, 247),
    (198, 219, 239),
    (158, 202, 225),
    (107, 174, 214),
    (66, 146, 198),
    (33, 113, 181),
    (8, 81, 156),
    (8, 48, 107),
];

pub const COLOR_SCALE_NAME: &str = "Blues";
const CHART_HEIGHT: u32 = 400;

/// One bar
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    pub category: String,
    pub value: f64,
    /// `#rrggbb`
    pub color: String,
}

/// Everything a renderer needs to draw the chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarChartSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub height: u32,
    pub color_scale: String,
    pub bars: Vec<Bar>,
}

impl BarChartSpec {
    /// Chart for an already ranked list of states
    pub fn top_states(records: &[&PurchaseRecord]) -> Self {
        let values: Vec<f64> = records.iter().map(|r| r.purchased_kg).collect();
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        let bars = records
            .iter()
            .map(|r| Bar {
                category: r.state.clone(),
                value: r.purchased_kg,
                color: blues_color(normalize(r.purchased_kg, min, max)),
            })
            .collect();

        Self {
            title: format!("Top {} States - Silver Purchases", records.len()),
            x_label: "State".to_string(),
            y_label: "Silver Purchased (kg)".to_string(),
            height: CHART_HEIGHT,
            color_scale: COLOR_SCALE_NAME.to_string(),
            bars,
        }
    }

    pub fn categories(&self) -> Vec<&str> {
        self.bars.iter().map(|b| b.category.as_str()).collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.value).collect()
    }
}

/// Position of `value` within `[min, max]`; a flat range maps to the top
fn normalize(value: f64, min: f64, max: f64) -> f64 {
    let span = max - min;
    if !span.is_finite() || span <= 0.0 {
        return 1.0;
    }
    ((value - min) / span).clamp(0.0, 1.0)
}

/// Interpolate the Blues ramp at `t` in `[0, 1]`
pub fn blues_color(t: f64) -> String {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let scaled = t * (BLUES.len() - 1) as f64;
    let lower = scaled.floor() as usize;
    let upper = (lower + 1).min(BLUES.len() - 1);
    let frac = scaled - lower as f64;

    let lerp = |a: u8, b: u8| -> u8 { (a as f64 + (b as f64 - a as f64) * frac).round() as u8 };
    let (r0, g0, b0) = BLUES[lower];
    let (r1, g1, b1) = BLUES[upper];

    format!("#{:02x}{:02x}{:02x}", lerp(r0, r1), lerp(g0, g1), lerp(b0, b1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn luminance(hex: &str) -> u32 {
        let channel = |i: usize| u32::from_str_radix(&hex[i..i + 2], 16).unwrap();
        channel(1) + channel(3) + channel(5)
    }

    #[test]
    fn test_ramp_endpoints() {
        assert_eq!(blues_color(0.0), "#f7fbff");
        assert_eq!(blues_color(1.0), "#08306b");
        assert_eq!(blues_color(0.5), "#6baed6");
        assert_eq!(blues_color(-3.0), "#f7fbff");
        assert_eq!(blues_color(f64::NAN), "#f7fbff");
    }

    #[test]
    fn test_top_states_chart() {
        let records = vec![
            PurchaseRecord::new("AP", 90.0),
            PurchaseRecord::new("TN", 80.0),
            PurchaseRecord::new("GJ", 60.0),
            PurchaseRecord::new("KL", 50.0),
            PurchaseRecord::new("KA", 30.0),
        ];
        let refs: Vec<&PurchaseRecord> = records.iter().collect();

        let chart = BarChartSpec::top_states(&refs);
        assert_eq!(chart.title, "Top 5 States - Silver Purchases");
        assert_eq!(chart.categories(), vec!["AP", "TN", "GJ", "KL", "KA"]);
        assert_eq!(chart.values(), vec![90.0, 80.0, 60.0, 50.0, 30.0]);
        assert_eq!(chart.height, 400);
        assert_eq!(chart.color_scale, "Blues");

        // Larger purchases are drawn darker
        for pair in chart.bars.windows(2) {
            assert!(luminance(&pair[0].color) <= luminance(&pair[1].color));
        }
        assert_eq!(chart.bars[0].color, "#08306b");
        assert_eq!(chart.bars[4].color, "#f7fbff");
    }

    #[test]
    fn test_equal_values_share_darkest_color() {
        let records = vec![PurchaseRecord::new("A", 10.0), PurchaseRecord::new("B", 10.0)];
        let refs: Vec<&PurchaseRecord> = records.iter().collect();

        let chart = BarChartSpec::top_states(&refs);
        assert!(chart.bars.iter().all(|b| b.color == "#08306b"));
    }

    #[test]
    fn test_empty_chart() {
        let chart = BarChartSpec::top_states(&[]);
        assert!(chart.bars.is_empty());
        assert_eq!(chart.title, "Top 0 States - Silver Purchases");
    }
}
