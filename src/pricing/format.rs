//! Display formatting for calculator output.
//!
//! Presentation only; computed values are never rounded.

/// Two decimals with comma thousands separators: `8000.0` → `"8,000.00"`
pub fn format_amount(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    // "-0.00" reads as noise
    let rounds_to_zero = fixed.bytes().all(|b| b == b'0' || b == b'.');
    let sign = if amount < 0.0 && !rounds_to_zero { "-" } else { "" };

    format!("{}{}.{}", sign, grouped, frac_part)
}

/// Base-currency cost with its symbol, e.g. `₹8,000.00`
pub fn format_total(symbol: &str, amount: f64) -> String {
    format!("{}{}", symbol, format_amount(amount))
}

/// Converted cost prefixed by the currency code, e.g. `USD 96.00`
pub fn format_converted(code: &str, amount: f64) -> String {
    format!("{} {}", code, format_amount(amount))
}
