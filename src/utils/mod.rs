//! Utility functions and helpers.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Deserialize a price that may be stored as a number, a numeric string, or
/// be missing entirely. Anything that does not parse contributes 0.
pub fn lenient_price<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(parse_price(value.as_ref()))
}

/// Interpret a stored price representation as a numeric value.
pub fn parse_price(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Round to one decimal place, the precision displayed for rating averages.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_price_handles_stored_representations() {
        assert_eq!(parse_price(Some(&json!(25000))), 25000.0);
        assert_eq!(parse_price(Some(&json!("12500"))), 12500.0);
        assert_eq!(parse_price(Some(&json!(" 99.5 "))), 99.5);
        assert_eq!(parse_price(Some(&json!("gi\u{1ea3}m gi\u{00e1}"))), 0.0);
        assert_eq!(parse_price(Some(&json!(null))), 0.0);
        assert_eq!(parse_price(None), 0.0);
    }

    #[test]
    fn round1_matches_displayed_precision() {
        assert_eq!(round1(13.0 / 3.0), 4.3);
        assert_eq!(round1(4.35), 4.4);
    }
}
