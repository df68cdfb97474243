//! Defensive numeric coercion for provider fields that arrive as text.
//!
//! Providers send placeholders such as `"None"`, `"-"` or an empty string for
//! missing values. Those become `None`; zero is a real value and is kept.

/// Parse a decimal field. Non-finite and unparsable text is absent.
pub fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse a count field (volume, open interest, share counts).
/// Fractional text is truncated toward zero.
pub fn parse_integer(raw: &str) -> Option<i64> {
    parse_number(raw).and_then(number_to_integer)
}

/// Truncate a finite number toward zero; out-of-range values are absent.
pub fn number_to_integer(value: f64) -> Option<i64> {
    if !value.is_finite() || value.abs() >= i64::MAX as f64 {
        return None;
    }
    Some(value.trunc() as i64)
}

/// Round half up (toward positive infinity on ties).
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Round to `places` decimal places with half-up ties, e.g. price levels to cents.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    round_half_up(value * factor) / factor
}
