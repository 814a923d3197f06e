//! Field cleaning and price splitting.

use serde::{Deserialize, Serialize};

/// A price cell split into its amount line and optional shipping line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceValue {
    pub amount: String,
    pub shipping: String,
    /// `amount` alone, or `"amount (shipping)"` when shipping is present.
    pub display: String,
}

impl PriceValue {
    pub fn new(amount: impl Into<String>, shipping: impl Into<String>) -> Self {
        let amount = amount.into();
        let shipping = shipping.into();
        let display = if shipping.is_empty() { amount.clone() } else { format!("{amount} ({shipping})") };
        Self { amount, shipping, display }
    }
}

/// Collapse line breaks and whitespace runs to single spaces and trim the ends.
///
/// Idempotent: `clean_field(&clean_field(x)) == clean_field(x)`.
pub fn clean_field(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Keep internal line breaks (CRLF folded to LF) and trim the ends.
pub fn keep_lines(raw: &str) -> String {
    raw.replace("\r\n", "\n").trim().to_string()
}

/// Split a multi-line price cell into amount and shipping.
///
/// Only the first two lines are used; anything after the second
/// line is dropped.
pub fn parse_price(raw: &str) -> PriceValue {
    if raw.is_empty() {
        return PriceValue::default();
    }

    let mut parts = raw.split('\n').map(str::trim);
    let amount = parts.next().unwrap_or_default();
    let shipping = parts.next().unwrap_or_default();
    PriceValue::new(amount, shipping)
}
