//! Numeric and text helpers shared by every import strategy.
//!
//! All four strategies coerce prices and quantities through these functions
//! so that the same cell text always yields the same value.

use regex::Regex;
use std::sync::LazyLock;

static NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"([0-9]+\.?[0-9]*)").unwrap());

/// Lowest value a cell may hold and still be taken for a price
pub const MIN_PRICE: f64 = 0.01;
/// Highest value a cell may hold and still be taken for a price
pub const MAX_PRICE: f64 = 1_000_000.0;

fn strip_currency(text: &str) -> String {
    text.replace('$', "").replace(',', "").replace("USD", "")
}

/// First decimal number in `text` once currency noise is removed.
///
/// Returns `0.0` for empty text or text without digits.
pub fn extract_price(text: &str) -> f64 {
    if text.is_empty() {
        return 0.0;
    }

    let cleaned = strip_currency(text);
    NUMBER
        .captures(&cleaned)
        .and_then(|caps| caps[1].parse::<f64>().ok())
        .unwrap_or(0.0)
}

/// First number in `text`, truncated to an integer.
///
/// Returns `1` for empty text, text without digits, or values below one.
pub fn extract_quantity(text: &str) -> u32 {
    if text.is_empty() {
        return 1;
    }

    NUMBER
        .captures(text)
        .and_then(|caps| caps[1].parse::<f64>().ok())
        .map(|value| value.trunc() as u32)
        .filter(|quantity| *quantity >= 1)
        .unwrap_or(1)
}

/// True when the whole cell, minus currency noise, is a plausible price.
pub fn is_price_value(text: &str) -> bool {
    if text.is_empty() {
        return false;
    }

    match strip_currency(text).trim().parse::<f64>() {
        Ok(price) => (MIN_PRICE..=MAX_PRICE).contains(&price),
        Err(_) => false,
    }
}

/// Trims and flattens line breaks into spaces.
pub fn clean_text(text: &str) -> String {
    text.trim().replace(['\n', '\r'], " ")
}
