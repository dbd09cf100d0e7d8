// feedforge-core/src/domain/parsing/field.rs

use regex::Regex;
use serde_json::{Map, Value};
use std::sync::OnceLock;

/// Maximum description length accepted by both target formats.
pub const MAX_DESCRIPTION_LEN: usize = 5000;

/// Currency used whenever the catalog does not state one.
pub const DEFAULT_CURRENCY: &str = "USD";

/// Key of the seller's USD list price inside the `book_price` JSON array.
pub const LIST_PRICE_KEY: &str = "ns-company-list-usd";

fn re_markup() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"<[^>]+>").unwrap_or_else(|_| {
            // Hardcoded pattern; the fallback matches nothing.
            Regex::new("$^").unwrap_or_else(|_| unreachable!())
        })
    })
}

/// Outcome of decoding a JSON-bearing cell.
///
/// Decoding never fails past this point: `into_value` turns both `Absent` and
/// `Malformed` into an empty mapping, but callers that care can still tell
/// the two apart.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedField {
    Absent,
    Malformed(String),
    Value(Value),
}

impl ParsedField {
    pub fn into_value(self) -> Value {
        match self {
            ParsedField::Value(v) => v,
            ParsedField::Absent | ParsedField::Malformed(_) => Value::Object(Map::new()),
        }
    }

    pub fn as_value(&self) -> Option<&Value> {
        match self {
            ParsedField::Value(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, ParsedField::Malformed(_))
    }
}

pub fn parse_json_field(raw: &str) -> ParsedField {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return ParsedField::Absent;
    }
    match serde_json::from_str::<Value>(trimmed) {
        Ok(value) => ParsedField::Value(value),
        Err(e) => ParsedField::Malformed(e.to_string()),
    }
}

/// Character-based truncation; never splits a code point and is idempotent.
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

pub fn strip_markup(text: &str) -> String {
    re_markup().replace_all(text, "").into_owned()
}

/// Plain-text description from the decoded `description` cell.
///
/// Prefers `long_description`, falls back to `short_description`. Tags are
/// stripped before the 5000 character cut so markup never eats the budget.
pub fn extract_description(parsed: &Value) -> String {
    let desc = match parsed {
        Value::Object(obj) => ["long_description", "short_description"]
            .iter()
            .find_map(|k| {
                obj.get(*k)
                    .and_then(Value::as_str)
                    .filter(|s| !s.trim().is_empty())
            })
            .unwrap_or(""),
        Value::String(s) => s.as_str(),
        _ => "",
    };

    let stripped = strip_markup(desc);
    truncate_chars(stripped.trim(), MAX_DESCRIPTION_LEN)
        .trim_end()
        .to_string()
}

/// Resolves the selling price and its currency.
///
/// The USD list price from the price-list column wins when it is positive;
/// otherwise the flat `price` column is parsed. Unparseable input degrades to
/// `(0.0, "USD")`, which the skip gate later rejects.
pub fn extract_price(price: &str, price_list: &str) -> (f64, String) {
    if let ParsedField::Value(Value::Array(entries)) = parse_json_field(price_list) {
        let list_price = entries
            .iter()
            .filter_map(|entry| entry.get(LIST_PRICE_KEY))
            .filter_map(json_number)
            .find(|p| p.is_finite() && *p > 0.0);
        if let Some(p) = list_price {
            return (p, DEFAULT_CURRENCY.to_string());
        }
    }

    match price.trim().parse::<f64>() {
        Ok(p) if p.is_finite() => (p, DEFAULT_CURRENCY.to_string()),
        _ => (0.0, DEFAULT_CURRENCY.to_string()),
    }
}

fn json_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Image URLs from a JSON array of `{ "url": ... }` objects, in source order.
pub fn extract_image_list(raw: &str) -> Vec<String> {
    match parse_json_field(raw) {
        ParsedField::Value(Value::Array(items)) => items
            .iter()
            .filter_map(|item| item.get("url").and_then(Value::as_str))
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}
