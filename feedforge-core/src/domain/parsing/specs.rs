// feedforge-core/src/domain/parsing/specs.rs

use serde_json::{Map, Value};

use super::field::{ParsedField, parse_json_field};

/// Attribute bag decoded from the `specifications` column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedSpecs {
    values: Map<String, Value>,
}

impl ParsedSpecs {
    pub fn parse(raw: &str) -> Self {
        Self::from_field(parse_json_field(raw))
    }

    /// Anything that is not a JSON object decodes to an empty bag.
    pub fn from_field(field: ParsedField) -> Self {
        match field.into_value() {
            Value::Object(values) => Self { values },
            _ => Self::default(),
        }
    }

    /// Scalar rendered as text. Strings are trimmed; blanks, booleans, nulls
    /// and nested values read as absent.
    pub fn text(&self, key: &str) -> Option<String> {
        match self.values.get(key)? {
            Value::String(s) => {
                let s = s.trim();
                (!s.is_empty()).then(|| s.to_string())
            }
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// First alias holding a value. Later keys are fallbacks, never merged.
    pub fn first_of(&self, keys: &[&str]) -> Option<String> {
        keys.iter().find_map(|k| self.text(k))
    }

    /// Upstream flags arrive as the JSON *string* "true". A JSON boolean is
    /// deliberately not accepted here; see the pre-owned flag tests.
    pub fn flag(&self, key: &str) -> bool {
        matches!(self.values.get(key), Some(Value::String(s)) if s.trim().eq_ignore_ascii_case("true"))
    }

    pub fn any_flag(&self, keys: &[&str]) -> bool {
        keys.iter().any(|k| self.flag(k))
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }
}
