// feedforge-core/src/domain/feed/record.rs

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::catalog::ProductType;

/// One emitted feed record.
///
/// Insertion drops `null`, empty strings and empty arrays, so a target record
/// never carries a key without a value. Key order follows insertion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TargetRecord {
    fields: Map<String, Value>,
}

impl TargetRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        let value = value.into();
        if is_blank(&value) {
            self.fields.remove(key);
        } else {
            self.fields.insert(key.to_string(), value);
        }
    }

    pub fn set_opt<V: Into<Value>>(&mut self, key: &str, value: Option<V>) {
        if let Some(v) = value {
            self.set(key, v);
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.fields.keys()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.fields
    }
}

impl From<Map<String, Value>> for TargetRecord {
    /// Wraps a mapping as is. Records read back from disk keep any blank
    /// values they carry so the validator can report them.
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

/// Why a well-formed row was intentionally left out of the feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    CallForPrice,
    Offline,
    NonPositivePrice,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TransformOutcome {
    Emitted {
        record: TargetRecord,
        product_type: ProductType,
    },
    Skipped(SkipReason),
}

impl TransformOutcome {
    pub fn emitted(self) -> Option<TargetRecord> {
        match self {
            Self::Emitted { record, .. } => Some(record),
            Self::Skipped(_) => None,
        }
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_blank_values_are_never_stored() {
        let mut record = TargetRecord::new();
        record.set("a", "");
        record.set("b", Value::Null);
        record.set("c", Vec::<String>::new());
        record.set("d", false);
        record.set("e", 0);
        record.set_opt::<String>("f", None);

        assert_eq!(record.keys().collect::<Vec<_>>(), vec!["d", "e"]);
    }

    #[test]
    fn test_blank_overwrite_removes_key() {
        let mut record = TargetRecord::new();
        record.set("brand", "Rolex");
        record.set("brand", "");
        assert!(!record.contains("brand"));
    }

    #[test]
    fn test_serializes_as_plain_object_in_insertion_order() -> anyhow::Result<()> {
        let mut record = TargetRecord::new();
        record.set("item_id", "x1");
        record.set("price", 12.5);
        record.set("availability", "in_stock");
        assert_eq!(
            serde_json::to_string(&record)?,
            r#"{"item_id":"x1","price":12.5,"availability":"in_stock"}"#
        );

        let loaded: TargetRecord = serde_json::from_value(json!({"item_id": "x1"}))?;
        assert_eq!(loaded.get_str("item_id"), Some("x1"));
        Ok(())
    }
}
