// feedforge-core/src/domain/record.rs

use std::collections::HashMap;

/// One row of the merchant catalog, keyed by header name.
///
/// Values are kept exactly as read. Accessors treat empty or whitespace-only
/// cells as absent so that callers never have to distinguish "" from a
/// missing column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    fields: HashMap<String, String>,
}

impl RawRecord {
    pub fn new(fields: HashMap<String, String>) -> Self {
        Self { fields }
    }

    /// Builds a record from `(column, value)` pairs. Later duplicates win.
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self {
            fields: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Returns the trimmed value of `column`, or `None` when absent or blank.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .get(column)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// Raw, untrimmed cell content. JSON-bearing columns go through this one.
    pub fn raw(&self, column: &str) -> &str {
        self.fields.get(column).map(String::as_str).unwrap_or("")
    }

    /// Ordered alias lookup: the first column holding a non-blank value wins.
    pub fn first_of(&self, columns: &[&str]) -> Option<&str> {
        columns.iter().find_map(|c| self.get(c))
    }

    /// Case-insensitive `"true"` check on a text column.
    pub fn is_true(&self, column: &str) -> bool {
        self.get(column)
            .is_some_and(|v| v.eq_ignore_ascii_case("true"))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.fields.iter()
    }
}

impl FromIterator<(String, String)> for RawRecord {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}
