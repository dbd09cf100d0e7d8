// feedforge-core/src/domain/schema/definition.rs

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::domain::error::DomainError;
use crate::domain::feed::FeedFormat;

const ASSISTANT_SCHEMA: &str = include_str!("../../../schemas/assistant_commerce.yaml");
const SHOPPING_SCHEMA: &str = include_str!("../../../schemas/shopping_search.yaml");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    #[default]
    String,
    Url,
    Number,
    Integer,
    Boolean,
    Array,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Url => "url",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Array => "array",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Constraints attached to one field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldRule {
    #[serde(default)]
    pub kind: FieldKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(default, rename = "enum", skip_serializing_if = "Option::is_none")]
    pub allowed: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl FieldRule {
    pub fn of(kind: FieldKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    pub fn one_of(mut self, values: &[&str]) -> Self {
        self.allowed = Some(values.iter().map(|v| v.to_string()).collect());
        self
    }

    pub fn range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min = min;
        self.max = max;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub field: String,
    #[serde(flatten)]
    pub rule: FieldRule,
}

/// Field groups, in report order. Only `Required` violations are errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldGroup {
    Required,
    Recommended,
    Policy,
    Enhancement,
}

impl FieldGroup {
    pub const ALL: [FieldGroup; 4] = [
        Self::Required,
        Self::Recommended,
        Self::Policy,
        Self::Enhancement,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::Recommended => "recommended",
            Self::Policy => "policy",
            Self::Enhancement => "enhancement",
        }
    }

    pub fn is_required(&self) -> bool {
        matches!(self, Self::Required)
    }
}

impl fmt::Display for FieldGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Declarative target schema, one list of field specs per group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedSchema {
    pub name: String,
    #[serde(default = "default_id_field")]
    pub id_field: String,
    #[serde(default)]
    pub required: Vec<FieldSpec>,
    #[serde(default)]
    pub recommended: Vec<FieldSpec>,
    #[serde(default)]
    pub policy: Vec<FieldSpec>,
    #[serde(default)]
    pub enhancement: Vec<FieldSpec>,
}

impl FeedSchema {
    pub fn builtin(format: FeedFormat) -> Result<Self, DomainError> {
        Self::from_yaml(Self::builtin_yaml(format))
    }

    /// Embedded YAML definition for `format`.
    pub fn builtin_yaml(format: FeedFormat) -> &'static str {
        match format {
            FeedFormat::Assistant => ASSISTANT_SCHEMA,
            FeedFormat::Shopping => SHOPPING_SCHEMA,
        }
    }

    pub fn from_yaml(content: &str) -> Result<Self, DomainError> {
        let schema: FeedSchema = serde_yaml::from_str(content)
            .map_err(|e| DomainError::SchemaError(format!("invalid schema definition: {}", e)))?;
        schema.check()?;
        Ok(schema)
    }

    pub fn group(&self, group: FieldGroup) -> &[FieldSpec] {
        match group {
            FieldGroup::Required => &self.required,
            FieldGroup::Recommended => &self.recommended,
            FieldGroup::Policy => &self.policy,
            FieldGroup::Enhancement => &self.enhancement,
        }
    }

    pub fn groups(&self) -> impl Iterator<Item = (FieldGroup, &[FieldSpec])> {
        FieldGroup::ALL.into_iter().map(|g| (g, self.group(g)))
    }

    pub fn field_count(&self) -> usize {
        self.groups().map(|(_, specs)| specs.len()).sum()
    }

    /// Structural checks that serde cannot express.
    pub fn check(&self) -> Result<(), DomainError> {
        if self.required.is_empty() {
            return Err(DomainError::SchemaError(format!(
                "schema '{}' declares no required fields",
                self.name
            )));
        }

        let mut seen = HashSet::new();
        for (group, specs) in self.groups() {
            for spec in specs {
                if spec.field.trim().is_empty() {
                    return Err(DomainError::SchemaError(format!(
                        "schema '{}' has an unnamed field in group '{}'",
                        self.name, group
                    )));
                }
                if !seen.insert(spec.field.as_str()) {
                    return Err(DomainError::SchemaError(format!(
                        "field '{}' is declared more than once in schema '{}'",
                        spec.field, self.name
                    )));
                }
                if let (Some(min), Some(max)) = (spec.rule.min, spec.rule.max) {
                    if min > max {
                        return Err(DomainError::SchemaError(format!(
                            "field '{}' has min {} greater than max {}",
                            spec.field, min, max
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}

fn default_id_field() -> String {
    "id".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_schemas_load() -> anyhow::Result<()> {
        let assistant = FeedSchema::builtin(FeedFormat::Assistant)?;
        assert_eq!(assistant.id_field, "item_id");
        let required: Vec<&str> = assistant.required.iter().map(|s| s.field.as_str()).collect();
        assert_eq!(required, FeedFormat::Assistant.required_fields());

        let shopping = FeedSchema::builtin(FeedFormat::Shopping)?;
        let required: Vec<&str> = shopping.required.iter().map(|s| s.field.as_str()).collect();
        assert_eq!(required, FeedFormat::Shopping.required_fields());
        Ok(())
    }

    #[test]
    fn test_rule_fields_deserialize() -> anyhow::Result<()> {
        let schema = FeedSchema::builtin(FeedFormat::Assistant)?;
        let window = schema
            .policy
            .iter()
            .find(|s| s.field == "return_window")
            .ok_or_else(|| anyhow::anyhow!("return_window missing"))?;
        assert_eq!(window.rule.kind, FieldKind::Integer);
        assert_eq!(window.rule.max, Some(365.0));

        let brand = schema
            .recommended
            .iter()
            .find(|s| s.field == "brand")
            .ok_or_else(|| anyhow::anyhow!("brand missing"))?;
        assert_eq!(brand.rule.max_length, Some(70));
        Ok(())
    }

    #[test]
    fn test_duplicate_fields_are_rejected() {
        let yaml = r#"
name: dup
required:
  - field: id
    kind: string
recommended:
  - field: id
    kind: string
"#;
        let err = FeedSchema::from_yaml(yaml).err().map(|e| e.to_string()).unwrap_or_default();
        assert!(err.contains("more than once"), "got: {err}");
    }

    #[test]
    fn test_unknown_kind_is_a_schema_error() {
        let yaml = "name: x\nrequired:\n  - field: id\n    kind: date\n";
        assert!(matches!(
            FeedSchema::from_yaml(yaml),
            Err(DomainError::SchemaError(_))
        ));
    }
}
