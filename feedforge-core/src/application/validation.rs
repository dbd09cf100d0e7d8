// feedforge-core/src/application/validation.rs

use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::OnceLock;
use tracing::{info, instrument};

use crate::domain::feed::TargetRecord;
use crate::domain::schema::{FeedSchema, FieldGroup, FieldKind, FieldRule};

pub const TOP_ERROR_LIMIT: usize = 10;
pub const SAMPLE_PRODUCTS: usize = 3;
pub const SAMPLE_ERRORS: usize = 5;

fn re_quoted() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"'[^']*'").unwrap_or_else(|_| Regex::new("$^").unwrap_or_else(|_| unreachable!()))
    })
}

fn re_digits() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\d+").unwrap_or_else(|_| Regex::new("$^").unwrap_or_else(|_| unreachable!()))
    })
}

/// Per-record verdict.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationResult {
    pub index: usize,
    pub item_id: String,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub missing_required: Vec<String>,
    pub missing_recommended: Vec<String>,
    pub fields_present: Vec<String>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldCoverage {
    pub field: String,
    pub present: usize,
    pub total: usize,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupCoverage {
    pub group: FieldGroup,
    pub fields: Vec<FieldCoverage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorClass {
    pub message: String,
    pub count: usize,
}

/// Aggregated verdict for a whole feed.
#[derive(Debug, Clone, Serialize)]
pub struct FeedReport {
    pub schema: String,
    pub total_products: usize,
    pub valid_products: usize,
    pub products_with_errors: usize,
    pub products_with_warnings: usize,
    pub passed: bool,
    pub coverage: Vec<GroupCoverage>,
    pub top_errors: Vec<ErrorClass>,
    pub sample_products: Vec<TargetRecord>,
    pub sample_errors: Vec<ValidationResult>,
    pub unreadable_lines: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation_results: Option<Vec<ValidationResult>>,
}

impl FeedReport {
    pub fn coverage_of(&self, group: FieldGroup) -> Option<&GroupCoverage> {
        self.coverage.iter().find(|c| c.group == group)
    }
}

/// Checks emitted records against a declarative schema.
///
/// Knows nothing about the transformer that produced the records.
#[derive(Debug, Clone)]
pub struct SchemaValidator {
    schema: FeedSchema,
}

impl SchemaValidator {
    pub fn new(schema: FeedSchema) -> Self {
        Self { schema }
    }

    pub fn schema(&self) -> &FeedSchema {
        &self.schema
    }

    pub fn validate_record(&self, record: &TargetRecord, index: usize) -> ValidationResult {
        let item_id = record
            .get(&self.schema.id_field)
            .map(|v| match v {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .unwrap_or_else(|| format!("unknown_{}", index));

        let mut result = ValidationResult {
            index,
            item_id,
            errors: Vec::new(),
            warnings: Vec::new(),
            missing_required: Vec::new(),
            missing_recommended: Vec::new(),
            fields_present: record.keys().cloned().collect(),
        };

        for (group, specs) in self.schema.groups() {
            for spec in specs {
                let name = spec.field.as_str();
                match record.get(name) {
                    None if group.is_required() => {
                        result.missing_required.push(name.to_string());
                        result.errors.push(format!("missing required field: {}", name));
                    }
                    None => {
                        if group == FieldGroup::Recommended {
                            result.missing_recommended.push(name.to_string());
                        }
                    }
                    Some(value) if is_empty_value(value) => {
                        if group.is_required() {
                            result.errors.push(format!("required field '{}' is empty", name));
                        }
                    }
                    Some(value) => {
                        let findings = validate_field(name, value, &spec.rule);
                        if group.is_required() {
                            result.errors.extend(findings);
                        } else {
                            result.warnings.extend(findings);
                        }
                    }
                }
            }
        }

        result
    }

    pub fn build_report(&self, records: &[TargetRecord]) -> FeedReport {
        self.report(records, 0, false)
    }

    /// Full report. `verbose` keeps every per-record result.
    #[instrument(skip(self, records), fields(schema = %self.schema.name, records = records.len()))]
    pub fn report(&self, records: &[TargetRecord], unreadable_lines: usize, verbose: bool) -> FeedReport {
        let results: Vec<ValidationResult> = records
            .iter()
            .enumerate()
            .map(|(i, r)| self.validate_record(r, i))
            .collect();

        let total = records.len();
        let with_errors = results.iter().filter(|r| !r.errors.is_empty()).count();
        let with_warnings = results.iter().filter(|r| !r.warnings.is_empty()).count();

        let coverage = self
            .schema
            .groups()
            .map(|(group, specs)| GroupCoverage {
                group,
                fields: specs
                    .iter()
                    .map(|spec| {
                        let present = records
                            .iter()
                            .filter(|r| r.get(&spec.field).is_some_and(|v| !is_empty_value(v)))
                            .count();
                        FieldCoverage {
                            field: spec.field.clone(),
                            present,
                            total,
                            percentage: percentage(present, total),
                        }
                    })
                    .collect(),
            })
            .collect();

        let sample_errors = results
            .iter()
            .filter(|r| !r.errors.is_empty())
            .take(SAMPLE_ERRORS)
            .cloned()
            .collect();

        info!(total, with_errors, with_warnings, "Validation finished");

        FeedReport {
            schema: self.schema.name.clone(),
            total_products: total,
            valid_products: total - with_errors,
            products_with_errors: with_errors,
            products_with_warnings: with_warnings,
            passed: total > 0 && with_errors == 0,
            coverage,
            top_errors: top_errors(&results),
            sample_products: records.iter().take(SAMPLE_PRODUCTS).cloned().collect(),
            sample_errors,
            unreadable_lines,
            validation_results: verbose.then_some(results),
        }
    }
}

/// Type and constraint check for one present value. Never panics; every
/// finding is returned as a message.
pub fn validate_field(name: &str, value: &Value, rule: &FieldRule) -> Vec<String> {
    let mut errors = Vec::new();

    match rule.kind {
        FieldKind::String => match value.as_str() {
            None => errors.push(format!("{}: expected string, got {}", name, json_type(value))),
            Some(s) => {
                let len = s.chars().count();
                if let Some(max) = rule.max_length {
                    if len > max {
                        errors.push(format!("{}: exceeds max length {} (got {})", name, max, len));
                    }
                }
                if let Some(allowed) = &rule.allowed {
                    if !allowed.iter().any(|a| a == s) {
                        errors.push(format!(
                            "{}: invalid value '{}', expected one of [{}]",
                            name,
                            s,
                            allowed.join(", ")
                        ));
                    }
                }
            }
        },
        FieldKind::Url => match value.as_str() {
            None => errors.push(format!("{}: expected url string, got {}", name, json_type(value))),
            Some(s) => {
                if let Err(msg) = check_url(s) {
                    errors.push(format!("{}: {}", name, msg));
                }
            }
        },
        FieldKind::Number => match value.as_f64() {
            None => errors.push(format!("{}: expected number, got {}", name, json_type(value))),
            Some(n) => check_range(name, value, n, rule, &mut errors),
        },
        FieldKind::Integer => {
            if value.is_i64() || value.is_u64() {
                let n = value.as_f64().unwrap_or_default();
                check_range(name, value, n, rule, &mut errors);
            } else {
                errors.push(format!("{}: expected integer, got {}", name, json_type(value)));
            }
        }
        FieldKind::Boolean => {
            if !value.is_boolean() {
                errors.push(format!("{}: expected boolean, got {}", name, json_type(value)));
            }
        }
        FieldKind::Array => {
            if !value.is_array() {
                errors.push(format!("{}: expected array, got {}", name, json_type(value)));
            }
        }
    }

    errors
}

fn check_range(name: &str, value: &Value, n: f64, rule: &FieldRule, errors: &mut Vec<String>) {
    if let Some(min) = rule.min {
        if n < min {
            errors.push(format!("{}: value {} below minimum {}", name, value, min));
        }
    }
    if let Some(max) = rule.max {
        if n > max {
            errors.push(format!("{}: value {} above maximum {}", name, value, max));
        }
    }
}

fn check_url(raw: &str) -> Result<(), String> {
    let preview: String = raw.chars().take(50).collect();
    let parsed = url::Url::parse(raw).map_err(|_| format!("invalid url format: {}", preview))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(format!("invalid url scheme: {}", parsed.scheme()));
    }
    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(format!("invalid url format: {}", preview));
    }
    Ok(())
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// `false` and `0` are values; only null and empty containers are not.
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
        _ => false,
    }
}

/// Collapses row-specific literals so equal problems count together.
pub fn normalize_error(message: &str) -> String {
    let quoted = re_quoted().replace_all(message, "'...'");
    re_digits().replace_all(&quoted, "N").into_owned()
}

fn top_errors(results: &[ValidationResult]) -> Vec<ErrorClass> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for err in results.iter().flat_map(|r| r.errors.iter()) {
        *counts.entry(normalize_error(err)).or_default() += 1;
    }

    let mut classes: Vec<ErrorClass> = counts
        .into_iter()
        .map(|(message, count)| ErrorClass { message, count })
        .collect();
    classes.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.message.cmp(&b.message)));
    classes.truncate(TOP_ERROR_LIMIT);
    classes
}

fn percentage(present: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (present as f64 / total as f64 * 1000.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::feed::FeedFormat;
    use serde_json::json;

    fn assistant() -> anyhow::Result<SchemaValidator> {
        Ok(SchemaValidator::new(FeedSchema::builtin(FeedFormat::Assistant)?))
    }

    fn valid_record() -> anyhow::Result<TargetRecord> {
        Ok(serde_json::from_value(json!({
            "item_id": "ns-w-1",
            "title": "Submariner",
            "description": "Diver",
            "url": "https://shop.example.com/p/ns-w-1",
            "image_url": "https://cdn.example.com/ns-w-1.jpg",
            "price": 9000.0,
            "currency": "USD",
            "availability": "in_stock",
            "brand": "Rolex",
            "listing_has_variations": false,
            "return_window": 0
        }))?)
    }

    #[test]
    fn test_missing_url_is_an_error() -> anyhow::Result<()> {
        let validator = assistant()?;
        let mut map = valid_record()?.into_map();
        map.remove("url");
        let result = validator.validate_record(&TargetRecord::from(map), 0);

        assert!(result.errors.contains(&"missing required field: url".to_string()));
        assert_eq!(result.missing_required, vec!["url"]);

        let report = validator.build_report(&[valid_record()?, TargetRecord::from(result_map()?)]);
        assert_eq!(report.products_with_errors, 1);
        assert!(!report.passed);
        Ok(())
    }

    fn result_map() -> anyhow::Result<serde_json::Map<String, Value>> {
        let mut map = valid_record()?.into_map();
        map.remove("url");
        Ok(map)
    }

    #[test]
    fn test_long_brand_is_only_a_warning() -> anyhow::Result<()> {
        let validator = assistant()?;
        let mut map = valid_record()?.into_map();
        map.insert("brand".to_string(), json!("B".repeat(80)));
        let result = validator.validate_record(&TargetRecord::from(map), 0);

        assert!(result.errors.is_empty(), "{:?}", result.errors);
        assert_eq!(result.warnings, vec!["brand: exceeds max length 70 (got 80)"]);
        Ok(())
    }

    #[test]
    fn test_empty_required_field() -> anyhow::Result<()> {
        let mut map = valid_record()?.into_map();
        map.insert("title".to_string(), json!(""));
        let result = assistant()?.validate_record(&TargetRecord::from(map), 3);
        assert_eq!(result.errors, vec!["required field 'title' is empty"]);
        assert_eq!(result.index, 3);
        Ok(())
    }

    #[test]
    fn test_validate_field_kinds() {
        let url = FieldRule::of(FieldKind::Url);
        assert!(validate_field("u", &json!("https://a.example/x"), &url).is_empty());
        assert_eq!(
            validate_field("u", &json!("ftp://a.example/x"), &url),
            vec!["u: invalid url scheme: ftp"]
        );
        assert_eq!(
            validate_field("u", &json!("not a url"), &url),
            vec!["u: invalid url format: not a url"]
        );
        assert_eq!(
            validate_field("u", &json!(5), &url),
            vec!["u: expected url string, got number"]
        );

        let window = FieldRule::of(FieldKind::Integer).range(Some(0.0), Some(365.0));
        assert!(validate_field("w", &json!(14), &window).is_empty());
        assert_eq!(validate_field("w", &json!(14.5), &window), vec!["w: expected integer, got number"]);
        assert_eq!(validate_field("w", &json!(400), &window), vec!["w: value 400 above maximum 365"]);

        let price = FieldRule::of(FieldKind::Number).range(Some(0.0), None);
        assert_eq!(validate_field("p", &json!(-1), &price), vec!["p: value -1 below minimum 0"]);
        assert_eq!(validate_field("p", &json!("10"), &price), vec!["p: expected number, got string"]);

        let status = FieldRule::of(FieldKind::String).one_of(&["new", "used"]);
        assert_eq!(
            validate_field("c", &json!("mint"), &status),
            vec!["c: invalid value 'mint', expected one of [new, used]"]
        );

        assert!(validate_field("b", &json!(false), &FieldRule::of(FieldKind::Boolean)).is_empty());
        assert!(!validate_field("a", &json!("US"), &FieldRule::of(FieldKind::Array)).is_empty());
    }

    #[test]
    fn test_error_normalization() {
        assert_eq!(
            normalize_error("currency: invalid value 'XYZ', expected one of [USD]"),
            "currency: invalid value '...', expected one of [USD]"
        );
        assert_eq!(
            normalize_error("item_id: exceeds max length 50 (got 73)"),
            "item_id: exceeds max length N (got N)"
        );
    }

    #[test]
    fn test_top_errors_collapse_across_rows() -> anyhow::Result<()> {
        let validator = assistant()?;
        let records: Vec<TargetRecord> = (0..3)
            .map(|i| {
                let mut map = valid_record()?.into_map();
                map.insert("item_id".to_string(), json!("x".repeat(60 + i)));
                map.remove("url");
                Ok(TargetRecord::from(map))
            })
            .collect::<anyhow::Result<_>>()?;

        let report = validator.build_report(&records);
        assert_eq!(
            report.top_errors,
            vec![
                ErrorClass { message: "item_id: exceeds max length N (got N)".to_string(), count: 3 },
                ErrorClass { message: "missing required field: url".to_string(), count: 3 },
            ]
        );
        Ok(())
    }

    #[test]
    fn test_coverage_counts_false_and_zero_as_present() -> anyhow::Result<()> {
        let validator = assistant()?;
        let mut sparse = valid_record()?.into_map();
        sparse.remove("brand");
        sparse.remove("listing_has_variations");
        sparse.remove("return_window");
        let records = vec![valid_record()?, valid_record()?, TargetRecord::from(sparse)];

        let report = validator.build_report(&records);
        let recommended = report
            .coverage_of(FieldGroup::Recommended)
            .ok_or_else(|| anyhow::anyhow!("no recommended coverage"))?;
        let variations = recommended
            .fields
            .iter()
            .find(|f| f.field == "listing_has_variations")
            .ok_or_else(|| anyhow::anyhow!("field missing"))?;
        assert_eq!(variations.present, 2);
        assert_eq!(variations.percentage, 66.7);

        let policy = report
            .coverage_of(FieldGroup::Policy)
            .ok_or_else(|| anyhow::anyhow!("no policy coverage"))?;
        let window = policy.fields.iter().find(|f| f.field == "return_window");
        assert_eq!(window.map(|f| f.present), Some(2));
        Ok(())
    }

    #[test]
    fn test_report_samples_and_verbose_results() -> anyhow::Result<()> {
        let validator = assistant()?;
        let records: Vec<TargetRecord> = (0..5).map(|_| valid_record()).collect::<anyhow::Result<_>>()?;

        let report = validator.report(&records, 2, true);
        assert!(report.passed);
        assert_eq!(report.sample_products.len(), SAMPLE_PRODUCTS);
        assert!(report.sample_errors.is_empty());
        assert_eq!(report.unreadable_lines, 2);
        assert_eq!(report.validation_results.map(|r| r.len()), Some(5));
        Ok(())
    }

    #[test]
    fn test_empty_feed_does_not_pass() -> anyhow::Result<()> {
        let report = assistant()?.build_report(&[]);
        assert!(!report.passed);
        assert_eq!(report.total_products, 0);
        Ok(())
    }
}
