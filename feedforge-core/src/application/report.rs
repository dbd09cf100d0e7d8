// feedforge-core/src/application/report.rs

// Turns a FeedReport into display-ready strings. The layout itself lives in
// templates/feed_report.txt.j2 and is rendered by whatever TemplateEngine
// the caller hands in.

use serde::Serialize;
use serde_json::Value;

use crate::application::ports::TemplateEngine;
use crate::application::validation::{FeedReport, FieldCoverage};
use crate::domain::feed::TargetRecord;
use crate::domain::schema::FieldGroup;
use crate::error::FeedError;

pub const REPORT_TEMPLATE: &str = include_str!("../../templates/feed_report.txt.j2");

const RULE_WIDTH: usize = 80;
const THIN_RULE_WIDTH: usize = 40;
const SAMPLE_TEXT_LEN: usize = 60;
const QA_PREVIEW_LEN: usize = 100;
const SAMPLE_FIELDS: [(&str, &str); 6] = [
    ("title", "Title"),
    ("brand", "Brand"),
    ("price", "Price"),
    ("availability", "Availability"),
    ("condition", "Condition"),
    ("product_category", "Category"),
];

#[derive(Debug, Serialize)]
struct ReportView {
    rule: String,
    thin_rule: String,
    title: String,
    summary: Vec<Line>,
    groups: Vec<GroupView>,
    top_errors: Vec<ErrorView>,
    samples: Vec<SampleView>,
    verdict: String,
}

#[derive(Debug, Serialize)]
struct Line {
    label: String,
    value: String,
}

impl Line {
    fn new(label: &str, value: impl Into<String>) -> Self {
        Self {
            label: label.to_string(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Serialize)]
struct GroupView {
    title: String,
    fields: Vec<FieldView>,
}

#[derive(Debug, Serialize)]
struct FieldView {
    marker: &'static str,
    field: String,
    present: String,
    total: String,
    percentage: String,
}

#[derive(Debug, Serialize)]
struct ErrorView {
    count: String,
    message: String,
}

#[derive(Debug, Serialize)]
struct SampleView {
    id: String,
    lines: Vec<Line>,
}

pub fn render_text_report(report: &FeedReport, engine: &dyn TemplateEngine) -> Result<String, FeedError> {
    let view = serde_json::to_value(build_view(report))?;
    engine.render(REPORT_TEMPLATE, &view)
}

fn build_view(report: &FeedReport) -> ReportView {
    let total = report.total_products;
    let mut summary = vec![
        Line::new("Total Products:", thousands(total)),
        Line::new(
            "Valid Products:",
            if total > 0 {
                format!(
                    "{} ({:.1}%)",
                    thousands(report.valid_products),
                    report.valid_products as f64 / total as f64 * 100.0
                )
            } else {
                "0".to_string()
            },
        ),
        Line::new("Products w/Errors:", thousands(report.products_with_errors)),
        Line::new("Products w/Warnings:", thousands(report.products_with_warnings)),
    ];
    if report.unreadable_lines > 0 {
        summary.push(Line::new("Unreadable Lines:", thousands(report.unreadable_lines)));
    }

    let groups = report
        .coverage
        .iter()
        .map(|c| GroupView {
            title: group_title(c.group).to_string(),
            fields: c.fields.iter().map(|f| field_view(c.group, f)).collect(),
        })
        .collect();

    let top_errors = report
        .top_errors
        .iter()
        .map(|e| ErrorView {
            count: thousands(e.count),
            message: e.message.clone(),
        })
        .collect();

    let samples = report.sample_products.iter().map(sample_view).collect();

    let verdict = if report.passed {
        format!("✓ VALIDATION PASSED - Feed is valid {} format", report.schema)
    } else if total == 0 {
        "⚠ VALIDATION ISSUES - feed contains no products".to_string()
    } else {
        format!(
            "⚠ VALIDATION ISSUES - {} products have errors",
            report.products_with_errors
        )
    };

    ReportView {
        rule: "=".repeat(RULE_WIDTH),
        thin_rule: "-".repeat(THIN_RULE_WIDTH),
        title: format!("FEED VALIDATION REPORT: {}", report.schema),
        summary,
        groups,
        top_errors,
        samples,
        verdict,
    }
}

fn group_title(group: FieldGroup) -> &'static str {
    match group {
        FieldGroup::Required => "REQUIRED FIELD COVERAGE",
        FieldGroup::Recommended => "RECOMMENDED FIELD COVERAGE",
        FieldGroup::Policy => "POLICY FIELD COVERAGE (Required for Checkout)",
        FieldGroup::Enhancement => "ENHANCEMENT FIELD COVERAGE",
    }
}

fn field_view(group: FieldGroup, coverage: &FieldCoverage) -> FieldView {
    let pct = coverage.percentage;
    let marker = match group {
        FieldGroup::Required if pct >= 100.0 => "✓",
        FieldGroup::Required if pct > 90.0 => "⚠",
        FieldGroup::Required => "✗",
        FieldGroup::Policy if pct >= 100.0 => "✓",
        FieldGroup::Policy if pct > 0.0 => "⚠",
        FieldGroup::Policy => "✗",
        FieldGroup::Recommended | FieldGroup::Enhancement => " ",
    };
    FieldView {
        marker,
        field: coverage.field.clone(),
        present: thousands(coverage.present),
        total: thousands(coverage.total),
        percentage: format!("{:.1}", pct),
    }
}

fn sample_view(record: &TargetRecord) -> SampleView {
    let id = ["item_id", "id"]
        .iter()
        .find_map(|k| record.get(k).map(display))
        .unwrap_or_else(|| "N/A".to_string());

    let mut lines: Vec<Line> = SAMPLE_FIELDS
        .iter()
        .filter_map(|(key, label)| {
            let mut value = record.get(key).map(display)?;
            if *key == "price" {
                if let Some(currency) = record.get_str("currency") {
                    value = format!("{} {}", value, currency);
                }
            }
            Some(Line::new(label, shorten(&value, SAMPLE_TEXT_LEN)))
        })
        .collect();

    if let Some(qa) = record.get_str("q_and_a") {
        lines.push(Line::new("Q&A Preview", shorten(&qa.replace('\n', " "), QA_PREVIEW_LEN)));
    }
    lines.push(Line::new("Fields", format!("{} total", record.len())));

    SampleView { id, lines }
}

fn display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn shorten(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        format!("{}...", text.chars().take(max).collect::<String>())
    } else {
        text.to_string()
    }
}

fn thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
