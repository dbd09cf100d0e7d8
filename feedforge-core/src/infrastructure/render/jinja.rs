// feedforge-core/src/infrastructure/render/jinja.rs

use minijinja::Environment;

use crate::application::ports::TemplateEngine;
use crate::error::FeedError;
use crate::infrastructure::error::InfrastructureError;

/// minijinja-backed text renderer for reports.
pub struct JinjaRenderer<'a> {
    env: Environment<'a>,
}

impl<'a> JinjaRenderer<'a> {
    pub fn new() -> Self {
        let mut env = Environment::new();
        // Block tags sit on their own lines in the report templates.
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);

        // Left-justify to a column width, like a `{:<width}` format.
        env.add_filter("pad", |value: String, width: usize| -> String {
            format!("{:<width$}", value, width = width)
        });

        Self { env }
    }

    pub fn render_str(
        &self,
        template: &str,
        context: &serde_json::Value,
    ) -> Result<String, InfrastructureError> {
        Ok(self.env.render_str(template, context)?)
    }
}

impl<'a> Default for JinjaRenderer<'a> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> TemplateEngine for JinjaRenderer<'a> {
    fn render(&self, template: &str, context: &serde_json::Value) -> Result<String, FeedError> {
        self.render_str(template, context).map_err(FeedError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::report::render_text_report;
    use crate::application::validation::SchemaValidator;
    use crate::domain::feed::{FeedFormat, TargetRecord};
    use crate::domain::schema::FeedSchema;
    use anyhow::Result;
    use serde_json::json;

    #[test]
    fn test_pad_filter() -> Result<()> {
        let renderer = JinjaRenderer::new();
        let out = renderer.render_str("[{{ name | pad(6) }}]", &json!({"name": "id"}))?;
        assert_eq!(out, "[id    ]");
        Ok(())
    }

    #[test]
    fn test_block_lines_leave_no_blank_lines() -> Result<()> {
        let renderer = JinjaRenderer::new();
        let template = "A\n{% for x in xs %}\n- {{ x }}\n{% endfor %}\nB";
        let out = renderer.render_str(template, &json!({"xs": [1, 2]}))?;
        assert_eq!(out, "A\n- 1\n- 2\nB");
        Ok(())
    }

    #[test]
    fn test_text_report_layout() -> Result<()> {
        let validator = SchemaValidator::new(FeedSchema::builtin(FeedFormat::Assistant)?);
        let good: TargetRecord = serde_json::from_value(json!({
            "item_id": "ns-w-1",
            "title": "Rolex Submariner Date",
            "description": "Diver",
            "url": "https://shop.example.com/p/1",
            "image_url": "https://cdn.example.com/1.jpg",
            "price": 9000.0,
            "currency": "USD",
            "availability": "in_stock",
            "brand": "Rolex",
            "q_and_a": "Q: Is it in stock?\nA: Yes."
        }))?;
        let bad: TargetRecord = serde_json::from_value(json!({
            "item_id": "ns-w-2",
            "title": "Datejust",
            "description": "Dress",
            "image_url": "https://cdn.example.com/2.jpg",
            "price": 7000.0,
            "currency": "USD",
            "availability": "in_stock"
        }))?;

        let report = validator.build_report(&[good, bad]);
        let text = render_text_report(&report, &JinjaRenderer::new())?;

        assert!(text.starts_with(&"=".repeat(80)));
        assert!(text.contains("FEED VALIDATION REPORT: assistant-commerce"));
        assert!(text.contains("Total Products:     2"));
        assert!(text.contains("Valid Products:     1 (50.0%)"));
        assert!(text.contains("✓ item_id                   2/2 (100.0%)"));
        assert!(text.contains("✗ url                       1/2 (50.0%)"));
        assert!(text.contains("  brand                     1/2 (50.0%)"));
        assert!(text.contains("  [1x] missing required field: url"));
        assert!(text.contains("--- Product 1: ns-w-1 ---"));
        assert!(text.contains("Price:        9000.0 USD"));
        assert!(text.contains("Q&A Preview:  Q: Is it in stock? A: Yes."));
        assert!(text.contains("⚠ VALIDATION ISSUES - 1 products have errors"));
        Ok(())
    }
}
