// feedforge/src/commands/schema.rs

use comfy_table::{Table, presets::UTF8_FULL};

use feedforge_core::domain::feed::FeedFormat;
use feedforge_core::domain::schema::{FeedSchema, FieldRule};

use crate::cli::FormatArg;

pub fn execute(format: FormatArg, yaml: bool) -> anyhow::Result<()> {
    let format = FeedFormat::from(format);
    if yaml {
        print!("{}", FeedSchema::builtin_yaml(format));
        return Ok(());
    }

    let schema = FeedSchema::builtin(format)?;
    println!("📚 {} ({} fields, id: {})", schema.name, schema.field_count(), schema.id_field);

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Group", "Field", "Type", "Constraints"]);
    for (group, specs) in schema.groups() {
        for spec in specs {
            table.add_row(vec![
                group.to_string(),
                spec.field.clone(),
                spec.rule.kind.to_string(),
                constraints(&spec.rule),
            ]);
        }
    }
    println!("{table}");
    Ok(())
}

fn constraints(rule: &FieldRule) -> String {
    let mut parts = Vec::new();
    if let Some(max) = rule.max_length {
        parts.push(format!("max {} chars", max));
    }
    if let Some(allowed) = &rule.allowed {
        parts.push(format!("one of {}", allowed.join("|")));
    }
    if let Some(min) = rule.min {
        parts.push(format!(">= {}", min));
    }
    if let Some(max) = rule.max {
        parts.push(format!("<= {}", max));
    }
    parts.join(", ")
}
