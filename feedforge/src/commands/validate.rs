// feedforge/src/commands/validate.rs
//
// USE CASE: re-read a written feed and check it against a schema.

use anyhow::Context;
use std::fs;
use std::path::PathBuf;

use feedforge_core::application::{SchemaValidator, render_text_report};
use feedforge_core::domain::feed::FeedFormat;
use feedforge_core::domain::schema::FeedSchema;
use feedforge_core::infrastructure::adapters::load_feed;
use feedforge_core::infrastructure::fs::atomic_write;
use feedforge_core::infrastructure::render::JinjaRenderer;

use crate::cli::FormatArg;

pub struct ValidateArgs {
    pub feed: PathBuf,
    pub format: FormatArg,
    pub schema: Option<PathBuf>,
    pub json: bool,
    pub verbose: bool,
    pub output: Option<PathBuf>,
    pub check: bool,
}

pub fn execute(args: ValidateArgs) -> anyhow::Result<()> {
    let schema = match &args.schema {
        Some(path) => {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read schema at {}", path.display()))?;
            FeedSchema::from_yaml(&content)?
        }
        None => FeedSchema::builtin(FeedFormat::from(args.format))?,
    };

    let loaded = load_feed(&args.feed)
        .with_context(|| format!("Failed to load feed {}", args.feed.display()))?;
    eprintln!(
        "🔍 Validating {} record(s) from {} against '{}'...",
        loaded.records.len(),
        args.feed.display(),
        schema.name
    );

    let validator = SchemaValidator::new(schema);
    let report = validator.report(&loaded.records, loaded.unreadable_lines, args.verbose);

    let rendered = if args.json {
        serde_json::to_string_pretty(&report)?
    } else {
        render_text_report(&report, &JinjaRenderer::new())?
    };
    println!("{}", rendered);

    if let Some(path) = &args.output {
        atomic_write(path, &rendered)?;
        eprintln!("📄 Report saved to {}", path.display());
    }

    if args.check && !report.passed {
        eprintln!("\n💥 --check mode: Failing due to validation errors.");
        std::process::exit(1);
    }
    Ok(())
}
