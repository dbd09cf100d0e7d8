// feedforge/src/commands/transform.rs
//
// USE CASE: catalog file -> feed file (+ last_transform_stats.json).

use anyhow::Context;
use comfy_table::{Table, presets::UTF8_FULL};
use std::path::{Path, PathBuf};

use feedforge_core::application::transform_file;
use feedforge_core::domain::feed::{Encoding, FeedFormat};

use crate::cli::{EncodingArg, FormatArg};

pub fn execute(
    config_path: Option<&Path>,
    input: PathBuf,
    format: FormatArg,
    output: Option<PathBuf>,
    encoding: Option<EncodingArg>,
    no_compress: bool,
) -> anyhow::Result<()> {
    let start = std::time::Instant::now();
    let format = FeedFormat::from(format);

    println!("⚙️  Loading configuration...");
    let config = super::load_config(config_path)?;
    println!("   Store: {}", config.seller.store_name);

    let encoding = match encoding {
        Some(e) => e.resolve(!no_compress),
        None => match format.default_encoding() {
            Encoding::JsonLines { gzip } => Encoding::JsonLines {
                gzip: gzip && !no_compress,
            },
            other => other,
        },
    };
    let output = output
        .unwrap_or_else(|| PathBuf::from(&config.output_dir).join(format.default_file_stem()));

    println!("🚀 Transforming {} -> {} feed...", input.display(), format);
    let stats = transform_file(&input, &output, format, encoding, config)
        .with_context(|| format!("Transformation of {} failed", input.display()))?;

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Metric", "Count"]);
    table.add_row(vec!["Total rows".to_string(), stats.total_products.to_string()]);
    table.add_row(vec!["Emitted".to_string(), stats.successful.to_string()]);
    table.add_row(vec!["Skipped".to_string(), stats.skipped.to_string()]);
    table.add_row(vec!["Errors".to_string(), stats.errors.to_string()]);
    for (product_type, count) in &stats.product_types {
        table.add_row(vec![format!("  {}", product_type), count.to_string()]);
    }
    println!("{table}");

    if !stats.error_details.is_empty() {
        eprintln!("\n⚠️  {} row(s) could not be transformed:", stats.errors);
        for detail in &stats.error_details {
            eprintln!("   ❌ {}", detail);
        }
    }

    if let Some(path) = &stats.output_file {
        println!("📄 Feed written to {}", path.display());
    }
    println!("\n✨ Done in {:.2?}", start.elapsed());
    Ok(())
}
