// feedforge/src/commands/preview.rs

use std::path::{Path, PathBuf};

use feedforge_core::application::{RowSelector, preview_file};
use feedforge_core::domain::feed::FeedFormat;

use crate::cli::FormatArg;

pub fn execute(
    config_path: Option<&Path>,
    input: PathBuf,
    format: FormatArg,
    id: Option<String>,
    row: usize,
) -> anyhow::Result<()> {
    let config = super::load_config(config_path)?;
    let selector = match id {
        Some(id) => RowSelector::Id(id),
        None => RowSelector::Position(row),
    };

    let Some(preview) = preview_file(&input, &selector, FeedFormat::from(format), config)? else {
        anyhow::bail!("❌ No row matching {:?} in {}", selector, input.display());
    };

    println!("🔍 Row {} of {}", preview.row, input.display());
    println!("\n--- INPUT ---");
    println!("{}", serde_json::to_string_pretty(&preview.input)?);

    println!("\n--- OUTPUT ---");
    match (&preview.output, preview.skipped) {
        (Some(record), _) => {
            if let Some(product_type) = preview.product_type {
                println!("   Product type: {}", product_type);
            }
            println!("{}", serde_json::to_string_pretty(record)?);
        }
        (None, Some(reason)) => println!("⏭️  Skipped: {}", serde_json::to_string(&reason)?),
        (None, None) => println!("(no output)"),
    }
    Ok(())
}
