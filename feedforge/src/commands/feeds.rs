// feedforge/src/commands/feeds.rs

use comfy_table::{Table, presets::UTF8_FULL};
use std::path::{Path, PathBuf};

use feedforge_core::infrastructure::discovery::discover_feeds;

pub fn execute(config_path: Option<&Path>, dir: Option<PathBuf>) -> anyhow::Result<()> {
    let dir = match dir {
        Some(d) => d,
        None => PathBuf::from(super::load_config(config_path)?.output_dir),
    };

    let feeds = discover_feeds(&dir)?;
    if feeds.is_empty() {
        println!("📭 No feeds found in {}", dir.display());
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["File", "Size", "Modified"]);
    for feed in &feeds {
        table.add_row(vec![
            feed.name.clone(),
            human_size(feed.size_bytes),
            feed.modified
                .map(|m| m.format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_else(|| "-".to_string()),
        ]);
    }
    println!("📦 {} feed(s) in {}", feeds.len(), dir.display());
    println!("{table}");
    Ok(())
}

fn human_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} B", bytes)
    } else {
        format!("{:.1} {}", size, UNITS[unit])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_human_size() {
        assert_eq!(human_size(512), "512 B");
        assert_eq!(human_size(2048), "2.0 KB");
        assert_eq!(human_size(5 * 1024 * 1024), "5.0 MB");
    }
}
