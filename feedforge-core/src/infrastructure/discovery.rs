// feedforge-core/src/infrastructure/discovery.rs

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};
use walkdir::WalkDir;

use crate::domain::feed::Encoding;
use crate::infrastructure::error::InfrastructureError;

const FEED_SUFFIXES: [&str; 4] = [".jsonl.gz", ".jsonl", ".tsv", ".csv"];

/// A feed file found on disk.
#[derive(Debug, Clone, Serialize)]
pub struct FeedFile {
    pub path: PathBuf,
    pub name: String,
    pub size_bytes: u64,
    pub modified: Option<DateTime<Utc>>,
    #[serde(skip)]
    pub encoding: Option<Encoding>,
}

/// Lists feed files directly inside `dir`, newest first.
///
/// A missing directory yields an empty list.
#[instrument]
pub fn discover_feeds(dir: &Path) -> Result<Vec<FeedFile>, InfrastructureError> {
    if !dir.exists() {
        debug!("Output directory does not exist yet");
        return Ok(Vec::new());
    }

    let mut feeds = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).follow_links(true) {
        let entry = entry.map_err(|e| InfrastructureError::Io(e.into()))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().to_string();
        let lowered = name.to_lowercase();
        if !FEED_SUFFIXES.iter().any(|s| lowered.ends_with(s)) {
            continue;
        }

        let meta = entry.metadata().map_err(|e| InfrastructureError::Io(e.into()))?;
        feeds.push(FeedFile {
            path: entry.path().to_path_buf(),
            encoding: Encoding::from_path_name(&name),
            name,
            size_bytes: meta.len(),
            modified: meta.modified().ok().map(DateTime::<Utc>::from),
        });
    }

    feeds.sort_by(|a, b| b.modified.cmp(&a.modified).then_with(|| a.name.cmp(&b.name)));
    Ok(feeds)
}
