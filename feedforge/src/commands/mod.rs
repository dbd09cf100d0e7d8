// feedforge/src/commands/mod.rs

pub mod feeds;
pub mod preview;
pub mod schema;
pub mod transform;
pub mod validate;

use std::path::Path;

use feedforge_core::infrastructure::config::{FeedConfig, load_feed_config};

/// Config from `--config`, or from the working directory when omitted.
pub fn load_config(explicit: Option<&Path>) -> anyhow::Result<FeedConfig> {
    Ok(load_feed_config(explicit, Path::new("."))?)
}
