pub mod project;

pub use crate::domain::merchant::FeedConfig;
pub use project::{CONFIG_CANDIDATES, load_feed_config};
