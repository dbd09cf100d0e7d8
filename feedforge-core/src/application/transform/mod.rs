// feedforge-core/src/application/transform/mod.rs

pub mod assistant;
pub mod shopping;

pub use assistant::AssistantTransformer;
pub use shopping::ShoppingTransformer;

use crate::domain::feed::{FeedFormat, SkipReason};
use crate::domain::merchant::FeedConfig;
use crate::domain::parsing::{extract_price, truncate_chars};
use crate::domain::ports::FeedTransformer;
use crate::domain::record::RawRecord;

/// Feed membership gate, shared by every format.
///
/// Returns the resolved price when the row belongs in the feed.
pub fn screen(record: &RawRecord) -> Result<(f64, String), SkipReason> {
    if record.is_true("call_for_price") {
        return Err(SkipReason::CallForPrice);
    }
    if record.get("online") != Some("1") {
        return Err(SkipReason::Offline);
    }

    let (price, currency) = extract_price(record.raw("price"), record.raw("book_price"));
    if price <= 0.0 {
        return Err(SkipReason::NonPositivePrice);
    }
    Ok((price, currency))
}

/// Builds the transformer for `format`, owning its configuration.
pub fn transformer_for(format: FeedFormat, config: FeedConfig) -> Box<dyn FeedTransformer> {
    match format {
        FeedFormat::Assistant => Box::new(AssistantTransformer::new(config)),
        FeedFormat::Shopping => Box::new(ShoppingTransformer::new(config)),
    }
}

pub(crate) fn clip(text: &str, max: usize) -> String {
    truncate_chars(text, max).to_string()
}

pub(crate) fn clip_opt(text: &Option<String>, max: usize) -> Option<String> {
    text.as_deref().map(|t| clip(t, max))
}
