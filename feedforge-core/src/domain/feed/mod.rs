// feedforge-core/src/domain/feed/mod.rs

pub mod format;
pub mod record;

pub use format::{Delimiter, Encoding, FeedFormat};
pub use record::{SkipReason, TargetRecord, TransformOutcome};
