// feedforge-core/src/domain/ports/transformer.rs

use crate::domain::error::DomainError;
use crate::domain::feed::{FeedFormat, TransformOutcome};
use crate::domain::record::RawRecord;

/// Maps one catalog row onto a target feed shape.
///
/// Implementations apply the skip gate before any mapping and return
/// `Err` only for rows that cannot be mapped at all.
pub trait FeedTransformer: Send + Sync {
    fn format(&self) -> FeedFormat;

    fn required_fields(&self) -> &'static [&'static str] {
        self.format().required_fields()
    }

    fn transform(&self, record: &RawRecord) -> Result<TransformOutcome, DomainError>;
}
