// feedforge-core/src/domain/content/mod.rs

pub mod canonical;
pub mod highlights;
pub mod qa;
pub mod taxonomy;

pub use canonical::{CanonicalFields, normalize_gender, synthesize};
pub use qa::{MIN_QA_PAIRS, QaBlock, QaPair};
