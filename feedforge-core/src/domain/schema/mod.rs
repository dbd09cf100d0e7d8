// feedforge-core/src/domain/schema/mod.rs

pub mod definition;

pub use definition::{FeedSchema, FieldGroup, FieldKind, FieldRule, FieldSpec};
