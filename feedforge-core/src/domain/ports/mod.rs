// feedforge-core/src/domain/ports/mod.rs

pub mod transformer;

pub use transformer::FeedTransformer;
