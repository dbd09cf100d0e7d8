// feedforge-core/src/ports/mod.rs

pub mod sink;
pub mod source;

pub use sink::RecordSink;
pub use source::{MemorySource, RowSource};
