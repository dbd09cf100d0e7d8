// feedforge-core/src/infrastructure/adapters/mod.rs

pub mod csv_source;
pub mod feed_loader;
pub mod feed_writer;

pub use csv_source::CsvRowSource;
pub use feed_loader::{LoadedFeed, load_feed};
pub use feed_writer::FeedWriter;
