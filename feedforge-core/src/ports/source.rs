// feedforge-core/src/ports/source.rs

// Input boundary: anything that yields header-labeled string rows.

use crate::domain::record::RawRecord;
use crate::error::FeedError;

pub trait RowSource {
    /// Pulls the next row. `Some(Err(_))` is a row-local read failure; the
    /// caller may keep pulling afterwards.
    fn next_row(&mut self) -> Option<Result<RawRecord, FeedError>>;
}

/// In-memory rows, for library callers that already hold the catalog.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    rows: std::collections::VecDeque<RawRecord>,
}

impl MemorySource {
    pub fn new(rows: Vec<RawRecord>) -> Self {
        Self { rows: rows.into() }
    }
}

impl RowSource for MemorySource {
    fn next_row(&mut self) -> Option<Result<RawRecord, FeedError>> {
        self.rows.pop_front().map(Ok)
    }
}
