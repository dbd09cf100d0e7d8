// feedforge-core/src/ports/sink.rs

// Output boundary: where emitted records go. The encoding is the sink's
// business, the pipeline only hands records over in order.

use crate::domain::feed::TargetRecord;
use crate::error::FeedError;

pub trait RecordSink {
    fn write_record(&mut self, record: &TargetRecord) -> Result<(), FeedError>;
}

/// Collects records in memory.
impl RecordSink for Vec<TargetRecord> {
    fn write_record(&mut self, record: &TargetRecord) -> Result<(), FeedError> {
        self.push(record.clone());
        Ok(())
    }
}
