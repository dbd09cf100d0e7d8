// feedforge-core/src/infrastructure/adapters/csv_source.rs

use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{info, instrument};

use crate::domain::feed::Delimiter;
use crate::domain::record::RawRecord;
use crate::error::FeedError;
use crate::infrastructure::error::InfrastructureError;
use crate::ports::RowSource;

/// Header-labeled rows from a delimited catalog export.
pub struct CsvRowSource<R: Read> {
    reader: csv::Reader<R>,
    headers: Vec<String>,
    buffer: csv::StringRecord,
    exhausted: bool,
}

impl CsvRowSource<File> {
    /// Opens `path`; `.tsv` files are read tab-delimited, everything else as CSV.
    #[instrument]
    pub fn open(path: &Path) -> Result<Self, InfrastructureError> {
        let is_tsv = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("tsv"));
        let delimiter = if is_tsv { Delimiter::Tab } else { Delimiter::Comma };

        let file = File::open(path)?;
        let source = Self::from_reader(file, delimiter)?;
        info!(columns = source.headers.len(), "Catalog opened");
        Ok(source)
    }
}

impl<R: Read> CsvRowSource<R> {
    pub fn from_reader(reader: R, delimiter: Delimiter) -> Result<Self, InfrastructureError> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter.byte())
            .flexible(true)
            .from_reader(reader);

        let headers = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        Ok(Self {
            reader,
            headers,
            buffer: csv::StringRecord::new(),
            exhausted: false,
        })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }
}

impl<R: Read> RowSource for CsvRowSource<R> {
    fn next_row(&mut self) -> Option<Result<RawRecord, FeedError>> {
        if self.exhausted {
            return None;
        }
        match self.reader.read_record(&mut self.buffer) {
            Ok(false) => {
                self.exhausted = true;
                None
            }
            Ok(true) => Some(Ok(self
                .headers
                .iter()
                .cloned()
                .zip(self.buffer.iter().map(str::to_string))
                .collect())),
            Err(e) => {
                // An I/O failure will not clear up on retry; a bad row might.
                if matches!(e.kind(), csv::ErrorKind::Io(_)) {
                    self.exhausted = true;
                }
                Some(Err(e.into()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(source: &mut impl RowSource) -> Vec<Result<RawRecord, FeedError>> {
        std::iter::from_fn(|| source.next_row()).collect()
    }

    #[test]
    fn test_rows_are_keyed_by_header() -> anyhow::Result<()> {
        let data = "id,title,specifications\nns-w-1,Submariner,\"{\"\"isPreOwned\"\":\"\"true\"\"}\"\n";
        let mut source = CsvRowSource::from_reader(data.as_bytes(), Delimiter::Comma)?;
        assert_eq!(source.headers(), ["id", "title", "specifications"]);

        let rows = collect(&mut source);
        assert_eq!(rows.len(), 1);
        let row = rows.into_iter().next().ok_or_else(|| anyhow::anyhow!("no row"))??;
        assert_eq!(row.get("title"), Some("Submariner"));
        assert_eq!(row.raw("specifications"), r#"{"isPreOwned":"true"}"#);
        Ok(())
    }

    #[test]
    fn test_short_rows_leave_columns_absent() -> anyhow::Result<()> {
        let data = "id\ttitle\tbrand\nx1\tOnly title\n";
        let mut source = CsvRowSource::from_reader(data.as_bytes(), Delimiter::Tab)?;
        let row = source.next_row().ok_or_else(|| anyhow::anyhow!("no row"))??;
        assert_eq!(row.get("brand"), None);
        assert!(source.next_row().is_none());
        Ok(())
    }

    #[test]
    fn test_invalid_utf8_row_is_reported_and_reading_continues() -> anyhow::Result<()> {
        let mut data = b"id,title\nx1,ok\nx2,".to_vec();
        data.extend_from_slice(&[0xff, 0xfe]);
        data.extend_from_slice(b"\nx3,fine\n");

        let mut source = CsvRowSource::from_reader(data.as_slice(), Delimiter::Comma)?;
        let rows = collect(&mut source);
        assert_eq!(rows.len(), 3);
        assert!(rows[0].is_ok());
        assert!(rows[1].is_err());
        assert!(rows[2].is_ok());
        Ok(())
    }
}
