// feedforge-core/src/infrastructure/adapters/feed_writer.rs

use flate2::Compression;
use flate2::write::GzEncoder;
use serde_json::Value;
use std::collections::BTreeSet;
use std::io::{self, BufWriter, Write};

use crate::domain::feed::{Delimiter, Encoding, FeedFormat, TargetRecord};
use crate::error::FeedError;
use crate::infrastructure::error::InfrastructureError;
use crate::ports::RecordSink;

/// Serializes target records onto any byte sink.
///
/// Line-delimited JSON streams record by record. The delimited encodings
/// buffer every record until [`FeedWriter::finish`], because the header is
/// the union of all keys.
pub struct FeedWriter<W: Write> {
    inner: Inner<W>,
    format: FeedFormat,
    written: usize,
}

enum Inner<W: Write> {
    Plain(BufWriter<W>),
    Gzip(GzEncoder<BufWriter<W>>),
    Delimited {
        out: W,
        delimiter: Delimiter,
        buffered: Vec<TargetRecord>,
    },
}

impl<W: Write> FeedWriter<W> {
    pub fn new(out: W, encoding: Encoding, format: FeedFormat) -> Self {
        let inner = match encoding {
            Encoding::JsonLines { gzip: false } => Inner::Plain(BufWriter::new(out)),
            Encoding::JsonLines { gzip: true } => {
                Inner::Gzip(GzEncoder::new(BufWriter::new(out), Compression::default()))
            }
            Encoding::Delimited(delimiter) => Inner::Delimited {
                out,
                delimiter,
                buffered: Vec::new(),
            },
        };
        Self {
            inner,
            format,
            written: 0,
        }
    }

    pub fn write(&mut self, record: &TargetRecord) -> Result<(), InfrastructureError> {
        match &mut self.inner {
            Inner::Plain(out) => write_json_line(out, record)?,
            Inner::Gzip(out) => write_json_line(out, record)?,
            Inner::Delimited { buffered, .. } => buffered.push(record.clone()),
        }
        self.written += 1;
        Ok(())
    }

    pub fn written(&self) -> usize {
        self.written
    }

    /// Flushes everything and hands the underlying sink back.
    pub fn finish(self) -> Result<W, InfrastructureError> {
        match self.inner {
            Inner::Plain(out) => out.into_inner().map_err(|e| InfrastructureError::Io(e.into_error())),
            Inner::Gzip(encoder) => encoder
                .finish()?
                .into_inner()
                .map_err(|e| InfrastructureError::Io(e.into_error())),
            Inner::Delimited {
                out,
                delimiter,
                buffered,
            } => write_delimited(out, delimiter, self.format, &buffered),
        }
    }
}

impl<W: Write> RecordSink for FeedWriter<W> {
    fn write_record(&mut self, record: &TargetRecord) -> Result<(), FeedError> {
        self.write(record).map_err(FeedError::from)
    }
}

fn write_json_line<W: Write>(out: &mut W, record: &TargetRecord) -> Result<(), InfrastructureError> {
    serde_json::to_writer(&mut *out, record)?;
    out.write_all(b"\n")?;
    Ok(())
}

/// Column order: the format's required fields that occur in at least one
/// record, in canonical order, then every other key sorted.
pub fn header_for(format: FeedFormat, records: &[TargetRecord]) -> Vec<String> {
    let all: BTreeSet<&str> = records
        .iter()
        .flat_map(|r| r.keys().map(String::as_str))
        .collect();

    let required = format.required_fields();
    let mut header: Vec<String> = required
        .iter()
        .filter(|f| all.contains(**f))
        .map(|f| f.to_string())
        .collect();
    header.extend(
        all.iter()
            .filter(|k| !required.iter().any(|r| r == *k))
            .map(|k| k.to_string()),
    );
    header
}

fn write_delimited<W: Write>(
    out: W,
    delimiter: Delimiter,
    format: FeedFormat,
    records: &[TargetRecord],
) -> Result<W, InfrastructureError> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter.byte())
        .from_writer(out);

    if !records.is_empty() {
        let header = header_for(format, records);
        writer.write_record(&header)?;
        for record in records {
            writer.write_record(header.iter().map(|column| cell(record.get(column))))?;
        }
    }

    writer
        .into_inner()
        .map_err(|e| InfrastructureError::Io(io::Error::new(e.error().kind(), e.error().to_string())))
}

fn cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join(","),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::GzDecoder;
    use std::io::Read;

    fn record(pairs: &[(&str, Value)]) -> TargetRecord {
        let mut r = TargetRecord::new();
        for (k, v) in pairs {
            r.set(k, v.clone());
        }
        r
    }

    #[test]
    fn test_jsonl_one_object_per_line() -> anyhow::Result<()> {
        let mut writer = FeedWriter::new(Vec::new(), Encoding::JsonLines { gzip: false }, FeedFormat::Assistant);
        writer.write(&record(&[("item_id", "a".into()), ("price", 10.5.into())]))?;
        writer.write(&record(&[("item_id", "b".into())]))?;
        assert_eq!(writer.written(), 2);

        let bytes = writer.finish()?;
        assert_eq!(
            String::from_utf8(bytes)?,
            "{\"item_id\":\"a\",\"price\":10.5}\n{\"item_id\":\"b\"}\n"
        );
        Ok(())
    }

    #[test]
    fn test_gzip_output_decompresses() -> anyhow::Result<()> {
        let mut writer = FeedWriter::new(Vec::new(), Encoding::JsonLines { gzip: true }, FeedFormat::Assistant);
        writer.write(&record(&[("item_id", "a".into())]))?;
        let bytes = writer.finish()?;

        let mut text = String::new();
        GzDecoder::new(bytes.as_slice()).read_to_string(&mut text)?;
        assert_eq!(text, "{\"item_id\":\"a\"}\n");
        Ok(())
    }

    #[test]
    fn test_header_required_first_then_sorted() {
        let records = vec![
            record(&[("zeta", "1".into()), ("title", "T".into()), ("id", "1".into())]),
            record(&[("alpha", "2".into()), ("price", "5.00 USD".into()), ("id", "2".into())]),
        ];
        assert_eq!(
            header_for(FeedFormat::Shopping, &records),
            vec!["id", "title", "price", "alpha", "zeta"]
        );
    }

    #[test]
    fn test_tsv_fills_missing_cells_and_joins_arrays() -> anyhow::Result<()> {
        let mut writer = FeedWriter::new(
            Vec::new(),
            Encoding::Delimited(Delimiter::Tab),
            FeedFormat::Shopping,
        );
        writer.write(&record(&[("id", "1".into()), ("gender", "male".into())]))?;
        writer.write(&record(&[
            ("id", "2".into()),
            ("tags", serde_json::json!(["a", "b"])),
        ]))?;
        let text = String::from_utf8(writer.finish()?)?;

        assert_eq!(text, "id\tgender\ttags\n1\tmale\t\n2\t\ta,b\n");
        Ok(())
    }

    #[test]
    fn test_empty_delimited_feed_writes_nothing() -> anyhow::Result<()> {
        let writer = FeedWriter::new(Vec::new(), Encoding::Delimited(Delimiter::Comma), FeedFormat::Shopping);
        assert!(writer.finish()?.is_empty());
        Ok(())
    }
}
