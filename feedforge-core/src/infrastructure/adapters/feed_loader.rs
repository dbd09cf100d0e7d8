// feedforge-core/src/infrastructure/adapters/feed_loader.rs

use flate2::read::GzDecoder;
use serde_json::{Map, Value};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use tracing::{info, instrument, warn};

use crate::domain::feed::{Delimiter, Encoding, TargetRecord};
use crate::infrastructure::error::InfrastructureError;

/// Records read back from a previously written feed.
#[derive(Debug, Default)]
pub struct LoadedFeed {
    pub records: Vec<TargetRecord>,
    /// Lines or rows that could not be decoded and were skipped.
    pub unreadable_lines: usize,
}

/// Loads a feed file, choosing the decoder from its extension.
///
/// Undecodable lines are logged and counted, never fatal.
#[instrument]
pub fn load_feed(path: &Path) -> Result<LoadedFeed, InfrastructureError> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let encoding = Encoding::from_path_name(&name)
        .ok_or_else(|| InfrastructureError::UnsupportedFeed(path.display().to_string()))?;

    let file = File::open(path)?;
    let loaded = match encoding {
        Encoding::JsonLines { gzip: true } => read_json_lines(BufReader::new(GzDecoder::new(file)))?,
        Encoding::JsonLines { gzip: false } => read_json_lines(BufReader::new(file))?,
        Encoding::Delimited(delimiter) => read_delimited(file, delimiter)?,
    };

    info!(
        records = loaded.records.len(),
        unreadable = loaded.unreadable_lines,
        "Feed loaded"
    );
    Ok(loaded)
}

pub fn read_json_lines<R: BufRead>(reader: R) -> Result<LoadedFeed, InfrastructureError> {
    let mut feed = LoadedFeed::default();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match serde_json::from_str::<Value>(line) {
            Ok(Value::Object(map)) => feed.records.push(TargetRecord::from(map)),
            Ok(_) => {
                warn!(line = idx + 1, "Skipping non-object JSON line");
                feed.unreadable_lines += 1;
            }
            Err(e) => {
                warn!(line = idx + 1, error = %e, "Skipping invalid JSON line");
                feed.unreadable_lines += 1;
            }
        }
    }
    Ok(feed)
}

/// Delimited feeds come back as string cells; empty cells are dropped.
pub fn read_delimited<R: Read>(reader: R, delimiter: Delimiter) -> Result<LoadedFeed, InfrastructureError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter.byte())
        .flexible(true)
        .from_reader(reader);
    let headers = reader.headers()?.clone();

    let mut feed = LoadedFeed::default();
    for (idx, row) in reader.records().enumerate() {
        match row {
            Ok(row) => {
                let map: Map<String, Value> = headers
                    .iter()
                    .zip(row.iter())
                    .filter(|(_, v)| !v.is_empty())
                    .map(|(h, v)| (h.to_string(), Value::String(v.to_string())))
                    .collect();
                feed.records.push(TargetRecord::from(map));
            }
            Err(e) => {
                warn!(row = idx + 1, error = %e, "Skipping unreadable row");
                feed.unreadable_lines += 1;
            }
        }
    }
    Ok(feed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{SchemaValidator, ShoppingTransformer};
    use crate::domain::feed::FeedFormat;
    use crate::domain::merchant::FeedConfig;
    use crate::domain::ports::FeedTransformer;
    use crate::domain::record::RawRecord;
    use crate::domain::schema::FeedSchema;
    use crate::infrastructure::adapters::FeedWriter;
    use serde_json::json;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_jsonl_round_trip_preserves_mapping() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("feed.jsonl.gz");

        let original: TargetRecord = serde_json::from_value(json!({
            "item_id": "ns-w-1",
            "price": 9000.0,
            "is_eligible_search": true,
            "target_countries": ["US"],
            "return_window": 14,
            "q_and_a": "Q: a?\nA: b."
        }))?;

        let mut writer = FeedWriter::new(
            File::create(&path)?,
            Encoding::JsonLines { gzip: true },
            FeedFormat::Assistant,
        );
        writer.write(&original)?;
        writer.finish()?;

        let loaded = load_feed(&path)?;
        assert_eq!(loaded.records, vec![original]);
        assert_eq!(loaded.unreadable_lines, 0);
        Ok(())
    }

    #[test]
    fn test_invalid_lines_are_counted() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("feed.jsonl");
        fs::write(&path, "{\"item_id\":\"a\"}\n\nnot json\n[1,2]\n{\"item_id\":\"b\"}\n")?;

        let loaded = load_feed(&path)?;
        assert_eq!(loaded.records.len(), 2);
        assert_eq!(loaded.unreadable_lines, 2);
        Ok(())
    }

    #[test]
    fn test_tsv_cells_load_as_strings() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("feed.tsv");
        fs::write(&path, "id\tprice\tgtin\nx1\t10.00 USD\t\n")?;

        let loaded = load_feed(&path)?;
        assert_eq!(loaded.records.len(), 1);
        assert_eq!(loaded.records[0].get_str("price"), Some("10.00 USD"));
        assert!(!loaded.records[0].contains("gtin"));
        Ok(())
    }

    #[test]
    fn test_tsv_shopping_feed_reloads_and_validates() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("shopping_feed.tsv");

        let row = RawRecord::from_pairs([
            ("id", "ns-w-1"),
            ("title", "Submariner Date"),
            ("brand", "Rolex"),
            ("category", "Watches"),
            ("link", "https://shop.example.com/p/ns-w-1"),
            ("image_link", "https://cdn.example.com/ns-w-1.jpg"),
            ("price", "9000"),
            ("availability_status", "IN_STOCK"),
            ("online", "1"),
            (
                "description",
                r#"{"long_description":"<p>Black dial,\tceramic bezel.</p>"}"#,
            ),
            ("specifications", r#"{"isPreOwned":"true","caseSize":"41mm"}"#),
        ]);
        let written = ShoppingTransformer::new(FeedConfig::default())
            .transform(&row)?
            .emitted()
            .ok_or_else(|| anyhow::anyhow!("row was skipped"))?;
        let qa = written
            .get_str("structured_description")
            .ok_or_else(|| anyhow::anyhow!("no structured description"))?
            .to_string();
        assert!(qa.contains('\n'));
        assert!(written.get_str("description").is_some_and(|d| !d.is_empty()));

        let mut writer = FeedWriter::new(
            File::create(&path)?,
            Encoding::Delimited(Delimiter::Tab),
            FeedFormat::Shopping,
        );
        writer.write(&written)?;
        writer.write(&written)?;
        writer.finish()?;

        let loaded = load_feed(&path)?;
        assert_eq!(loaded.records.len(), 2);
        assert_eq!(loaded.unreadable_lines, 0);
        assert_eq!(loaded.records[0].get_str("structured_description"), Some(qa.as_str()));
        assert_eq!(loaded.records[0].get_str("description"), written.get_str("description"));
        assert_eq!(loaded.records[0].get_str("price"), Some("9000.00 USD"));

        let report = SchemaValidator::new(FeedSchema::builtin(FeedFormat::Shopping)?)
            .report(&loaded.records, loaded.unreadable_lines, false);
        assert!(report.passed, "top errors: {:?}", report.top_errors);
        assert_eq!(report.valid_products, 2);
        Ok(())
    }

    #[test]
    fn test_unknown_extension_is_rejected() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("feed.xml");
        fs::write(&path, "<feed/>")?;
        assert!(matches!(
            load_feed(&path),
            Err(InfrastructureError::UnsupportedFeed(_))
        ));
        Ok(())
    }
}
