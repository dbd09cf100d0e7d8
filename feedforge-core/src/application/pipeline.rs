// feedforge-core/src/application/pipeline.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

use crate::application::transform::transformer_for;
use crate::domain::error::DomainError;
use crate::domain::feed::{Encoding, FeedFormat, TransformOutcome};
use crate::domain::merchant::FeedConfig;
use crate::domain::ports::FeedTransformer;
use crate::error::FeedError;
use crate::infrastructure::adapters::{CsvRowSource, FeedWriter};
use crate::infrastructure::fs::{StagedFile, atomic_write};
use crate::ports::{RecordSink, RowSource};

pub const STATS_FILE: &str = "last_transform_stats.json";
pub const MAX_ERROR_DETAILS: usize = 10;

/// Summary of one transformation run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransformStats {
    pub total_products: usize,
    pub successful: usize,
    pub skipped: usize,
    pub errors: usize,
    pub error_details: Vec<String>,
    pub product_types: BTreeMap<String, usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_file: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_file: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl TransformStats {
    fn record_error(&mut self, row: usize, message: impl std::fmt::Display) {
        self.errors += 1;
        self.skipped += 1;
        if self.error_details.len() < MAX_ERROR_DETAILS {
            self.error_details.push(format!("Row {}: {}", row, message));
        }
    }
}

/// Drives rows from `source` through `transformer` into `sink`.
///
/// Row-local failures are counted and the run continues. A sink failure
/// aborts the run.
pub fn run_transform(
    source: &mut dyn RowSource,
    transformer: &dyn FeedTransformer,
    sink: &mut dyn RecordSink,
) -> Result<TransformStats, FeedError> {
    let mut stats = TransformStats::default();

    while let Some(next) = source.next_row() {
        stats.total_products += 1;
        let row = stats.total_products;

        let record = match next {
            Ok(record) => record,
            Err(e) => {
                warn!(row, error = %e, "Unreadable catalog row");
                stats.record_error(row, e);
                continue;
            }
        };

        match transformer.transform(&record) {
            Ok(TransformOutcome::Emitted {
                record,
                product_type,
            }) => {
                sink.write_record(&record)?;
                stats.successful += 1;
                *stats
                    .product_types
                    .entry(product_type.as_str().to_string())
                    .or_default() += 1;
            }
            Ok(TransformOutcome::Skipped(reason)) => {
                debug!(row, ?reason, "Row skipped");
                stats.skipped += 1;
            }
            Err(e) => {
                warn!(row, error = %e, "Row rejected");
                stats.record_error(row, e);
            }
        }
    }

    Ok(stats)
}

/// Appends the encoding's extension unless `base` already ends with it.
pub fn resolve_output_path(base: &Path, encoding: Encoding) -> PathBuf {
    let ext = encoding.extension();
    let name = base.to_string_lossy();
    let lower = name.to_lowercase();
    if lower.ends_with(ext) {
        base.to_path_buf()
    } else if encoding == (Encoding::JsonLines { gzip: true }) && lower.ends_with(".jsonl") {
        PathBuf::from(format!("{}.gz", name))
    } else {
        PathBuf::from(format!("{}{}", name, ext))
    }
}

/// Reads a catalog file, writes one feed atomically and persists the run
/// summary next to it.
#[instrument(skip(config), fields(format = %format))]
pub fn transform_file(
    input: &Path,
    output_base: &Path,
    format: FeedFormat,
    encoding: Encoding,
    config: FeedConfig,
) -> Result<TransformStats, FeedError> {
    if !format.supports(encoding) {
        return Err(DomainError::UnsupportedEncoding {
            format: format.to_string(),
            encoding: encoding.extension().trim_start_matches('.').to_string(),
        }
        .into());
    }

    let mut source = CsvRowSource::open(input)?;
    let transformer = transformer_for(format, config);

    let output = resolve_output_path(output_base, encoding);
    let staged = StagedFile::create(&output)?;
    let mut writer = FeedWriter::new(staged, encoding, format);

    let mut stats = run_transform(&mut source, transformer.as_ref(), &mut writer)?;

    let output = writer.finish()?.commit()?;
    info!(
        output = %output.display(),
        successful = stats.successful,
        skipped = stats.skipped,
        errors = stats.errors,
        "Feed written"
    );

    stats.output_file = Some(output.clone());
    stats.input_file = Some(input.to_path_buf());
    stats.timestamp = Some(Utc::now());

    let stats_path = output
        .parent()
        .map(|p| p.join(STATS_FILE))
        .unwrap_or_else(|| PathBuf::from(STATS_FILE));
    atomic_write(&stats_path, serde_json::to_string_pretty(&stats)?)?;

    Ok(stats)
}
