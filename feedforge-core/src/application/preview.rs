// feedforge-core/src/application/preview.rs

use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

use crate::application::transform::transformer_for;
use crate::domain::catalog::ProductType;
use crate::domain::feed::{FeedFormat, SkipReason, TargetRecord, TransformOutcome};
use crate::domain::merchant::FeedConfig;
use crate::domain::record::RawRecord;
use crate::error::FeedError;
use crate::infrastructure::adapters::CsvRowSource;
use crate::ports::RowSource;

/// Which catalog row to preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowSelector {
    /// 1-based data row number (the header is not counted).
    Position(usize),
    Id(String),
}

impl Default for RowSelector {
    fn default() -> Self {
        Self::Position(1)
    }
}

impl RowSelector {
    fn matches(&self, position: usize, record: &RawRecord) -> bool {
        match self {
            Self::Position(p) => *p == position,
            Self::Id(id) => record.get("id") == Some(id.as_str()),
        }
    }
}

/// One row before and after transformation.
#[derive(Debug, Clone, Serialize)]
pub struct Preview {
    pub row: usize,
    pub input: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_type: Option<ProductType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<TargetRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skipped: Option<SkipReason>,
}

/// Scans `source` for the selected row and transforms it alone.
///
/// Returns `Ok(None)` when no row matches. Unreadable rows are passed over.
pub fn preview_row(
    source: &mut dyn RowSource,
    selector: &RowSelector,
    format: FeedFormat,
    config: FeedConfig,
) -> Result<Option<Preview>, FeedError> {
    let transformer = transformer_for(format, config);
    let mut position = 0;

    while let Some(next) = source.next_row() {
        position += 1;
        let Ok(record) = next else { continue };
        if !selector.matches(position, &record) {
            continue;
        }

        let input = record
            .iter()
            .filter(|(_, v)| !v.trim().is_empty())
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        let mut preview = Preview {
            row: position,
            input,
            product_type: None,
            output: None,
            skipped: None,
        };
        match transformer.transform(&record)? {
            TransformOutcome::Emitted {
                record,
                product_type,
            } => {
                preview.product_type = Some(product_type);
                preview.output = Some(record);
            }
            TransformOutcome::Skipped(reason) => preview.skipped = Some(reason),
        }
        return Ok(Some(preview));
    }

    Ok(None)
}

pub fn preview_file(
    input: &Path,
    selector: &RowSelector,
    format: FeedFormat,
    config: FeedConfig,
) -> Result<Option<Preview>, FeedError> {
    let mut source = CsvRowSource::open(input)?;
    preview_row(&mut source, selector, format, config)
}
