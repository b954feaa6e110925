//! Tab-separated interaction table ingestion

use std::path::Path;

use log;
use polars::prelude::*;

use crate::error::InputError;

/// One row of the interaction table, reduced to the columns we use
///
/// The combined score stays raw text at this stage; the network builder
/// performs the numeric coercion so that unparseable scores can be counted
/// and dropped instead of aborting the run.
#[derive(Debug, Clone, PartialEq)]
pub struct InteractionRecord {
    /// Gene symbol of the first interactor
    pub gene_a: String,

    /// Gene symbol of the second interactor
    pub gene_b: String,

    /// Combined confidence score (0-1000 scale) as read from the file
    pub combined_score: String,
}

impl InteractionRecord {
    pub fn new(
        gene_a: impl Into<String>,
        gene_b: impl Into<String>,
        combined_score: impl Into<String>,
    ) -> Self {
        Self {
            gene_a: gene_a.into(),
            gene_b: gene_b.into(),
            combined_score: combined_score.into(),
        }
    }
}

/// Load interaction records from a TSV file with a header row
///
/// The first three columns are taken positionally as gene A, gene B and
/// combined score; header names and any further columns are ignored. Fewer
/// than three columns is a fatal input error.
pub fn load_interactions(path: &Path) -> Result<Vec<InteractionRecord>, InputError> {
    log::info!("Reading interaction table: {}", path.display());

    if !path.exists() {
        return Err(InputError::FileNotFound(path.to_path_buf()));
    }

    // Read every column as text; numeric coercion of the score column
    // happens in the network builder, where failures become counted drops
    // rather than read errors.
    let df = LazyCsvReader::new(path)
        .with_separator(b'\t')
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .finish()?
        .collect()?;

    if df.width() < 3 {
        return Err(InputError::MalformedColumns(df.width()));
    }

    let columns = df.get_columns();
    let gene_a = text_values(&columns[0])?;
    let gene_b = text_values(&columns[1])?;
    let score = text_values(&columns[2])?;

    let mut records = Vec::with_capacity(df.height());
    for i in 0..df.height() {
        records.push(InteractionRecord {
            gene_a: gene_a.get(i).unwrap_or_default().to_string(),
            gene_b: gene_b.get(i).unwrap_or_default().to_string(),
            combined_score: score.get(i).unwrap_or_default().to_string(),
        });
    }

    log::info!("Loaded {} interaction records", records.len());

    Ok(records)
}

/// View a column as strings whatever dtype the reader inferred
fn text_values(column: &Column) -> Result<StringChunked, InputError> {
    Ok(column.cast(&DataType::String)?.str()?.clone())
}
