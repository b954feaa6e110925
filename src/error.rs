//! Input error types

use std::path::PathBuf;

use thiserror::Error;

/// Fatal problems with the input files
///
/// Only unreadable or structurally malformed input aborts a run. Everything
/// else (empty network, no valid seeds, dropped records) is reported as a
/// structured outcome instead.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("input file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("interaction table has {0} columns, expected at least 3")]
    MalformedColumns(usize),

    #[error("failed to read input file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to read interaction table: {0}")]
    Table(#[from] polars::prelude::PolarsError),
}
