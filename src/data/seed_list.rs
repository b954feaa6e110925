//! Seed gene list ingestion

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log;

use crate::error::InputError;
use crate::seeds::SeedSet;

/// Load seed gene symbols from a plain-text file, one symbol per line
///
/// Normalization (trimming, uppercasing, blank removal, de-duplication to
/// first appearance) happens in [`SeedSet::new`]; this function only reads
/// the lines.
pub fn load_seed_genes(path: &Path) -> Result<SeedSet, InputError> {
    log::info!("Loading seed genes from: {}", path.display());

    if !path.exists() {
        return Err(InputError::FileNotFound(path.to_path_buf()));
    }

    let reader = BufReader::new(File::open(path)?);

    let mut lines = Vec::new();
    for line in reader.lines() {
        lines.push(line?);
    }

    let seeds = SeedSet::new(lines);
    log::info!("Loaded {} unique seed genes", seeds.len());

    Ok(seeds)
}
