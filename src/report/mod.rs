//! Result file serialization

use std::collections::HashSet;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use anyhow::Result;
use log;
use serde_json::{json, to_string_pretty};

use crate::pipeline::DiscoveryReport;

/// Seeds present in the filtered network, one symbol per line
pub const CONNECTED_SEEDS_FILE: &str = "connected_seed_genes.tsv";

/// Seeds absent from the filtered network, with type and reason columns
pub const ISOLATED_SEEDS_FILE: &str = "isolated_seed_genes.tsv";

/// Genes added by propagation, in rank order
pub const RESULTS_FILE: &str = "diamond_results.tsv";

/// Aggregate run diagnostics
pub const SUMMARY_FILE: &str = "summary.json";

/// Classification value written for isolated seeds
pub const ISOLATED_SEED_TYPE: &str = "Isolated_Seed_Gene";

/// Write every report artifact for a finished run into `output_dir`
///
/// All four files are written regardless of how the run ended; a file with
/// nothing to list still gets its header row.
pub fn write_reports(report: &DiscoveryReport, output_dir: &Path) -> Result<()> {
    log::info!("Saving discovery reports to {}", output_dir.display());

    // Ensure output directory exists
    fs::create_dir_all(output_dir)?;

    write_connected_seeds(report, output_dir)?;
    write_isolated_seeds(report, output_dir)?;
    write_added_genes(report, output_dir)?;
    write_summary(report, output_dir)?;

    log::info!("Reports saved successfully");

    Ok(())
}

/// Save seeds found in the network
fn write_connected_seeds(report: &DiscoveryReport, output_dir: &Path) -> Result<()> {
    let path = output_dir.join(CONNECTED_SEEDS_FILE);
    let mut file = File::create(path)?;

    writeln!(file, "HUGO_Symbol")?;
    for symbol in &report.connected_seeds {
        writeln!(file, "{}", symbol)?;
    }

    log::info!(
        "Saved {} connected seed genes",
        report.connected_seeds.len()
    );

    Ok(())
}

/// Save seeds absent from the network, with their classification and reason
fn write_isolated_seeds(report: &DiscoveryReport, output_dir: &Path) -> Result<()> {
    let path = output_dir.join(ISOLATED_SEEDS_FILE);
    let mut file = File::create(path)?;

    writeln!(file, "HUGO_Symbol\tTipo\tComentario")?;
    for seed in &report.isolated_seeds {
        writeln!(file, "{}\t{}\t{}", seed.symbol, ISOLATED_SEED_TYPE, seed.reason)?;
    }

    log::info!("Saved {} isolated seed genes", report.isolated_seeds.len());

    Ok(())
}

/// Save the ranked propagation additions, skipping any symbol that also
/// appears among the seeds
fn write_added_genes(report: &DiscoveryReport, output_dir: &Path) -> Result<()> {
    let seeds: HashSet<&str> = report
        .connected_seeds
        .iter()
        .map(String::as_str)
        .chain(report.isolated_seeds.iter().map(|s| s.symbol.as_str()))
        .collect();

    let path = output_dir.join(RESULTS_FILE);
    let mut file = File::create(path)?;

    writeln!(file, "HUGO_Symbol")?;
    let mut written = 0;
    for gene in &report.added_genes {
        if seeds.contains(gene.as_str()) {
            continue;
        }
        writeln!(file, "{}", gene)?;
        written += 1;
    }

    log::info!("Saved {} propagated genes", written);

    Ok(())
}

/// Save aggregate run diagnostics
fn write_summary(report: &DiscoveryReport, output_dir: &Path) -> Result<()> {
    let path = output_dir.join(SUMMARY_FILE);
    let mut file = File::create(path)?;

    let summary = json!({
        "status": report.status,
        "stop_reason": report.stop_reason,
        "score_threshold": report.threshold,
        "network": {
            "node_count": report.node_count,
            "edge_count": report.edge_count,
            "retained_records": report.retained_records,
            "dropped_records": report.dropped_records,
        },
        "seeds": {
            "connected": report.connected_seeds.len(),
            "isolated": report.isolated_seeds.len(),
        },
        "added_genes": report.added_genes.len(),
    });

    file.write_all(to_string_pretty(&summary)?.as_bytes())?;

    Ok(())
}
