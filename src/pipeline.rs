//! End-to-end orchestration of a discovery run

use std::path::Path;

use anyhow::Result;
use log;
use serde::Serialize;

use crate::config::Config;
use crate::data;
use crate::network::{self, NetworkBuild};
use crate::propagation::{self, StopReason};
use crate::seeds::{self, IsolatedSeed};

/// Terminal classification of a discovery run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    /// Propagation ran and stopped with a [`StopReason`]
    Propagated,

    /// No interaction passed the score filter; propagation skipped
    EmptyNetwork,

    /// No seed gene is present in the filtered network; propagation skipped
    NoValidSeeds,
}

/// Structured outcome of a discovery run
///
/// Non-fatal terminal conditions (empty network, no valid seeds) land in
/// `status` instead of an error, so callers and the report writer always
/// receive the full picture of what happened.
#[derive(Debug, Clone)]
pub struct DiscoveryReport {
    /// How the run ended
    pub status: RunStatus,

    /// Score threshold the network was filtered at
    pub threshold: u32,

    /// Nodes in the filtered network
    pub node_count: usize,

    /// Undirected edges in the filtered network
    pub edge_count: usize,

    /// Interaction records that passed coercion and the score filter
    pub retained_records: usize,

    /// Interaction records dropped by numeric coercion
    pub dropped_records: usize,

    /// Seeds present in the network, in seed-list order
    pub connected_seeds: Vec<String>,

    /// Seeds absent from the network, in seed-list order
    pub isolated_seeds: Vec<IsolatedSeed>,

    /// Genes added by propagation in rank order; empty unless propagation ran
    pub added_genes: Vec<String>,

    /// Why propagation stopped; present when propagation ran
    pub stop_reason: Option<StopReason>,
}

/// Run seed loading, network construction, seed validation and propagation
///
/// Only unreadable or malformed input files produce an error; every other
/// condition is reported through [`DiscoveryReport::status`].
pub fn run_discovery(
    config: &Config,
    seed_path: &Path,
    interaction_path: &Path,
) -> Result<DiscoveryReport> {
    let seed_set = data::load_seed_genes(seed_path)?;
    let records = data::load_interactions(interaction_path)?;

    let NetworkBuild {
        graph,
        dropped_records,
        retained_records,
    } = network::build_network(&records, config.score_threshold);

    let partition = seeds::validate_seeds(&seed_set, &graph);

    let mut report = DiscoveryReport {
        status: RunStatus::Propagated,
        threshold: config.score_threshold,
        node_count: graph.node_count(),
        edge_count: graph.edge_count(),
        retained_records,
        dropped_records,
        connected_seeds: partition.connected,
        isolated_seeds: partition.isolated,
        added_genes: Vec::new(),
        stop_reason: None,
    };

    if graph.is_empty() {
        log::warn!(
            "No interaction reached score {}; skipping propagation",
            config.score_threshold
        );
        report.status = RunStatus::EmptyNetwork;
        return Ok(report);
    }

    if report.connected_seeds.is_empty() {
        log::warn!(
            "No seed gene is connected to the network at score >= {}; skipping propagation",
            config.score_threshold
        );
        report.status = RunStatus::NoValidSeeds;
        return Ok(report);
    }

    let result = propagation::propagate(&graph, &report.connected_seeds, config.target_additions);
    log::info!(
        "Propagation added {} genes ({:?})",
        result.added.len(),
        result.stop_reason
    );

    report.added_genes = result.added;
    report.stop_reason = Some(result.stop_reason);

    Ok(report)
}
