//! Network construction from scored interaction records

use std::collections::{BTreeSet, HashMap};

use log;

use crate::data::InteractionRecord;
use crate::network::InteractionNetwork;

/// A built network together with ingestion diagnostics
#[derive(Debug)]
pub struct NetworkBuild {
    /// The filtered interaction network
    pub graph: InteractionNetwork,

    /// Records whose score failed numeric coercion and were dropped
    pub dropped_records: usize,

    /// Records that passed coercion and met the score threshold
    pub retained_records: usize,
}

/// Builder for incrementally constructing an InteractionNetwork
pub struct NetworkBuilder {
    /// Score threshold for retaining interactions
    threshold: u32,

    /// Retained (gene a, gene b, weight) triples in input order
    retained: Vec<(String, String, f64)>,

    /// Records dropped by numeric coercion
    dropped: usize,

    /// Records that passed coercion and the score filter
    retained_count: usize,
}

impl NetworkBuilder {
    /// Create a new builder filtering at the given combined score
    pub fn new(threshold: u32) -> Self {
        Self {
            threshold,
            retained: Vec::new(),
            dropped: 0,
            retained_count: 0,
        }
    }

    /// Ingest one interaction record
    ///
    /// Scores that fail numeric coercion drop the record (they are never
    /// treated as zero). Scores below the threshold are filtered. Surviving
    /// records have their symbols trimmed and uppercased; self-interactions
    /// and blank symbols produce no edge.
    pub fn ingest(&mut self, record: &InteractionRecord) {
        let score = match record.combined_score.trim().parse::<f64>() {
            Ok(value) if value.is_finite() => value,
            _ => {
                self.dropped += 1;
                log::debug!(
                    "Dropping record with non-numeric score: {:?}",
                    record.combined_score
                );
                return;
            }
        };

        if score < self.threshold as f64 {
            return;
        }
        self.retained_count += 1;

        let gene_a = record.gene_a.trim().to_uppercase();
        let gene_b = record.gene_b.trim().to_uppercase();
        if gene_a.is_empty() || gene_b.is_empty() || gene_a == gene_b {
            log::debug!("Skipping degenerate interaction {:?} - {:?}", gene_a, gene_b);
            return;
        }

        self.retained.push((gene_a, gene_b, score / 1000.0));
    }

    /// Build the immutable network from everything ingested
    pub fn build(self) -> NetworkBuild {
        // Node indices follow lexicographic symbol order; the propagation
        // engine's tie-breaking depends on this.
        let mut unique: BTreeSet<&str> = BTreeSet::new();
        for (a, b, _) in &self.retained {
            unique.insert(a);
            unique.insert(b);
        }

        let symbols: Vec<String> = unique.iter().map(|s| s.to_string()).collect();
        let index: HashMap<String, u32> = symbols
            .iter()
            .enumerate()
            .map(|(i, s)| (s.clone(), i as u32))
            .collect();

        // Collapse repeated pairs, in either orientation; the last
        // occurrence of a pair decides the weight.
        let mut edge_weights: HashMap<(u32, u32), f64> = HashMap::new();
        for (a, b, weight) in &self.retained {
            let ia = index[a.as_str()];
            let ib = index[b.as_str()];
            let key = if ia < ib { (ia, ib) } else { (ib, ia) };
            edge_weights.insert(key, *weight);
        }

        // Expand to per-node adjacency, both directions
        let mut adjacency: Vec<Vec<(u32, f64)>> = vec![Vec::new(); symbols.len()];
        for (&(ia, ib), &weight) in &edge_weights {
            adjacency[ia as usize].push((ib, weight));
            adjacency[ib as usize].push((ia, weight));
        }

        // Flatten into offset and neighbor arrays
        let mut offsets = Vec::with_capacity(symbols.len() + 1);
        offsets.push(0u32);
        let mut neighbors = Vec::with_capacity(edge_weights.len() * 2);
        let mut weights = Vec::with_capacity(edge_weights.len() * 2);

        let mut offset = 0u32;
        for list in &mut adjacency {
            // Sort for binary search efficiency
            list.sort_unstable_by_key(|&(node, _)| node);
            offset += list.len() as u32;
            offsets.push(offset);
            for &(node, weight) in list.iter() {
                neighbors.push(node);
                weights.push(weight);
            }
        }

        let edge_count = edge_weights.len();
        let graph = InteractionNetwork::from_parts(
            symbols,
            index,
            offsets,
            neighbors,
            weights,
            edge_count,
            self.threshold,
        );

        NetworkBuild {
            graph,
            dropped_records: self.dropped,
            retained_records: self.retained_count,
        }
    }
}

/// Build the interaction network from records, keeping scores >= threshold
pub fn build_network(records: &[InteractionRecord], threshold: u32) -> NetworkBuild {
    let mut builder = NetworkBuilder::new(threshold);
    for record in records {
        builder.ingest(record);
    }
    let build = builder.build();

    log::info!(
        "Built network with {} nodes and {} edges (threshold {}, {} records retained, {} dropped)",
        build.graph.node_count(),
        build.graph.edge_count(),
        threshold,
        build.retained_records,
        build.dropped_records
    );

    build
}
