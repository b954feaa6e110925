//! Seed gene sets and their validation against the network

use itertools::Itertools;
use log;

use crate::network::InteractionNetwork;

/// Ordered, de-duplicated, case-normalized seed gene list
#[derive(Debug, Clone, Default)]
pub struct SeedSet {
    symbols: Vec<String>,
}

impl SeedSet {
    /// Trim and uppercase symbols, dropping blanks and collapsing
    /// duplicates to their first appearance
    pub fn new<I, S>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let symbols = symbols
            .into_iter()
            .map(|s| s.as_ref().trim().to_uppercase())
            .filter(|s| !s.is_empty())
            .unique()
            .collect();

        Self { symbols }
    }

    /// Seed symbols in first-appearance order
    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.symbols.iter().map(String::as_str)
    }
}

/// A seed gene absent from the filtered network
#[derive(Debug, Clone, PartialEq)]
pub struct IsolatedSeed {
    /// The normalized seed symbol
    pub symbol: String,

    /// Human-readable reason recorded in the isolated-seed report
    pub reason: String,
}

/// Disjoint, exhaustive split of a seed set by network membership
#[derive(Debug, Clone, Default)]
pub struct SeedPartition {
    /// Seeds present in the network, in seed-list order
    pub connected: Vec<String>,

    /// Seeds absent from the network, in seed-list order
    pub isolated: Vec<IsolatedSeed>,
}

/// Partition seeds into network members and isolated seeds
///
/// Pure with respect to its inputs: the same seed set and network always
/// produce the same partition, and the network is never modified.
pub fn validate_seeds(seeds: &SeedSet, graph: &InteractionNetwork) -> SeedPartition {
    let mut partition = SeedPartition::default();

    for symbol in seeds.iter() {
        if graph.contains(symbol) {
            partition.connected.push(symbol.to_string());
        } else {
            partition.isolated.push(IsolatedSeed {
                symbol: symbol.to_string(),
                reason: format!(
                    "Not connected to the network at score >= {}",
                    graph.threshold()
                ),
            });
        }
    }

    log::info!(
        "Seed genes found in the network: {}/{}",
        partition.connected.len(),
        seeds.len()
    );
    for seed in &partition.isolated {
        log::debug!("Isolated seed gene: {}", seed.symbol);
    }

    partition
}
