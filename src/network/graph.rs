//! Memory-efficient interaction network representation

use std::collections::HashMap;

/// Compressed sparse representation of the undirected, weighted
/// protein-protein interaction network.
///
/// The structure is immutable once built. Node indices are assigned in
/// lexicographic symbol order, so ascending index order is lexicographic
/// symbol order; the propagation engine relies on this for deterministic
/// tie-breaking. Symbols are stored uppercase.
#[derive(Debug, Clone)]
pub struct InteractionNetwork {
    /// Gene symbol per node, lexicographically sorted
    symbols: Vec<String>,

    /// Mapping from gene symbols to node indices
    index: HashMap<String, u32>,

    /// Offset array: index where each node's adjacency begins
    /// offsets[i] to offsets[i+1] defines the neighbor range for node i
    offsets: Vec<u32>,

    /// Neighbor array: concatenated, per-node sorted neighbor lists
    neighbors: Vec<u32>,

    /// Edge weights parallel to `neighbors` (combined score / 1000)
    weights: Vec<f64>,

    /// Number of undirected edges
    edge_count: usize,

    /// Score threshold the network was filtered at
    threshold: u32,
}

impl InteractionNetwork {
    pub(crate) fn from_parts(
        symbols: Vec<String>,
        index: HashMap<String, u32>,
        offsets: Vec<u32>,
        neighbors: Vec<u32>,
        weights: Vec<f64>,
        edge_count: usize,
        threshold: u32,
    ) -> Self {
        Self {
            symbols,
            index,
            offsets,
            neighbors,
            weights,
            edge_count,
            threshold,
        }
    }

    /// Number of nodes in the network
    pub fn node_count(&self) -> usize {
        self.symbols.len()
    }

    /// Number of undirected edges
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// True when no interaction survived the score filter
    ///
    /// Nodes only exist through retained edges, so an edgeless network is
    /// also nodeless.
    pub fn is_empty(&self) -> bool {
        self.edge_count == 0
    }

    /// Score threshold the network was filtered at
    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    /// Gene symbol for a node index
    pub fn symbol(&self, node: u32) -> &str {
        &self.symbols[node as usize]
    }

    /// All gene symbols in index (= lexicographic) order
    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    /// Node index for a gene symbol, if present
    pub fn index_of(&self, symbol: &str) -> Option<u32> {
        self.index.get(symbol).copied()
    }

    /// Check whether a gene symbol is in the network
    pub fn contains(&self, symbol: &str) -> bool {
        self.index.contains_key(symbol)
    }

    /// Get neighbors of a node, sorted by node index
    pub fn neighbors(&self, node: u32) -> &[u32] {
        let start = self.offsets[node as usize] as usize;
        let end = self.offsets[node as usize + 1] as usize;
        &self.neighbors[start..end]
    }

    /// Degree of a node
    pub fn degree(&self, node: u32) -> usize {
        let start = self.offsets[node as usize] as usize;
        let end = self.offsets[node as usize + 1] as usize;
        end - start
    }

    /// Check if there's an edge between two nodes
    pub fn has_edge(&self, a: u32, b: u32) -> bool {
        self.neighbors(a).binary_search(&b).is_ok()
    }

    /// Weight of the edge between two nodes, if present
    pub fn weight(&self, a: u32, b: u32) -> Option<f64> {
        let start = self.offsets[a as usize] as usize;
        self.neighbors(a)
            .binary_search(&b)
            .ok()
            .map(|pos| self.weights[start + pos])
    }
}
