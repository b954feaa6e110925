//! Greedy module propagation

pub mod engine;

use serde::Serialize;

pub use engine::propagate;

/// Why a propagation run stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// The requested number of genes was added
    TargetReached,

    /// No candidate adjacent to the cluster qualified for addition
    NoCandidates,

    /// The clamped addition target was zero; nothing to add
    NothingToDo,
}

/// Connectivity significance of one candidate during one iteration
///
/// Scores are recomputed from scratch each iteration; only the winning
/// candidate outlives the iteration that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateScore {
    /// Node index of the candidate
    pub node: u32,

    /// Degree in the full network (k)
    pub degree: usize,

    /// Number of neighbors inside the current cluster (kb)
    pub cluster_links: usize,

    /// Hypergeometric right-tail probability of the observed connectivity
    pub pvalue: f64,
}

/// Outcome of a propagation run
#[derive(Debug, Clone)]
pub struct PropagationResult {
    /// Added gene symbols in addition-rank order, disjoint from the seeds
    pub added: Vec<String>,

    /// Terminal state of the run
    pub stop_reason: StopReason,
}
