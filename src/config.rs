//! Configuration management for disease module discovery runs

/// Tunable parameters for a discovery run
///
/// There is no process-global state; every run receives its parameters
/// through an explicit `Config` value.
pub struct Config {
    /// Minimum combined score (0-1000 scale) for an interaction to enter the network
    pub score_threshold: u32,

    /// Maximum number of genes the propagation may add to the seed cluster
    pub target_additions: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            score_threshold: 700,
            target_additions: 200,
        }
    }
}

impl Config {
    /// Create a new configuration with custom values
    pub fn new(score_threshold: u32, target_additions: usize) -> Self {
        Self {
            score_threshold,
            target_additions,
        }
    }
}
