//! Hypergeometric significance of candidate-to-cluster connectivity
//!
//! Probabilities are evaluated in log space from a table of log-gamma
//! values precomputed over the network size, so large networks neither
//! overflow nor pay a per-term gamma evaluation.

use statrs::function::gamma::ln_gamma;

/// Log-gamma lookup table plus the right-tail probability evaluation.
///
/// The table covers integer arguments `1..=N` where `N` is the number of
/// nodes in the network. Terms that would need a value outside that domain
/// contribute probability zero rather than failing.
#[derive(Debug, Clone)]
pub struct HypergeomScorer {
    gamma_ln: Vec<f64>,
}

impl HypergeomScorer {
    /// Precompute ln(gamma(i)) for every i in `1..=population`
    pub fn new(population: usize) -> Self {
        let gamma_ln = (1..=population).map(|i| ln_gamma(i as f64)).collect();
        Self { gamma_ln }
    }

    /// Largest argument the lookup table can serve
    pub fn max_argument(&self) -> usize {
        self.gamma_ln.len()
    }

    /// ln(gamma(arg)) if `arg` lies inside the table domain `1..=N`
    fn gamma_ln(&self, arg: i64) -> Option<f64> {
        if arg < 1 || arg as usize > self.gamma_ln.len() {
            return None;
        }
        Some(self.gamma_ln[(arg - 1) as usize])
    }

    /// Log probability of drawing exactly `x` cluster members in `n` draws
    /// from a population of `r` cluster and `b` non-cluster nodes, or `None`
    /// when any factor falls outside the table domain
    fn log_term(&self, x: i64, r: i64, b: i64, n: i64) -> Option<f64> {
        let log_p = self.gamma_ln(r)? - (self.gamma_ln(x)? + self.gamma_ln(r - x)?)
            + self.gamma_ln(b)?
            - (self.gamma_ln(n - x)? + self.gamma_ln(b - n)?)
            - self.gamma_ln(r + b)?;
        Some(log_p)
    }

    /// One tail term. Impossible draw configurations have probability zero.
    fn term(&self, x: i64, r: i64, b: i64, n: i64) -> f64 {
        if r + b > self.gamma_ln.len() as i64
            || r < 0
            || b < 0
            || n < 0
            || x < 0
            || r < x
            || b < (n - x)
            || n < x
        {
            return 0.0;
        }

        self.log_term(x, r, b, n).map_or(0.0, f64::exp)
    }

    /// Right-tail probability of a candidate with degree `k` having `kb` or
    /// more of its neighbors inside a cluster of size `s`, in a network of
    /// `n_total` nodes.
    ///
    /// Total for every input: out-of-range configurations simply sum zero
    /// terms. Callers skip candidates with `kb == 0` or `k == 0` before
    /// scoring, but nothing here requires that.
    pub fn pvalue(&self, kb: usize, k: usize, n_total: usize, s: usize) -> f64 {
        let r = s as i64;
        let b = n_total as i64 - s as i64;
        let n = k as i64;

        (kb..=k).map(|x| self.term(x as i64, r, b, n)).sum()
    }
}
