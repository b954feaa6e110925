//! The greedy propagation loop

use std::collections::BTreeSet;

use log;
use rayon::prelude::*;

use crate::network::InteractionNetwork;
use crate::propagation::{CandidateScore, PropagationResult, StopReason};
use crate::stats::HypergeomScorer;

/// Candidate sets at least this large are scored on the rayon pool
const PARALLEL_SCORING_CUTOFF: usize = 1024;

/// Grow the connected-seed cluster by up to `target_count` genes
///
/// Each iteration scores every node adjacent to the current cluster and
/// admits the one with the smallest hypergeometric p-value; ties go to the
/// lexicographically smallest gene symbol. The requested count is clamped
/// to the number of non-seed nodes in the network. The same network and
/// seed list always produce the same additions in the same order.
pub fn propagate(
    graph: &InteractionNetwork,
    connected_seeds: &[String],
    target_count: usize,
) -> PropagationResult {
    let node_count = graph.node_count();

    // Mark the seed cluster
    let mut in_cluster = vec![false; node_count];
    let mut cluster_size = 0usize;
    for symbol in connected_seeds {
        match graph.index_of(symbol) {
            Some(node) if !in_cluster[node as usize] => {
                in_cluster[node as usize] = true;
                cluster_size += 1;
            }
            Some(_) => {}
            None => log::warn!("Seed gene {} is not in the network, ignoring", symbol),
        }
    }

    let target = target_count.min(node_count - cluster_size);
    if target < target_count {
        log::info!(
            "Clamping additions to {} ({} requested, {} non-seed nodes available)",
            target,
            target_count,
            node_count - cluster_size
        );
    }
    if target == 0 {
        log::info!("Nothing to add; skipping propagation loop");
        return PropagationResult {
            added: Vec::new(),
            stop_reason: StopReason::NothingToDo,
        };
    }

    let scorer = HypergeomScorer::new(node_count);

    // Candidate set: non-cluster nodes adjacent to the cluster. BTreeSet
    // iteration is ascending node index, which is lexicographic symbol
    // order, so ties resolve to the lexicographically smallest symbol.
    let mut candidates: BTreeSet<u32> = BTreeSet::new();
    for node in 0..node_count as u32 {
        if in_cluster[node as usize] {
            for &neighbor in graph.neighbors(node) {
                if !in_cluster[neighbor as usize] {
                    candidates.insert(neighbor);
                }
            }
        }
    }

    log::info!(
        "Propagating from {} connected seed genes: target {} additions, {} initial candidates",
        cluster_size,
        target,
        candidates.len()
    );

    let mut added: Vec<u32> = Vec::with_capacity(target);
    let stop_reason = loop {
        if candidates.is_empty() {
            log::info!("Candidate set exhausted after {} additions", added.len());
            break StopReason::NoCandidates;
        }

        let Some(best) = best_candidate(graph, &scorer, &candidates, &in_cluster, cluster_size)
        else {
            log::info!("No scorable candidate left after {} additions", added.len());
            break StopReason::NoCandidates;
        };

        log::debug!(
            "Iteration {}: adding {} (k={}, kb={}, p={:.3e}) out of {} candidates",
            added.len() + 1,
            graph.symbol(best.node),
            best.degree,
            best.cluster_links,
            best.pvalue,
            candidates.len()
        );

        // Grow the cluster and update the frontier incrementally
        in_cluster[best.node as usize] = true;
        cluster_size += 1;
        candidates.remove(&best.node);
        for &neighbor in graph.neighbors(best.node) {
            if !in_cluster[neighbor as usize] {
                candidates.insert(neighbor);
            }
        }
        added.push(best.node);

        if added.len() == target {
            log::info!("Reached target of {} additions", target);
            break StopReason::TargetReached;
        }
    };

    PropagationResult {
        added: added
            .into_iter()
            .map(|node| graph.symbol(node).to_string())
            .collect(),
        stop_reason,
    }
}

/// Score every candidate and return the one with the smallest p-value,
/// ties resolved to the smallest node index
fn best_candidate(
    graph: &InteractionNetwork,
    scorer: &HypergeomScorer,
    candidates: &BTreeSet<u32>,
    in_cluster: &[bool],
    cluster_size: usize,
) -> Option<CandidateScore> {
    // For small candidate sets, use sequential scoring
    if candidates.len() < PARALLEL_SCORING_CUTOFF {
        return best_candidate_sequential(graph, scorer, candidates, in_cluster, cluster_size);
    }

    // For larger sets, score on the rayon pool. The reduction orders by
    // (p-value, node index), so the winner is independent of work split
    // and identical to the sequential scan.
    candidates
        .par_iter()
        .filter_map(|&node| score_candidate(graph, scorer, in_cluster, cluster_size, node))
        .min_by(|a, b| a.pvalue.total_cmp(&b.pvalue).then(a.node.cmp(&b.node)))
}

/// Sequential version for smaller candidate sets
fn best_candidate_sequential(
    graph: &InteractionNetwork,
    scorer: &HypergeomScorer,
    candidates: &BTreeSet<u32>,
    in_cluster: &[bool],
    cluster_size: usize,
) -> Option<CandidateScore> {
    let mut best: Option<CandidateScore> = None;
    for &node in candidates {
        let Some(score) = score_candidate(graph, scorer, in_cluster, cluster_size, node) else {
            continue;
        };
        match &best {
            Some(current) if score.pvalue < current.pvalue => best = Some(score),
            None => best = Some(score),
            _ => {}
        }
    }
    best
}

/// Compute k, kb and the p-value for one candidate, or None when the
/// candidate is skipped (zero degree, no link into the cluster, or an
/// inconsistent kb > k)
fn score_candidate(
    graph: &InteractionNetwork,
    scorer: &HypergeomScorer,
    in_cluster: &[bool],
    cluster_size: usize,
    node: u32,
) -> Option<CandidateScore> {
    let neighbors = graph.neighbors(node);
    let degree = neighbors.len();
    if degree == 0 {
        return None;
    }

    let cluster_links = neighbors
        .iter()
        .filter(|&&n| in_cluster[n as usize])
        .count();
    if cluster_links == 0 || cluster_links > degree {
        return None;
    }

    let pvalue = scorer.pvalue(cluster_links, degree, graph.node_count(), cluster_size);

    Some(CandidateScore {
        node,
        degree,
        cluster_links,
        pvalue,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::InteractionRecord;
    use crate::network::build_network;

    fn network(edges: &[(&str, &str, u32)]) -> InteractionNetwork {
        let records: Vec<InteractionRecord> = edges
            .iter()
            .map(|&(a, b, s)| InteractionRecord::new(a, b, s.to_string()))
            .collect();
        build_network(&records, 700).graph
    }

    fn scenario_network() -> InteractionNetwork {
        network(&[
            ("A", "B", 900),
            ("A", "C", 800),
            ("B", "C", 750),
            ("C", "D", 700),
        ])
    }

    fn seeds(symbols: &[&str]) -> Vec<String> {
        symbols.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn adds_highest_significance_genes_in_order() {
        let graph = scenario_network();

        let result = propagate(&graph, &seeds(&["A"]), 2);
        assert_eq!(result.added, vec!["B", "C"]);
        assert_eq!(result.stop_reason, StopReason::TargetReached);

        let again = propagate(&graph, &seeds(&["A"]), 2);
        assert_eq!(again.added, result.added);
    }

    #[test]
    fn ties_resolve_to_lexicographically_smallest_symbol() {
        let graph = network(&[("HUB", "ZETA", 900), ("HUB", "ALPHA", 900)]);

        let result = propagate(&graph, &seeds(&["HUB"]), 1);
        assert_eq!(result.added, vec!["ALPHA"]);
    }

    #[test]
    fn added_genes_are_unique_and_disjoint_from_seeds() {
        let graph = scenario_network();

        let result = propagate(&graph, &seeds(&["A"]), 10);
        assert_eq!(result.added.len(), 3);
        assert_eq!(result.stop_reason, StopReason::TargetReached);
        assert!(!result.added.contains(&"A".to_string()));

        let mut unique = result.added.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), result.added.len());
    }

    #[test]
    fn stops_when_candidates_run_out() {
        let graph = network(&[("A", "B", 900), ("C", "D", 900)]);

        let result = propagate(&graph, &seeds(&["A"]), 5);
        assert_eq!(result.added, vec!["B"]);
        assert_eq!(result.stop_reason, StopReason::NoCandidates);
    }

    #[test]
    fn zero_target_is_nothing_to_do() {
        let graph = scenario_network();

        let result = propagate(&graph, &seeds(&["A"]), 0);
        assert!(result.added.is_empty());
        assert_eq!(result.stop_reason, StopReason::NothingToDo);
    }

    #[test]
    fn seeds_covering_the_network_leave_nothing_to_add() {
        let graph = network(&[("A", "B", 900)]);

        let result = propagate(&graph, &seeds(&["A", "B"]), 5);
        assert!(result.added.is_empty());
        assert_eq!(result.stop_reason, StopReason::NothingToDo);
    }

    #[test]
    fn empty_seed_list_stops_with_no_candidates() {
        let graph = scenario_network();

        let result = propagate(&graph, &[], 3);
        assert!(result.added.is_empty());
        assert_eq!(result.stop_reason, StopReason::NoCandidates);
    }

    #[test]
    fn seed_symbols_missing_from_the_network_are_ignored() {
        let graph = scenario_network();

        let with_unknown = propagate(&graph, &seeds(&["A", "QQQ"]), 1);
        let without = propagate(&graph, &seeds(&["A"]), 1);
        assert_eq!(with_unknown.added, without.added);
    }

    #[test]
    fn candidate_scores_report_degree_and_cluster_links() {
        let graph = scenario_network();
        let scorer = HypergeomScorer::new(graph.node_count());

        let mut in_cluster = vec![false; graph.node_count()];
        let a = graph.index_of("A").unwrap();
        in_cluster[a as usize] = true;

        let c = graph.index_of("C").unwrap();
        let score = score_candidate(&graph, &scorer, &in_cluster, 1, c).unwrap();
        assert_eq!(score.degree, 3);
        assert_eq!(score.cluster_links, 1);

        // D has no edge into the cluster and is skipped
        let d = graph.index_of("D").unwrap();
        assert!(score_candidate(&graph, &scorer, &in_cluster, 1, d).is_none());
    }

    #[test]
    fn parallel_scoring_is_deterministic() {
        // 1500 candidates pushes scoring onto the rayon pool. At this
        // population size every tail probability evaluates to exactly zero
        // (in-range log terms sit far below what exp can represent), so
        // pendant-carrying and bare leaves alike tie and the reduction must
        // resolve to the lexicographically smallest symbol on every run.
        let mut edges: Vec<(String, String, u32)> = vec![("S1".into(), "S2".into(), 900)];
        for i in 0..1500 {
            edges.push(("S1".into(), format!("A{i:04}"), 900));
        }
        for i in 0..750 {
            edges.push((format!("A{i:04}"), format!("B{i:04}"), 900));
        }

        let records: Vec<InteractionRecord> = edges
            .iter()
            .map(|(a, b, s)| InteractionRecord::new(a.clone(), b.clone(), s.to_string()))
            .collect();
        let graph = build_network(&records, 700).graph;

        let first = propagate(&graph, &seeds(&["S1", "S2"]), 1);
        let second = propagate(&graph, &seeds(&["S1", "S2"]), 1);

        assert_eq!(first.added, vec!["A0000"]);
        assert_eq!(second.added, first.added);
    }
}
