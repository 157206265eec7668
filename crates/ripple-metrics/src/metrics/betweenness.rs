//! Shortest-path betweenness (Brandes, unweighted).
//!
//! One BFS per source counts shortest paths; dependencies are then folded
//! back from the farthest node inward and summed over sources. O(V * E).
//!
//! # Normalization
//!
//! Accumulation runs over ordered `(s, t)` pairs for both directed and
//! undirected graphs, so a single factor `1 / ((n-1)(n-2))` maps scores
//! into `[0, 1]` either way. Graphs with two or fewer nodes are left
//! unscaled; every score there is 0.

use std::collections::VecDeque;

use petgraph::{
    Direction, EdgeType, Graph,
    graph::NodeIndex,
    visit::{IntoNodeIdentifiers, NodeIndexable},
};
use tracing::instrument;

use ripple_core::Result;

use super::ensure_nonempty;
use crate::graph::{NetworkGraph, Topology};

/// Normalized betweenness centrality of every node.
///
/// # Errors
///
/// Returns [`ripple_core::RippleError::EmptyGraph`] if `g` has no nodes.
#[instrument(skip_all, fields(nodes = g.node_count(), directed = g.is_directed()))]
pub fn betweenness_centrality(g: &NetworkGraph) -> Result<Vec<f64>> {
    ensure_nonempty(g, "betweenness")?;

    let mut scores = match g.topology() {
        Topology::Directed(d) => brandes(d),
        Topology::Undirected(u) => brandes(u),
    };

    if let Some(scale) = normalization(g.node_count()) {
        scores.iter_mut().for_each(|score| *score *= scale);
    }

    Ok(scores)
}

#[allow(clippy::cast_precision_loss)]
fn normalization(n: usize) -> Option<f64> {
    (n > 2).then(|| 1.0 / ((n - 1) as f64 * (n - 2) as f64))
}

fn brandes<Ty: EdgeType>(g: &Graph<u64, (), Ty>) -> Vec<f64> {
    let n = g.node_count();
    let mut scores = vec![0.0; n];

    let mut order: Vec<usize> = Vec::with_capacity(n);
    let mut preds: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut paths = vec![0.0_f64; n];
    let mut depth: Vec<Option<usize>> = vec![None; n];
    let mut dependency = vec![0.0_f64; n];
    let mut queue: VecDeque<NodeIndex> = VecDeque::new();

    for source in g.node_identifiers() {
        let s = g.to_index(source);

        order.clear();
        preds.iter_mut().for_each(Vec::clear);
        paths.fill(0.0);
        depth.fill(None);
        dependency.fill(0.0);

        paths[s] = 1.0;
        depth[s] = Some(0);
        queue.push_back(source);

        while let Some(node) = queue.pop_front() {
            let v = g.to_index(node);
            order.push(v);
            let next = depth[v].map_or(0, |d| d + 1);

            for neighbor in g.neighbors_directed(node, Direction::Outgoing) {
                let w = g.to_index(neighbor);
                if depth[w].is_none() {
                    depth[w] = Some(next);
                    queue.push_back(neighbor);
                }
                if depth[w] == Some(next) {
                    paths[w] += paths[v];
                    preds[w].push(v);
                }
            }
        }

        for &w in order.iter().rev() {
            let share = (1.0 + dependency[w]) / paths[w];
            for &v in &preds[w] {
                dependency[v] += paths[v] * share;
            }
            if w != s {
                scores[w] += dependency[w];
            }
        }
    }

    scores
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use ripple_core::RippleError;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn empty_graph_is_an_error() {
        let g = NetworkGraph::from_edges(false, &[]);
        assert!(matches!(
            betweenness_centrality(&g),
            Err(RippleError::EmptyGraph { metric: "betweenness" })
        ));
    }

    #[test]
    fn single_node_scores_zero() {
        let g = NetworkGraph::from_edges(true, &[(0, 0)]);
        assert_eq!(betweenness_centrality(&g).expect("ok"), vec![0.0]);
    }

    #[test]
    fn two_nodes_score_zero() {
        let g = NetworkGraph::from_edges(false, &[(0, 1)]);
        assert_eq!(betweenness_centrality(&g).expect("ok"), vec![0.0, 0.0]);
    }

    #[test]
    fn undirected_path_middle_is_one() {
        // 0 - 1 - 2
        let g = NetworkGraph::from_edges(false, &[(0, 1), (1, 2)]);
        let bc = betweenness_centrality(&g).expect("ok");
        assert!(approx(bc[0], 0.0));
        assert!(approx(bc[1], 1.0));
        assert!(approx(bc[2], 0.0));
    }

    #[test]
    fn directed_chain_middle_is_half() {
        // 0 → 1 → 2: only the (0, 2) pair passes through 1, out of (n-1)(n-2) = 2.
        let g = NetworkGraph::from_edges(true, &[(0, 1), (1, 2)]);
        let bc = betweenness_centrality(&g).expect("ok");
        assert!(approx(bc[1], 0.5));
        assert!(approx(bc[0], 0.0));
        assert!(approx(bc[2], 0.0));
    }

    #[test]
    fn undirected_triangle_is_all_zero() {
        let g = NetworkGraph::from_edges(false, &[(0, 1), (1, 2), (2, 0)]);
        let bc = betweenness_centrality(&g).expect("ok");
        assert!(bc.iter().all(|&b| approx(b, 0.0)));
    }

    #[test]
    fn undirected_star_center_is_one() {
        let g = NetworkGraph::from_edges(false, &[(0, 1), (0, 2), (0, 3), (0, 4)]);
        let bc = betweenness_centrality(&g).expect("ok");
        assert!(approx(bc[0], 1.0));
        assert!(bc[1..].iter().all(|&b| approx(b, 0.0)));
    }

    #[test]
    fn undirected_path_of_four() {
        // 0 - 1 - 2 - 3: inner nodes each sit on 2 of the 3 unordered pairs
        // not involving them.
        let g = NetworkGraph::from_edges(false, &[(0, 1), (1, 2), (2, 3)]);
        let bc = betweenness_centrality(&g).expect("ok");
        assert!(approx(bc[1], 2.0 / 3.0));
        assert!(approx(bc[2], 2.0 / 3.0));
    }

    #[test]
    fn split_shortest_paths_share_credit() {
        // Diamond: 0 → 1 → 3 and 0 → 2 → 3; 1 and 2 each carry half of (0, 3).
        let g = NetworkGraph::from_edges(true, &[(0, 1), (0, 2), (1, 3), (2, 3)]);
        let bc = betweenness_centrality(&g).expect("ok");
        // raw 0.5, scaled by 1 / (3 * 2)
        assert!(approx(bc[1], 0.5 / 6.0));
        assert!(approx(bc[1], bc[2]));
    }

    #[test]
    fn self_loops_do_not_change_scores() {
        let plain = NetworkGraph::from_edges(false, &[(0, 1), (1, 2)]);
        let looped = NetworkGraph::from_edges(false, &[(0, 1), (1, 2), (1, 1)]);
        assert_eq!(
            betweenness_centrality(&plain).expect("ok"),
            betweenness_centrality(&looped).expect("ok")
        );
    }
}
