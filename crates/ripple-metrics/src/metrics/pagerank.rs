//! PageRank by power iteration.
//!
//! # Algorithm
//!
//! Each round recomputes every score from the previous round:
//!
//! ```text
//! PR'(v) = (1 - d) / N  +  d * Σ_{u → v} PR(u) / out(u)  +  d * D / N
//! ```
//!
//! with `d` the damping factor and `D` the total score held by dangling
//! nodes, which is spread uniformly so the scores always sum to 1.
//! Undirected edges are walked in both directions.
//!
//! Iteration stops when the L1 change between rounds drops below
//! `N * tolerance`, or after `max_iter` rounds.

use petgraph::{
    Direction, EdgeType, Graph,
    visit::{IntoNodeIdentifiers, NodeIndexable},
};
use serde::Serialize;
use tracing::{instrument, warn};

use ripple_core::Result;
use ripple_core::config::PageRankSettings;

use super::ensure_nonempty;
use crate::graph::{NetworkGraph, Topology};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Power-iteration parameters.
#[derive(Debug, Clone)]
pub struct PageRankConfig {
    /// Probability of following an edge rather than jumping. Default 0.85.
    pub damping: f64,
    /// Per-node tolerance; iteration stops once the L1 change is below
    /// `node_count * tolerance`. Default 1e-6.
    pub tolerance: f64,
    /// Round limit. Default 100.
    pub max_iter: usize,
}

impl Default for PageRankConfig {
    fn default() -> Self {
        Self {
            damping: 0.85,
            tolerance: 1e-6,
            max_iter: 100,
        }
    }
}

impl From<&PageRankSettings> for PageRankConfig {
    fn from(s: &PageRankSettings) -> Self {
        Self {
            damping: s.damping,
            tolerance: s.tolerance,
            max_iter: s.max_iter,
        }
    }
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Scores and how the iteration ended.
#[derive(Debug, Clone, Serialize)]
pub struct PageRankResult {
    /// Score per node index (ascending node id).
    pub scores: Vec<f64>,
    /// Rounds run.
    pub iterations: usize,
    /// `false` when `max_iter` was hit first.
    pub converged: bool,
}

// ---------------------------------------------------------------------------
// PageRank
// ---------------------------------------------------------------------------

/// Compute PageRank for every node of `g`.
///
/// Failing to converge within `config.max_iter` is not an error; the last
/// iterate is returned with `converged = false` and a warning is logged.
///
/// # Errors
///
/// Returns [`ripple_core::RippleError::EmptyGraph`] if `g` has no nodes.
#[instrument(skip_all, fields(nodes = g.node_count(), directed = g.is_directed()))]
pub fn pagerank(g: &NetworkGraph, config: &PageRankConfig) -> Result<PageRankResult> {
    ensure_nonempty(g, "pagerank")?;

    let result = match g.topology() {
        Topology::Directed(d) => power_iteration(d, config),
        Topology::Undirected(u) => power_iteration(u, config),
    };

    if !result.converged {
        warn!(
            iterations = result.iterations,
            "PageRank did not converge; using last iterate"
        );
    }

    Ok(result)
}

#[allow(clippy::cast_precision_loss)]
fn power_iteration<Ty: EdgeType>(g: &Graph<u64, (), Ty>, config: &PageRankConfig) -> PageRankResult {
    let n = g.node_count();
    let n_f64 = n as f64;
    let base = (1.0 - config.damping) / n_f64;
    let threshold = n_f64 * config.tolerance;

    let out_degree: Vec<usize> = g
        .node_identifiers()
        .map(|node| g.neighbors_directed(node, Direction::Outgoing).count())
        .collect();

    let mut ranks = vec![1.0 / n_f64; n];
    let mut new_ranks = vec![0.0_f64; n];

    let mut iterations = 0;
    let mut converged = false;

    for _ in 0..config.max_iter {
        iterations += 1;

        // Dangling mass is spread once per round instead of per node.
        let dangling: f64 = out_degree
            .iter()
            .zip(&ranks)
            .filter(|&(&d, _)| d == 0)
            .map(|(_, r)| r)
            .sum();
        let teleport = config.damping.mul_add(dangling / n_f64, base);

        for r in &mut new_ranks {
            *r = teleport;
        }

        for node in g.node_identifiers() {
            let idx = g.to_index(node);
            if out_degree[idx] == 0 {
                continue;
            }
            let share = config.damping * ranks[idx] / out_degree[idx] as f64;
            for neighbor in g.neighbors_directed(node, Direction::Outgoing) {
                new_ranks[g.to_index(neighbor)] += share;
            }
        }

        // L1 change between rounds.
        let delta: f64 = ranks
            .iter()
            .zip(new_ranks.iter())
            .map(|(old, new)| (old - new).abs())
            .sum();

        std::mem::swap(&mut ranks, &mut new_ranks);

        if delta < threshold {
            converged = true;
            break;
        }
    }

    PageRankResult {
        scores: ranks,
        iterations,
        converged,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
