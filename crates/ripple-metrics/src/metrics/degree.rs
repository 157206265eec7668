//! Degree centrality and raw degree summaries.
//!
//! # Directed graphs
//!
//! "Degree" is ambiguous on a directed graph. Here the choice is explicit:
//! [`DegreeMode::primary`] selects **in-degree** for directed graphs and
//! plain degree for undirected ones. That is the value reported in the
//! `Degree` column of centrality files and in [`DegreeRange`]. Out-degree
//! centrality is computed separately via [`DegreeMode::Out`].
//!
//! # Counting
//!
//! Degrees are counted from the edge list, not from neighbor iteration:
//! an undirected self-loop adds 2 to its node's degree, so the sum of raw
//! degrees of an undirected graph is always twice its edge count.

use serde::Serialize;

use ripple_core::Result;

use super::ensure_nonempty;
use crate::graph::NetworkGraph;

/// Which edges a node's degree counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DegreeMode {
    /// Edges ending at the node.
    In,
    /// Edges starting at the node.
    Out,
    /// All incident edges.
    Total,
}

impl DegreeMode {
    /// The degree reported for a graph: in-degree when directed, plain
    /// degree otherwise.
    #[must_use]
    pub const fn primary(directed: bool) -> Self {
        if directed { Self::In } else { Self::Total }
    }
}

/// Minimum and maximum raw (unnormalized) primary degree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DegreeRange {
    pub min: usize,
    pub max: usize,
}

/// Raw degree of every node.
///
/// For undirected graphs `mode` is irrelevant: in, out, and total degree
/// coincide.
#[must_use]
pub fn raw_degrees(g: &NetworkGraph, mode: DegreeMode) -> Vec<usize> {
    let mut degrees = vec![0usize; g.node_count()];

    for (a, b) in g.edge_endpoints() {
        if !g.is_directed() {
            degrees[a] += 1;
            degrees[b] += 1;
            continue;
        }
        match mode {
            DegreeMode::In => degrees[b] += 1,
            DegreeMode::Out => degrees[a] += 1,
            DegreeMode::Total => {
                degrees[a] += 1;
                degrees[b] += 1;
            }
        }
    }

    degrees
}

/// Normalized degree centrality: `degree / (n - 1)`.
///
/// A single-node graph gets centrality 1.0.
///
/// # Errors
///
/// Returns [`ripple_core::RippleError::EmptyGraph`] if `g` has no nodes.
#[allow(clippy::cast_precision_loss)]
pub fn degree_centrality(g: &NetworkGraph, mode: DegreeMode) -> Result<Vec<f64>> {
    ensure_nonempty(g, "degree centrality")?;

    let n = g.node_count();
    if n == 1 {
        return Ok(vec![1.0]);
    }

    let scale = 1.0 / (n - 1) as f64;
    Ok(raw_degrees(g, mode)
        .into_iter()
        .map(|d| d as f64 * scale)
        .collect())
}

/// Min and max raw primary degree over all nodes.
///
/// # Errors
///
/// Returns [`ripple_core::RippleError::EmptyGraph`] if `g` has no nodes.
pub fn degree_range(g: &NetworkGraph) -> Result<DegreeRange> {
    ensure_nonempty(g, "degree range")?;

    let degrees = raw_degrees(g, DegreeMode::primary(g.is_directed()));
    let min = degrees.iter().copied().min().unwrap_or(0);
    let max = degrees.iter().copied().max().unwrap_or(0);

    Ok(DegreeRange { min, max })
}
