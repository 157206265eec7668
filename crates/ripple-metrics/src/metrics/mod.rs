//! Centrality metrics over a [`NetworkGraph`].
//!
//! # Overview
//!
//! Each metric answers a different question about node importance:
//!
//! - **Degree** (`degree`): how many neighbors does a node have? For
//!   directed graphs the in-degree is the primary measure; out-degree is
//!   available alongside.
//! - **PageRank** (`pagerank`): where does a random walk with restarts
//!   spend its time?
//! - **Betweenness** (`betweenness`): which nodes sit on many shortest
//!   paths between other nodes?
//!
//! # Usage
//!
//! All metrics return one value per node, indexed by node index, which is
//! ascending node-id order. Every metric refuses a graph with zero nodes.
//!
//! ```rust,ignore
//! use ripple_metrics::graph::load_graph;
//! use ripple_metrics::metrics::{betweenness, degree, pagerank};
//!
//! let g = load_graph(false, path)?;
//! let dc = degree::degree_centrality(&g, degree::DegreeMode::primary(g.is_directed()))?;
//! let pr = pagerank::pagerank(&g, &pagerank::PageRankConfig::default())?;
//! let bc = betweenness::betweenness_centrality(&g)?;
//! ```

pub mod betweenness;
pub mod degree;
pub mod pagerank;

use ripple_core::{Result, RippleError};

use crate::graph::NetworkGraph;

/// Fail with [`RippleError::EmptyGraph`] when `g` has no nodes.
pub(crate) fn ensure_nonempty(g: &NetworkGraph, metric: &'static str) -> Result<()> {
    if g.node_count() == 0 {
        return Err(RippleError::EmptyGraph { metric });
    }
    Ok(())
}
