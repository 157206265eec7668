//! In-memory graph model for one network.
//!
//! # Overview
//!
//! A [`NetworkGraph`] wraps a petgraph [`DiGraph`] or [`UnGraph`] whose node
//! weights are the integer node ids read from an edge list. Nodes are
//! inserted in ascending id order, so node index `i` always carries the
//! `i`-th smallest id. Every per-node sequence produced by
//! [`crate::metrics`] is indexed the same way, which is what makes the
//! degree, PageRank, and betweenness vectors line up.
//!
//! ## Pipeline
//!
//! ```text
//! edge-list file
//!        ↓  load::load_graph()
//! NetworkGraph (simple graph, ascending node ids)
//!        ↓  centrality::compute_centralities()
//! CentralityResult (degree, pagerank, betweenness per node)
//! ```
//!
//! ## Simple graphs only
//!
//! Repeated edges collapse. For undirected graphs `(u, v)` and `(v, u)` are
//! the same edge. Self-loops are kept once.

pub mod load;

use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex, UnGraph};

pub use load::{load_graph, load_network, parse_edge_list};

/// The two concrete graph shapes a network can take.
#[derive(Debug, Clone)]
pub enum Topology {
    Directed(DiGraph<u64, ()>),
    Undirected(UnGraph<u64, ()>),
}

/// A loaded network: a simple graph over sorted integer node ids.
#[derive(Debug, Clone)]
pub struct NetworkGraph {
    topology: Topology,
}

impl NetworkGraph {
    /// Build a graph from an edge list.
    ///
    /// The node set is exactly the set of ids appearing in `edges`.
    #[must_use]
    pub fn from_edges(directed: bool, edges: &[(u64, u64)]) -> Self {
        let mut ids: Vec<u64> = edges.iter().flat_map(|&(u, v)| [u, v]).collect();
        ids.sort_unstable();
        ids.dedup();

        let position: HashMap<u64, usize> = ids.iter().enumerate().map(|(i, &id)| (id, i)).collect();

        let mut pairs: Vec<(usize, usize)> = edges
            .iter()
            .map(|(u, v)| {
                let (a, b) = (position[u], position[v]);
                if directed || a <= b { (a, b) } else { (b, a) }
            })
            .collect();
        pairs.sort_unstable();
        pairs.dedup();

        let topology = if directed {
            let mut g = DiGraph::with_capacity(ids.len(), pairs.len());
            fill(&mut g, &ids, &pairs);
            Topology::Directed(g)
        } else {
            let mut g = UnGraph::with_capacity(ids.len(), pairs.len());
            fill(&mut g, &ids, &pairs);
            Topology::Undirected(g)
        };

        Self { topology }
    }

    #[must_use]
    pub const fn topology(&self) -> &Topology {
        &self.topology
    }

    #[must_use]
    pub const fn is_directed(&self) -> bool {
        matches!(self.topology, Topology::Directed(_))
    }

    /// Number of distinct node ids.
    #[must_use]
    pub fn node_count(&self) -> usize {
        match &self.topology {
            Topology::Directed(g) => g.node_count(),
            Topology::Undirected(g) => g.node_count(),
        }
    }

    /// Number of distinct edges after collapsing repeats.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        match &self.topology {
            Topology::Directed(g) => g.edge_count(),
            Topology::Undirected(g) => g.edge_count(),
        }
    }

    /// Node ids in ascending order (index `i` ↔ node index `i`).
    #[must_use]
    pub fn node_ids(&self) -> Vec<u64> {
        match &self.topology {
            Topology::Directed(g) => g.node_weights().copied().collect(),
            Topology::Undirected(g) => g.node_weights().copied().collect(),
        }
    }

    /// Look up the node index carrying `id`.
    #[must_use]
    pub fn node_index(&self, id: u64) -> Option<NodeIndex> {
        let found = match &self.topology {
            Topology::Directed(g) => g.raw_nodes().binary_search_by_key(&id, |n| n.weight),
            Topology::Undirected(g) => g.raw_nodes().binary_search_by_key(&id, |n| n.weight),
        };
        found.ok().map(NodeIndex::new)
    }

    /// Whether an edge joins the nodes carrying `from` and `to`.
    ///
    /// Direction is ignored for undirected graphs.
    #[must_use]
    pub fn contains_edge(&self, from: u64, to: u64) -> bool {
        let (Some(a), Some(b)) = (self.node_index(from), self.node_index(to)) else {
            return false;
        };
        match &self.topology {
            Topology::Directed(g) => g.contains_edge(a, b),
            Topology::Undirected(g) => g.contains_edge(a, b),
        }
    }

    /// Edges as `(source index, target index)` pairs.
    ///
    /// Undirected edges appear once, in insertion orientation.
    #[must_use]
    pub fn edge_endpoints(&self) -> Vec<(usize, usize)> {
        match &self.topology {
            Topology::Directed(g) => g
                .raw_edges()
                .iter()
                .map(|e| (e.source().index(), e.target().index()))
                .collect(),
            Topology::Undirected(g) => g
                .raw_edges()
                .iter()
                .map(|e| (e.source().index(), e.target().index()))
                .collect(),
        }
    }
}

fn fill<Ty: petgraph::EdgeType>(
    g: &mut petgraph::Graph<u64, (), Ty>,
    ids: &[u64],
    pairs: &[(usize, usize)],
) {
    for &id in ids {
        g.add_node(id);
    }
    for &(a, b) in pairs {
        g.add_edge(NodeIndex::new(a), NodeIndex::new(b), ());
    }
}
