#![forbid(unsafe_code)]
//! ripple-metrics library.
//!
//! Edge-list loading ([`graph`]) and node centralities ([`metrics`],
//! combined in [`centrality`]).
//!
//! # Conventions
//!
//! - **Errors**: Return [`ripple_core::Result`]; every computation refuses
//!   a graph with zero nodes.
//! - **Ordering**: Per-node vectors are indexed by node index, which is
//!   ascending node-id order.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod centrality;
pub mod graph;
pub mod metrics;

pub use centrality::{
    CentralityResult, CentralityRow, centrality_file_name, compute_centralities,
    compute_centralities_with, read_centralities, read_centrality_file, write_centralities,
    write_centrality_file,
};
pub use graph::{NetworkGraph, load_graph, load_network};
pub use metrics::pagerank::PageRankConfig;
