//! Edge-list parsing.
//!
//! # Format
//!
//! One edge per line, whitespace separated:
//!
//! ```text
//! 0 1
//! 0 2 0.75
//!
//! 3 1
//! ```
//!
//! Only the first two tokens are read; weighted datasets carry a third
//! column that is ignored. Blank lines are skipped. Any other line that
//! does not start with two non-negative integers is a
//! [`RippleError::MalformedInput`].

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use ripple_core::{Network, Result, RippleError};
use tracing::{debug, instrument};

use super::NetworkGraph;

/// Load the edge list at `path` into a graph.
///
/// # Errors
///
/// Returns [`RippleError::Io`] if the file cannot be read and
/// [`RippleError::MalformedInput`] for the first unparseable line.
#[instrument(skip_all, fields(path = %path.display(), directed = is_directed))]
pub fn load_graph(is_directed: bool, path: &Path) -> Result<NetworkGraph> {
    let file = File::open(path).map_err(|e| RippleError::io(path, e))?;
    let graph = parse_edge_list(BufReader::new(file), is_directed, path)?;

    debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "loaded edge list"
    );

    Ok(graph)
}

/// Load a registered network from `networks_dir`, using its declared
/// file name and directedness.
///
/// # Errors
///
/// Same as [`load_graph`].
pub fn load_network(network: Network, networks_dir: &Path) -> Result<NetworkGraph> {
    let d = network.descriptor();
    load_graph(d.directed, &networks_dir.join(d.file_name))
}

/// Parse an edge list from any buffered reader.
///
/// `source` only labels errors.
///
/// # Errors
///
/// Returns [`RippleError::Io`] on read failure and
/// [`RippleError::MalformedInput`] for the first unparseable line.
pub fn parse_edge_list<R: BufRead>(
    reader: R,
    is_directed: bool,
    source: &Path,
) -> Result<NetworkGraph> {
    let mut edges = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| RippleError::io(source, e))?;
        let line_no = idx + 1;

        let mut tokens = line.split_whitespace();
        let Some(first) = tokens.next() else {
            continue;
        };
        let Some(second) = tokens.next() else {
            return Err(malformed(source, line_no, "expected two node ids".to_string()));
        };

        let u = parse_node(first, source, line_no)?;
        let v = parse_node(second, source, line_no)?;
        edges.push((u, v));
    }

    Ok(NetworkGraph::from_edges(is_directed, &edges))
}

fn parse_node(token: &str, source: &Path, line: usize) -> Result<u64> {
    token
        .parse::<u64>()
        .map_err(|e| malformed(source, line, format!("node id `{token}`: {e}")))
}

fn malformed(source: &Path, line: usize, reason: String) -> RippleError {
    RippleError::MalformedInput {
        path: source.to_path_buf(),
        line,
        reason,
    }
}
