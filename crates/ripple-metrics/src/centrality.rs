//! All three centralities of one network, and the centrality file format.
//!
//! A centrality file is a headered CSV with one row per node, ascending
//! node id:
//!
//! ```text
//! Node,Pagerank,Betweenness,Degree
//! 0,0.25,0.0,0.5
//! ```
//!
//! `Degree` is the primary degree centrality (in-degree for directed
//! graphs, see [`DegreeMode::primary`]).

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use ripple_core::{Result, RippleError};

use crate::graph::NetworkGraph;
use crate::metrics::betweenness::betweenness_centrality;
use crate::metrics::degree::{DegreeMode, DegreeRange, degree_centrality, degree_range};
use crate::metrics::pagerank::{PageRankConfig, pagerank};

/// Per-node centralities of one graph. Every vector is indexed like
/// [`Self::nodes`].
#[derive(Debug, Clone, Serialize)]
pub struct CentralityResult {
    pub directed: bool,
    /// Node ids, ascending.
    pub nodes: Vec<u64>,
    /// Primary degree centrality.
    pub degree: Vec<f64>,
    /// Out-degree centrality; `None` for undirected graphs.
    pub out_degree: Option<Vec<f64>>,
    pub pagerank: Vec<f64>,
    pub betweenness: Vec<f64>,
    /// Raw primary degree bounds.
    pub degree_range: DegreeRange,
    pub pagerank_iterations: usize,
    pub pagerank_converged: bool,
}

impl CentralityResult {
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// File rows, ascending node id.
    #[must_use]
    pub fn rows(&self) -> Vec<CentralityRow> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, &node)| CentralityRow {
                node,
                pagerank: self.pagerank[i],
                betweenness: self.betweenness[i],
                degree: self.degree[i],
            })
            .collect()
    }
}

/// One line of a centrality file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CentralityRow {
    #[serde(rename = "Node")]
    pub node: u64,
    #[serde(rename = "Pagerank")]
    pub pagerank: f64,
    #[serde(rename = "Betweenness")]
    pub betweenness: f64,
    #[serde(rename = "Degree")]
    pub degree: f64,
}

/// Compute degree, PageRank, and betweenness with default PageRank settings.
///
/// # Errors
///
/// Returns [`RippleError::EmptyGraph`] if `g` has no nodes.
pub fn compute_centralities(g: &NetworkGraph) -> Result<CentralityResult> {
    compute_centralities_with(g, &PageRankConfig::default())
}

/// Compute degree, PageRank, and betweenness.
///
/// # Errors
///
/// Returns [`RippleError::EmptyGraph`] if `g` has no nodes.
#[instrument(skip_all, fields(nodes = g.node_count(), edges = g.edge_count()))]
pub fn compute_centralities_with(
    g: &NetworkGraph,
    config: &PageRankConfig,
) -> Result<CentralityResult> {
    let directed = g.is_directed();

    let degree = degree_centrality(g, DegreeMode::primary(directed))?;
    let out_degree = if directed {
        Some(degree_centrality(g, DegreeMode::Out)?)
    } else {
        None
    };
    let range = degree_range(g)?;
    let pr = pagerank(g, config)?;
    let betweenness = betweenness_centrality(g)?;

    debug!(
        pagerank_iterations = pr.iterations,
        min_degree = range.min,
        max_degree = range.max,
        "computed centralities"
    );

    Ok(CentralityResult {
        directed,
        nodes: g.node_ids(),
        degree,
        out_degree,
        pagerank: pr.scores,
        betweenness,
        degree_range: range,
        pagerank_iterations: pr.iterations,
        pagerank_converged: pr.converged,
    })
}

/// Name of the centrality file for a network's display name.
#[must_use]
pub fn centrality_file_name(display_name: &str) -> String {
    format!("{display_name}-centralities.txt")
}

/// Write `result` as a centrality CSV. `dest` only labels errors.
///
/// # Errors
///
/// Returns [`RippleError::Csv`] if serialization or the write fails.
pub fn write_centralities<W: Write>(result: &CentralityResult, writer: W, dest: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for row in result.rows() {
        wtr.serialize(row).map_err(|e| RippleError::csv(dest, e))?;
    }
    wtr.flush().map_err(|e| RippleError::io(dest, e))?;
    Ok(())
}

/// Write `result` to `path`, creating parent directories as needed.
///
/// # Errors
///
/// Returns [`RippleError::Io`] or [`RippleError::Csv`] on failure.
pub fn write_centrality_file(result: &CentralityResult, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| RippleError::io(parent, e))?;
    }
    let file = File::create(path).map_err(|e| RippleError::io(path, e))?;
    write_centralities(result, file, path)?;
    debug!(path = %path.display(), rows = result.node_count(), "wrote centrality file");
    Ok(())
}

/// Parse a centrality CSV. `source` only labels errors.
///
/// # Errors
///
/// Returns [`RippleError::Csv`] for framing errors or a missing column,
/// and [`RippleError::MalformedRow`] for an unparseable field.
pub fn read_centralities<R: Read>(reader: R, source: &Path) -> Result<Vec<CentralityRow>> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut rows = Vec::new();

    for record in rdr.deserialize::<CentralityRow>() {
        match record {
            Ok(row) => rows.push(row),
            Err(e) => {
                if let csv::ErrorKind::Deserialize { pos: Some(pos), err } = e.kind() {
                    return Err(RippleError::MalformedRow {
                        path: source.to_path_buf(),
                        line: usize::try_from(pos.line()).unwrap_or(usize::MAX),
                        reason: err.to_string(),
                    });
                }
                return Err(RippleError::csv(source, e));
            }
        }
    }

    Ok(rows)
}

/// Read the centrality file at `path`.
///
/// # Errors
///
/// Same as [`read_centralities`], plus [`RippleError::Io`] if the file
/// cannot be opened.
pub fn read_centrality_file(path: &Path) -> Result<Vec<CentralityRow>> {
    let file = File::open(path).map_err(|e| RippleError::io(path, e))?;
    read_centralities(file, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> NetworkGraph {
        NetworkGraph::from_edges(false, &[(0, 1), (1, 2), (2, 0)])
    }

    #[test]
    fn vectors_are_aligned() {
        let g = NetworkGraph::from_edges(true, &[(5, 1), (1, 9), (9, 5), (9, 2)]);
        let r = compute_centralities(&g).expect("non-empty");
        assert_eq!(r.nodes, vec![1, 2, 5, 9]);
        assert_eq!(r.degree.len(), 4);
        assert_eq!(r.pagerank.len(), 4);
        assert_eq!(r.betweenness.len(), 4);
        assert_eq!(r.out_degree.as_ref().map(Vec::len), Some(4));
    }

    #[test]
    fn undirected_has_no_out_degree() {
        let r = compute_centralities(&triangle()).expect("non-empty");
        assert!(!r.directed);
        assert!(r.out_degree.is_none());
        assert_eq!(r.degree_range, DegreeRange { min: 2, max: 2 });
    }

    #[test]
    fn triangle_metrics() {
        let r = compute_centralities(&triangle()).expect("non-empty");
        let total: f64 = r.pagerank.iter().sum();
        assert!((total - 1.0).abs() < 1e-6);
        assert!(r.betweenness.iter().all(|&b| b.abs() < 1e-12));
        assert!(r.degree.iter().all(|&d| (d - 1.0).abs() < 1e-12));
        assert!(r.pagerank_converged);
    }

    #[test]
    fn empty_graph_propagates_error() {
        let g = NetworkGraph::from_edges(false, &[]);
        assert!(matches!(
            compute_centralities(&g),
            Err(RippleError::EmptyGraph { .. })
        ));
    }

    #[test]
    fn file_has_header_and_node_ids() {
        let g = NetworkGraph::from_edges(false, &[(10, 20)]);
        let r = compute_centralities(&g).expect("non-empty");
        let mut buf = Vec::new();
        write_centralities(&r, &mut buf, Path::new("mem")).expect("write");
        let text = String::from_utf8(buf).expect("utf8");
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("Node,Pagerank,Betweenness,Degree"));
        assert!(lines.next().is_some_and(|l| l.starts_with("10,")));
        assert!(lines.next().is_some_and(|l| l.starts_with("20,")));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn bad_field_is_malformed_row() {
        let text = "Node,Pagerank,Betweenness,Degree\n0,0.5,0.0,1.0\n1,abc,0.0,1.0\n";
        let err = read_centralities(text.as_bytes(), Path::new("c.txt")).expect_err("must fail");
        assert!(matches!(err, RippleError::MalformedRow { line: 3, .. }), "{err}");
    }

    #[test]
    fn file_name_uses_display_name() {
        assert_eq!(
            centrality_file_name("Dining Table"),
            "Dining Table-centralities.txt"
        );
    }
}
