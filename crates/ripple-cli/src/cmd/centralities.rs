use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use ripple_core::Network;
use ripple_core::config::LoadedConfig;
use ripple_metrics::{
    PageRankConfig, centrality_file_name, compute_centralities_with, load_network,
    write_centrality_file,
};
use serde::Serialize;
use tracing::info;

use super::{BatchSummary, parse_network, selected_networks};
use crate::output::{OutputMode, pretty_kv, pretty_section, render_mode};

#[derive(Args, Debug, Default)]
pub struct CentralitiesArgs {
    /// Only this network (display name, result key, or file name). Repeatable.
    ///
    /// A selected network whose edge list is missing counts as a failure;
    /// without a selection, missing edge lists are skipped.
    #[arg(long = "network", value_name = "NAME", value_parser = parse_network)]
    pub networks: Vec<Network>,
}

#[derive(Debug, Serialize)]
struct NetworkCentralities {
    network: &'static str,
    directed: bool,
    nodes: usize,
    edges: usize,
    pagerank_iterations: usize,
    pagerank_converged: bool,
    output: PathBuf,
}

#[derive(Debug, Serialize)]
struct CentralitiesOutput {
    networks: Vec<NetworkCentralities>,
    summary: BatchSummary,
}

pub fn run_centralities(
    args: &CentralitiesArgs,
    config: &LoadedConfig,
    output: OutputMode,
) -> anyhow::Result<()> {
    let paths = config.paths();
    let settings = PageRankConfig::from(&config.config.pagerank);
    let explicit = !args.networks.is_empty();

    let mut report = CentralitiesOutput {
        networks: Vec::new(),
        summary: BatchSummary::default(),
    };

    for network in selected_networks(&args.networks) {
        let input = paths.networks.join(network.descriptor().file_name);
        if !explicit && !input.exists() {
            report
                .summary
                .skip(network.display_name(), "edge list not found");
            continue;
        }

        let dest = paths
            .centralities
            .join(centrality_file_name(network.display_name()));
        match compute_one(network, &paths.networks, &dest, &settings) {
            Ok(done) => {
                report.summary.wrote(dest);
                report.networks.push(done);
            }
            Err(err) => report.summary.fail(network.display_name(), &err),
        }
    }

    render_mode(
        output,
        &report,
        |r, w| {
            for n in &r.networks {
                writeln!(
                    w,
                    "{}  nodes={} edges={} pagerank_iterations={} converged={}",
                    n.network, n.nodes, n.edges, n.pagerank_iterations, n.pagerank_converged
                )?;
            }
            r.summary.write_text(w)
        },
        |r, w| {
            for n in &r.networks {
                pretty_section(w, n.network)?;
                pretty_kv(w, "directed", n.directed.to_string())?;
                pretty_kv(w, "nodes", n.nodes.to_string())?;
                pretty_kv(w, "edges", n.edges.to_string())?;
                pretty_kv(
                    w,
                    "pagerank",
                    format!(
                        "{} iterations{}",
                        n.pagerank_iterations,
                        if n.pagerank_converged { "" } else { " (not converged)" }
                    ),
                )?;
                pretty_kv(w, "output", n.output.display().to_string())?;
                writeln!(w)?;
            }
            r.summary.write_pretty(w, "Centralities")
        },
    )?;

    report.summary.finish("networks")
}

fn compute_one(
    network: Network,
    networks_dir: &Path,
    dest: &Path,
    settings: &PageRankConfig,
) -> anyhow::Result<NetworkCentralities> {
    let graph = load_network(network, networks_dir)
        .with_context(|| format!("loading {network}"))?;
    let result = compute_centralities_with(&graph, settings)
        .with_context(|| format!("computing centralities of {network}"))?;
    write_centrality_file(&result, dest)?;

    info!(
        network = network.display_name(),
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "computed centralities"
    );

    Ok(NetworkCentralities {
        network: network.display_name(),
        directed: result.directed,
        nodes: graph.node_count(),
        edges: graph.edge_count(),
        pagerank_iterations: result.pagerank_iterations,
        pagerank_converged: result.pagerank_converged,
        output: dest.to_path_buf(),
    })
}
