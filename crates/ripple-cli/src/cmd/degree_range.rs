
use anyhow::Context;
use clap::Args;
use ripple_core::Network;
use ripple_core::config::LoadedConfig;
use ripple_metrics::load_network;
use ripple_metrics::metrics::degree::{DegreeRange, degree_range};
use serde::Serialize;

use super::{BatchSummary, parse_network, selected_networks};
use crate::output::{OutputMode, pretty_kv, pretty_section, render_mode};

#[derive(Args, Debug, Default)]
pub struct DegreeRangeArgs {
    /// Only this network (display name, result key, or file name). Repeatable.
    #[arg(long = "network", value_name = "NAME", value_parser = parse_network)]
    pub networks: Vec<Network>,
}

#[derive(Debug, Serialize)]
struct NetworkDegrees {
    network: &'static str,
    directed: bool,
    nodes: usize,
    #[serde(flatten)]
    range: DegreeRange,
}

#[derive(Debug, Serialize)]
struct DegreeRangeOutput {
    networks: Vec<NetworkDegrees>,
    summary: BatchSummary,
}

/// Print the min and max raw degree (in-degree when directed) per network.
pub fn run_degree_range(
    args: &DegreeRangeArgs,
    config: &LoadedConfig,
    output: OutputMode,
) -> anyhow::Result<()> {
    let paths = config.paths();
    let explicit = !args.networks.is_empty();
    let mut report = DegreeRangeOutput {
        networks: Vec::new(),
        summary: BatchSummary::default(),
    };

    for network in selected_networks(&args.networks) {
        if !explicit && !paths.networks.join(network.descriptor().file_name).exists() {
            report
                .summary
                .skip(network.display_name(), "edge list not found");
            continue;
        }

        let measured = load_network(network, &paths.networks)
            .with_context(|| format!("loading {network}"))
            .and_then(|g| {
                let range = degree_range(&g)?;
                Ok(NetworkDegrees {
                    network: network.display_name(),
                    directed: g.is_directed(),
                    nodes: g.node_count(),
                    range,
                })
            });
        match measured {
            Ok(n) => report.networks.push(n),
            Err(err) => report.summary.fail(network.display_name(), &err),
        }
    }

    render_mode(
        output,
        &report,
        |r, w| {
            for n in &r.networks {
                writeln!(w, "{}  min={} max={}", n.network, n.range.min, n.range.max)?;
            }
            r.summary.write_text(w)
        },
        |r, w| {
            pretty_section(w, "Degree range")?;
            for n in &r.networks {
                let kind = if n.directed { "in-degree" } else { "degree" };
                pretty_kv(
                    w,
                    n.network,
                    format!("{kind} {}..={} over {} nodes", n.range.min, n.range.max, n.nodes),
                )?;
            }
            if !r.summary.skipped.is_empty() || !r.summary.failed.is_empty() {
                writeln!(w)?;
                r.summary.write_text(w)?;
            }
            Ok(())
        },
    )?;

    report.summary.finish("networks")
}
