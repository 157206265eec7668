use std::io::{self, Write};
use std::path::PathBuf;

use clap::Args;
use ripple_core::registry::reported_result_keys;
use ripple_report::{MetricTriple, Statistics, aggregate_statistics, format_value};

use crate::output::{OutputMode, pretty_kv, pretty_section, render_mode};

#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Results file written by the simulator.
    pub file: PathBuf,

    /// Result key to aggregate (`Network` column value). Repeatable.
    ///
    /// Defaults to every network that appears in reports.
    #[arg(long = "network", value_name = "KEY")]
    pub networks: Vec<String>,

    /// Omit networks without a row in the file.
    #[arg(long)]
    pub present_only: bool,
}

pub fn run_stats(args: &StatsArgs, output: OutputMode) -> anyhow::Result<()> {
    let known: Vec<&str> = if args.networks.is_empty() {
        reported_result_keys()
    } else {
        args.networks.iter().map(String::as_str).collect()
    };

    let stats = aggregate_statistics(&args.file, &known)?;
    let records: Vec<&Statistics> = stats
        .iter()
        .filter(|s| !args.present_only || !s.is_empty())
        .collect();

    render_mode(
        output,
        &records,
        |r, w| {
            for s in r {
                writeln!(
                    w,
                    "{} n={} pi_i={} pi_f={} pi_t={} rounds={}",
                    s.network,
                    s.n,
                    format_value(s.initial_prop),
                    format_value(s.influence_prop),
                    format_value(s.target_prop),
                    format_value(s.rounds)
                )?;
            }
            Ok(())
        },
        |r, w| {
            for s in r {
                write_pretty_record(w, s)?;
            }
            Ok(())
        },
    )
}

fn triple(t: MetricTriple) -> String {
    format!(
        "min {}  avg {}  max {}",
        format_value(t.min),
        format_value(t.avg),
        format_value(t.max)
    )
}

fn write_pretty_record(w: &mut dyn Write, s: &Statistics) -> io::Result<()> {
    let heading = if s.is_empty() {
        format!("{} (no row)", s.display_name())
    } else {
        s.display_name()
    };
    pretty_section(w, &heading)?;
    pretty_kv(w, "nodes", s.n.to_string())?;
    pretty_kv(w, "initial", format_value(s.initial_prop))?;
    pretty_kv(w, "influenced", format_value(s.influence_prop))?;
    pretty_kv(w, "target", format_value(s.target_prop))?;
    pretty_kv(w, "rounds", format_value(s.rounds))?;
    pretty_kv(w, "degree I", triple(s.degree_initial))?;
    pretty_kv(w, "degree F", triple(s.degree_influence))?;
    pretty_kv(w, "between. I", triple(s.betweenness_initial))?;
    pretty_kv(w, "between. F", triple(s.betweenness_influence))?;
    pretty_kv(w, "pagerank I", triple(s.pagerank_initial))?;
    pretty_kv(w, "pagerank F", triple(s.pagerank_influence))?;
    writeln!(w)
}
