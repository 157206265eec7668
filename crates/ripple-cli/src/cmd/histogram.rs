use std::path::PathBuf;

use clap::Args;
use ripple_report::{ThresholdHistogram, compute_threshold_histogram};
use serde::Serialize;

use crate::output::{OutputMode, pretty_kv, pretty_section, render_mode};

#[derive(Args, Debug)]
pub struct HistogramArgs {
    /// Threshold file (`Node,Threshold` header, one row per node).
    pub file: PathBuf,
}

#[derive(Debug, Serialize)]
struct Bucket {
    upper: f64,
    proportion: f64,
}

#[derive(Debug, Serialize)]
struct HistogramOutput {
    file: PathBuf,
    rows: usize,
    buckets: Vec<Bucket>,
}

impl HistogramOutput {
    fn new(file: PathBuf, histogram: &ThresholdHistogram) -> Self {
        Self {
            file,
            rows: histogram.rows(),
            buckets: histogram
                .iter()
                .map(|(upper, proportion)| Bucket { upper, proportion })
                .collect(),
        }
    }
}

pub fn run_histogram(args: &HistogramArgs, output: OutputMode) -> anyhow::Result<()> {
    let histogram = compute_threshold_histogram(&args.file)?;
    let report = HistogramOutput::new(args.file.clone(), &histogram);

    render_mode(
        output,
        &report,
        |r, w| {
            for b in &r.buckets {
                writeln!(w, "{:.1} {}", b.upper, b.proportion)?;
            }
            Ok(())
        },
        |r, w| {
            pretty_section(w, &format!("Thresholds of {}", r.file.display()))?;
            pretty_kv(w, "nodes", r.rows.to_string())?;
            for b in &r.buckets {
                pretty_kv(w, &format!("<= {:.1}", b.upper), format!("{:.4}", b.proportion))?;
            }
            Ok(())
        },
    )
}
