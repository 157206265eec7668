use std::path::PathBuf;

use clap::Args;
use ripple_core::ReportGroup;
use ripple_core::config::{LoadedConfig, ReportConfig};
use ripple_report::{ExperimentLayout, PlotJob, histograms_in_dir, render_threshold_figure};
use tracing::debug;

use super::{BatchSummary, LayoutArgs, finish_report, write_document};
use crate::output::OutputMode;

#[derive(Args, Debug, Default)]
pub struct PlotsArgs {
    #[command(flatten)]
    pub layout: LayoutArgs,
}

pub fn run_plots(args: &PlotsArgs, config: &LoadedConfig, output: OutputMode) -> anyhow::Result<()> {
    let layout = args.layout.layout(config);
    let summary = render_plots(&layout, &config.config.report);
    finish_report(output, &summary, &layout, "Plots")
}

/// Render both group figures of every thresholds directory in the layout.
/// Missing directories are skipped; one bad threshold file fails its whole
/// directory.
pub fn render_plots(layout: &ExperimentLayout, report: &ReportConfig) -> BatchSummary {
    let mut summary = BatchSummary::default();

    for job in layout.plot_jobs(report) {
        let item = job.thresholds_dir.display().to_string();
        if !job.thresholds_dir.is_dir() {
            summary.skip(item, "thresholds directory not found");
            continue;
        }
        match render_job(&job) {
            Ok(written) => {
                for path in written {
                    summary.wrote(path);
                }
            }
            Err(err) => summary.fail(item, &err),
        }
    }

    summary
}

fn render_job(job: &PlotJob) -> anyhow::Result<Vec<PathBuf>> {
    let histograms = histograms_in_dir(&job.thresholds_dir)?;
    debug!(
        dir = %job.thresholds_dir.display(),
        files = histograms.len(),
        "loaded threshold histograms"
    );

    let mut written = Vec::with_capacity(ReportGroup::ALL.len());
    for group in ReportGroup::ALL {
        let path = job.output(group);
        write_document(&path, &render_threshold_figure(&histograms, group, &job.context))?;
        written.push(path);
    }
    Ok(written)
}
