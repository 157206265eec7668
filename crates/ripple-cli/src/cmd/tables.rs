use std::path::PathBuf;

use clap::Args;
use ripple_core::config::{LoadedConfig, ReportConfig};
use ripple_core::registry::reported_result_keys;
use ripple_report::{
    ExperimentLayout, TableJob, TableStyle, aggregate_statistics, render_metric_table,
};

use super::{BatchSummary, LayoutArgs, finish_report, write_document};
use crate::output::OutputMode;

#[derive(Args, Debug, Default)]
pub struct TablesArgs {
    #[command(flatten)]
    pub layout: LayoutArgs,
}

pub fn run_tables(
    args: &TablesArgs,
    config: &LoadedConfig,
    output: OutputMode,
) -> anyhow::Result<()> {
    let layout = args.layout.layout(config);
    let summary = render_tables(&layout, &config.config.report);
    finish_report(output, &summary, &layout, "Tables")
}

/// Render the long and short table of every results file in the layout.
/// Missing results files are skipped.
pub fn render_tables(layout: &ExperimentLayout, report: &ReportConfig) -> BatchSummary {
    let known = reported_result_keys();
    let mut summary = BatchSummary::default();

    for job in layout.table_jobs(report) {
        let item = job.input.display().to_string();
        if !job.input.is_file() {
            summary.skip(item, "results file not found");
            continue;
        }
        match render_job(&job, &known) {
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

fn render_job(job: &TableJob, known: &[&str]) -> anyhow::Result<Vec<PathBuf>> {
    let stats = aggregate_statistics(&job.input, known)?;

    let mut written = Vec::with_capacity(TableStyle::ALL.len());
    for style in TableStyle::ALL {
        let path = job.output(style);
        write_document(
            &path,
            &render_metric_table(&stats, style, &job.context, &job.model),
        )?;
        written.push(path);
    }
    Ok(written)
}
