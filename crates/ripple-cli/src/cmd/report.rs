use clap::Args;
use ripple_core::config::LoadedConfig;

use super::plots::render_plots;
use super::tables::render_tables;
use super::{LayoutArgs, finish_report};
use crate::output::OutputMode;

#[derive(Args, Debug, Default)]
pub struct ReportArgs {
    #[command(flatten)]
    pub layout: LayoutArgs,
}

/// Tables then plots over the same layout, with one combined summary.
pub fn run_report(args: &ReportArgs, config: &LoadedConfig, output: OutputMode) -> anyhow::Result<()> {
    let layout = args.layout.layout(config);
    let report = &config.config.report;

    let mut summary = render_tables(&layout, report);
    summary.absorb(render_plots(&layout, report));

    finish_report(output, &summary, &layout, "Report")
}
