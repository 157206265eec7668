//! Where experiment results live and where their reports go.
//!
//! ```text
//! <results>/first-experiment/<type>/th-<threshold>/<model>.txt
//! <results>/first-experiment/<type>/th-<threshold>/thresholds/<result key>.txt
//! <results>/second-experiment/<type>/<model>.txt
//! <results>/second-experiment/<type>/thresholds/<result key>.txt
//! ```
//!
//! Reports mirror the same relative directories under `<plots>`:
//! `<model>-long.tex`, `<model>-short.tex`, and
//! `thresholds-range-<group>.tex`.

use std::path::{Path, PathBuf};

use ripple_core::ReportGroup;
use ripple_core::config::ReportConfig;
use serde::Serialize;

use crate::render::{ExperimentContext, TableStyle};

const FIRST_DIR: &str = "first-experiment";
const SECOND_DIR: &str = "second-experiment";
const THRESHOLDS_DIR: &str = "thresholds";

/// One results file and the tables rendered from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableJob {
    pub context: ExperimentContext,
    /// Game model file stem.
    pub model: String,
    pub input: PathBuf,
    pub output_dir: PathBuf,
}

impl TableJob {
    /// Output file for one table style.
    #[must_use]
    pub fn output(&self, style: TableStyle) -> PathBuf {
        self.output_dir
            .join(format!("{}-{}.tex", self.model, style.label()))
    }
}

/// One thresholds directory and the figures rendered from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlotJob {
    pub context: ExperimentContext,
    pub thresholds_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl PlotJob {
    /// Output file for one report group.
    #[must_use]
    pub fn output(&self, group: ReportGroup) -> PathBuf {
        self.output_dir
            .join(format!("thresholds-range-{}.tex", group.label()))
    }
}

/// Directory layout rooted at a results and a plots directory.
#[derive(Debug, Clone)]
pub struct ExperimentLayout {
    results: PathBuf,
    plots: PathBuf,
}

impl ExperimentLayout {
    #[must_use]
    pub fn new(results: &Path, plots: &Path) -> Self {
        Self {
            results: results.to_path_buf(),
            plots: plots.to_path_buf(),
        }
    }

    #[must_use]
    pub fn results(&self) -> &Path {
        &self.results
    }

    /// Every configured experiment directory with its context, relative to
    /// the results (and plots) root.
    fn experiments(report: &ReportConfig) -> Vec<(PathBuf, ExperimentContext)> {
        let first = report.first_types.iter().flat_map(|kind| {
            report.thresholds.iter().map(move |th| {
                (
                    Path::new(FIRST_DIR).join(kind).join(format!("th-{th}")),
                    ExperimentContext::first(th, kind, report.repetitions),
                )
            })
        });
        let second = report.second_types.iter().map(|kind| {
            (
                Path::new(SECOND_DIR).join(kind),
                ExperimentContext::second(kind, report.repetitions),
            )
        });
        first.chain(second).collect()
    }

    /// Table jobs for every experiment directory and model.
    #[must_use]
    pub fn table_jobs(&self, report: &ReportConfig) -> Vec<TableJob> {
        Self::experiments(report)
            .into_iter()
            .flat_map(|(rel, context)| {
                report.models.iter().map(move |model| TableJob {
                    context: context.clone(),
                    model: model.clone(),
                    input: self.results.join(&rel).join(format!("{model}.txt")),
                    output_dir: self.plots.join(&rel),
                })
            })
            .collect()
    }

    /// Plot jobs for every experiment directory.
    #[must_use]
    pub fn plot_jobs(&self, report: &ReportConfig) -> Vec<PlotJob> {
        Self::experiments(report)
            .into_iter()
            .map(|(rel, context)| PlotJob {
                context,
                thresholds_dir: self.results.join(&rel).join(THRESHOLDS_DIR),
                output_dir: self.plots.join(&rel),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Experiment;

    fn layout() -> ExperimentLayout {
        ExperimentLayout::new(Path::new("res"), Path::new("out"))
    }

    #[test]
    fn default_config_job_counts() {
        let report = ReportConfig::default();
        // (2 first types * 4 thresholds + 2 second types) * 2 models
        assert_eq!(layout().table_jobs(&report).len(), 20);
        assert_eq!(layout().plot_jobs(&report).len(), 10);
    }

    #[test]
    fn first_experiment_paths() {
        let jobs = layout().table_jobs(&ReportConfig::default());
        let job = &jobs[0];
        assert_eq!(
            job.input,
            Path::new("res/first-experiment/complete/th-0.25/model-1.txt")
        );
        assert_eq!(
            job.output(TableStyle::Long),
            Path::new("out/first-experiment/complete/th-0.25/model-1-long.tex")
        );
        assert_eq!(
            job.context.experiment,
            Experiment::First {
                threshold: "0.25".to_string()
            }
        );
    }

    #[test]
    fn second_experiment_paths() {
        let plots = layout().plot_jobs(&ReportConfig::default());
        let job = plots.last().expect("jobs");
        assert_eq!(
            job.thresholds_dir,
            Path::new("res/second-experiment/malicious/thresholds")
        );
        assert_eq!(
            job.output(ReportGroup::Big),
            Path::new("out/second-experiment/malicious/thresholds-range-big.tex")
        );
        assert_eq!(job.context.experiment, Experiment::Second);
    }
}
