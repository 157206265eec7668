//! Command handlers. Each module owns its clap `Args` and a `run_*` entry
//! point; the helpers below are shared by the batch commands.

pub mod centralities;
pub mod degree_range;
pub mod histogram;
pub mod plots;
pub mod report;
pub mod stats;
pub mod tables;

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use ripple_core::config::LoadedConfig;
use ripple_core::{Network, RippleError};
use ripple_report::ExperimentLayout;
use serde::Serialize;
use tracing::{error, info};

use crate::output::{CliError, OutputMode, pretty_kv, pretty_section, render_mode};

/// Directory overrides shared by the report commands.
#[derive(Args, Debug, Default, Clone)]
pub struct LayoutArgs {
    /// Experiment results directory (overrides `[paths] results`).
    #[arg(long, value_name = "DIR")]
    pub results: Option<PathBuf>,

    /// Where LaTeX sources are written (overrides `[paths] plots`).
    #[arg(long, value_name = "DIR")]
    pub plots: Option<PathBuf>,
}

impl LayoutArgs {
    pub fn layout(&self, config: &LoadedConfig) -> ExperimentLayout {
        let paths = config.paths();
        let results = self.results.as_ref().unwrap_or(&paths.results);
        let plots = self.plots.as_ref().unwrap_or(&paths.plots);
        info!(results = %results.display(), plots = %plots.display(), "experiment layout");
        ExperimentLayout::new(results, plots)
    }
}

/// Parse a `--network` value: display name or result key (case-insensitive),
/// or edge-list file name.
pub fn parse_network(value: &str) -> Result<Network, RippleError> {
    Network::from_file_name(value).or_else(|_| {
        Network::ALL
            .into_iter()
            .find(|n| {
                n.display_name().eq_ignore_ascii_case(value)
                    || n.result_key().eq_ignore_ascii_case(value)
            })
            .ok_or_else(|| RippleError::UnknownNetwork(value.to_string()))
    })
}

/// The networks a batch command visits: the explicit selection, or every
/// registered network.
pub fn selected_networks(selection: &[Network]) -> Vec<Network> {
    if selection.is_empty() {
        Network::ALL.to_vec()
    } else {
        selection.to_vec()
    }
}

/// Write a rendered document, creating parent directories.
pub fn write_document(path: &Path, content: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating directory {}", parent.display()))?;
    }
    fs::write(path, content).with_context(|| format!("writing {}", path.display()))
}

#[derive(Debug, Serialize)]
pub struct Skipped {
    pub item: String,
    pub reason: String,
}

#[derive(Debug, Serialize)]
pub struct Failure {
    pub item: String,
    #[serde(flatten)]
    pub error: CliError,
}

/// Outcome of a batch run. Failures are recorded and logged, never
/// propagated, so one bad input does not stop the others.
#[derive(Debug, Default, Serialize)]
pub struct BatchSummary {
    pub written: Vec<PathBuf>,
    pub skipped: Vec<Skipped>,
    pub failed: Vec<Failure>,
}

impl BatchSummary {
    pub fn wrote(&mut self, path: PathBuf) {
        info!(path = %path.display(), "wrote");
        self.written.push(path);
    }

    pub fn skip(&mut self, item: impl Into<String>, reason: impl Into<String>) {
        let (item, reason) = (item.into(), reason.into());
        info!(item = %item, reason = %reason, "skipped");
        self.skipped.push(Skipped { item, reason });
    }

    pub fn fail(&mut self, item: impl Into<String>, err: &anyhow::Error) {
        let item = item.into();
        error!(item = %item, error = %format!("{err:#}"), "failed");
        self.failed.push(Failure {
            item,
            error: CliError::from(err),
        });
    }

    pub fn absorb(&mut self, other: Self) {
        self.written.extend(other.written);
        self.skipped.extend(other.skipped);
        self.failed.extend(other.failed);
    }

    /// `Err` naming the failure count when anything failed.
    pub fn finish(&self, what: &str) -> anyhow::Result<()> {
        if self.failed.is_empty() {
            return Ok(());
        }
        let attempted = self.written.len() + self.failed.len();
        anyhow::bail!(
            "{} of {attempted} {what} failed: {}",
            self.failed.len(),
            self.failed
                .iter()
                .map(|f| f.item.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        )
    }

    pub fn write_text(&self, w: &mut dyn Write) -> io::Result<()> {
        for path in &self.written {
            writeln!(w, "wrote {}", path.display())?;
        }
        for s in &self.skipped {
            writeln!(w, "skipped {} ({})", s.item, s.reason)?;
        }
        for f in &self.failed {
            writeln!(w, "failed {}: {}", f.item, f.error.message)?;
        }
        Ok(())
    }

    pub fn write_pretty(&self, w: &mut dyn Write, heading: &str) -> io::Result<()> {
        pretty_section(w, heading)?;
        pretty_kv(w, "written", self.written.len().to_string())?;
        pretty_kv(w, "skipped", self.skipped.len().to_string())?;
        pretty_kv(w, "failed", self.failed.len().to_string())?;
        for path in &self.written {
            writeln!(w, "  + {}", path.display())?;
        }
        for s in &self.skipped {
            writeln!(w, "  - {} ({})", s.item, s.reason)?;
        }
        for f in &self.failed {
            writeln!(w, "  ! {}: {}", f.item, f.error.message)?;
        }
        Ok(())
    }
}

/// Print a report command's summary and turn its failures into an error.
/// A run that wrote nothing is also an error.
pub fn finish_report(
    output: OutputMode,
    summary: &BatchSummary,
    layout: &ExperimentLayout,
    heading: &str,
) -> anyhow::Result<()> {
    render_mode(output, summary, BatchSummary::write_text, |s, w| {
        s.write_pretty(w, heading)
    })?;
    summary.finish("jobs")?;
    if summary.written.is_empty() {
        anyhow::bail!(
            "no experiment results found under {}",
            layout.results().display()
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_network_accepts_all_spellings() {
        assert_eq!(parse_network("Dining Table").expect("display"), Network::DiningTable);
        assert_eq!(parse_network("dining_table").expect("key"), Network::DiningTable);
        assert_eq!(parse_network("enron").expect("key"), Network::Enron);
        assert_eq!(parse_network("Wiki-Vote.txt").expect("file"), Network::Wikipedia);
    }

    #[test]
    fn parse_network_rejects_unknown() {
        let err = parse_network("Texas").expect_err("not registered");
        assert!(matches!(err, RippleError::UnknownNetwork(name) if name == "Texas"));
    }

    #[test]
    fn empty_selection_means_every_network() {
        assert_eq!(selected_networks(&[]).len(), Network::ALL.len());
        assert_eq!(
            selected_networks(&[Network::Dolphins]),
            vec![Network::Dolphins]
        );
    }

    #[test]
    fn finish_reports_failures() {
        let mut summary = BatchSummary::default();
        summary.wrote(PathBuf::from("a.tex"));
        assert!(summary.finish("files").is_ok());

        summary.fail("Dolphins", &anyhow::anyhow!("boom"));
        let err = summary.finish("networks").expect_err("one failure");
        assert_eq!(err.to_string(), "1 of 2 networks failed: Dolphins");
    }

    #[test]
    fn write_document_creates_parents() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("a/b/c.tex");
        write_document(&path, "x").expect("write");
        assert_eq!(fs::read_to_string(path).expect("read"), "x");
    }
}
