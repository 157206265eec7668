#![forbid(unsafe_code)]
//! ripple-report library.
//!
//! Reduces experiment outputs to records and renders them:
//!
//! - [`threshold`]: per-node threshold files → [`ThresholdHistogram`].
//! - [`statistics`]: results files → [`NetworkStatistics`], and the
//!   [`format_value`] cell formatter.
//! - [`render`]: LaTeX tables and pgfplots figures from those records.
//! - [`experiment`]: the results/plots directory layout.
//!
//! # Conventions
//!
//! - **Errors**: Return [`ripple_core::Result`]. Rendering is infallible.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod experiment;
pub mod render;
pub mod statistics;
pub mod threshold;

pub use experiment::{ExperimentLayout, PlotJob, TableJob};
pub use render::{ExperimentContext, TableStyle, render_metric_table, render_threshold_figure};
pub use statistics::{
    MetricTriple, NetworkStatistics, Statistics, aggregate_statistics, format_value,
};
pub use threshold::{
    THRESHOLD_BOUNDS, ThresholdHistogram, compute_threshold_histogram, histograms_in_dir,
};
