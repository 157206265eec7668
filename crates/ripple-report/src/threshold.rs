//! Threshold histograms.
//!
//! # Input
//!
//! A threshold file is a headered CSV written by the simulator, one node
//! per row:
//!
//! ```text
//! Node,Threshold
//! 0,0.250000
//! 1,0.975000
//! ```
//!
//! Only column index 1 is read. The header is skipped without being
//! checked.
//!
//! # Buckets
//!
//! Ten buckets with upper bounds `0.1, 0.2, …, 1.0`. A value goes to the
//! first bound it does not exceed, so `0.0` lands in the `0.1` bucket and
//! `0.1` itself does too. Counts are divided by the row count, which makes
//! the proportions sum to 1. A value above `1.0` (or NaN) fits no bucket
//! and is a [`RippleError::MalformedRow`].

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Serialize;
use tracing::{debug, instrument};

use ripple_core::{Result, RippleError};

/// Upper bound of each bucket, ascending.
pub const THRESHOLD_BOUNDS: [f64; 10] = [0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9, 1.0];

/// Proportion of nodes per threshold bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThresholdHistogram {
    /// Proportion for `THRESHOLD_BOUNDS[i]`.
    proportions: [f64; 10],
    /// Number of rows the proportions were computed from.
    rows: usize,
}

impl ThresholdHistogram {
    /// Build a histogram from raw values.
    ///
    /// Returns `None` for an empty slice or a value that fits no bucket.
    #[must_use]
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let mut counts = [0usize; 10];
        for &v in values {
            counts[bucket_index(v)?] += 1;
        }
        Self::from_counts(counts)
    }

    #[allow(clippy::cast_precision_loss)]
    fn from_counts(counts: [usize; 10]) -> Option<Self> {
        let rows: usize = counts.iter().sum();
        if rows == 0 {
            return None;
        }
        let total = rows as f64;
        Some(Self {
            proportions: counts.map(|c| c as f64 / total),
            rows,
        })
    }

    /// `(upper bound, proportion)` pairs in ascending bound order.
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        THRESHOLD_BOUNDS.iter().copied().zip(self.proportions.iter().copied())
    }

    #[must_use]
    pub const fn proportions(&self) -> &[f64; 10] {
        &self.proportions
    }

    /// Proportion of the bucket whose upper bound is `1.0`.
    #[must_use]
    pub const fn last(&self) -> f64 {
        self.proportions[9]
    }

    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Largest bucket proportion.
    #[must_use]
    pub fn max_proportion(&self) -> f64 {
        self.proportions.iter().copied().fold(0.0, f64::max)
    }
}

/// Index of the bucket `value` falls in, or `None` if it exceeds every
/// bound (or is NaN).
#[must_use]
pub fn bucket_index(value: f64) -> Option<usize> {
    THRESHOLD_BOUNDS.iter().position(|&b| value <= b)
}

/// Histogram of the threshold file at `path`.
///
/// # Errors
///
/// Returns [`RippleError::EmptyFile`] when the file has no data rows,
/// [`RippleError::MalformedRow`] for a missing or unparseable threshold
/// or one above 1.0, and [`RippleError::Io`]/[`RippleError::Csv`] on read
/// failure.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn compute_threshold_histogram(path: &Path) -> Result<ThresholdHistogram> {
    let file = File::open(path).map_err(|e| RippleError::io(path, e))?;
    let histogram = read_threshold_histogram(file, path)?;
    debug!(rows = histogram.rows(), "bucketed thresholds");
    Ok(histogram)
}

/// Histogram of threshold rows read from `reader`. `source` only labels
/// errors.
///
/// # Errors
///
/// Same as [`compute_threshold_histogram`].
pub fn read_threshold_histogram<R: Read>(reader: R, source: &Path) -> Result<ThresholdHistogram> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut counts = [0usize; 10];
    let mut record = csv::StringRecord::new();

    loop {
        match rdr.read_record(&mut record) {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => return Err(RippleError::csv(source, e)),
        }

        let line = record
            .position()
            .map_or(0, |p| usize::try_from(p.line()).unwrap_or(usize::MAX));
        let malformed = |reason: String| RippleError::MalformedRow {
            path: source.to_path_buf(),
            line,
            reason,
        };

        let field = record
            .get(1)
            .ok_or_else(|| malformed("missing threshold column".to_string()))?;
        let value: f64 = field
            .parse()
            .map_err(|e| malformed(format!("threshold `{field}`: {e}")))?;
        let bucket = bucket_index(value)
            .ok_or_else(|| malformed(format!("threshold {value} is outside [0, 1]")))?;

        counts[bucket] += 1;
    }

    ThresholdHistogram::from_counts(counts).ok_or_else(|| RippleError::EmptyFile {
        path: source.to_path_buf(),
    })
}

/// Histograms of every `*.txt` file in `dir`, keyed by file stem.
///
/// The simulator names threshold files after the network's result key,
/// so the keys are result keys.
///
/// # Errors
///
/// Returns [`RippleError::Io`] if the directory cannot be listed, or the
/// first error from [`compute_threshold_histogram`].
#[instrument(skip_all, fields(dir = %dir.display()))]
pub fn histograms_in_dir(dir: &Path) -> Result<BTreeMap<String, ThresholdHistogram>> {
    let entries = std::fs::read_dir(dir).map_err(|e| RippleError::io(dir, e))?;

    let mut paths = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| RippleError::io(dir, e))?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "txt") {
            paths.push(path);
        }
    }
    paths.sort();

    let mut histograms = BTreeMap::new();
    for path in paths {
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        histograms.insert(stem.to_string(), compute_threshold_histogram(&path)?);
    }

    debug!(files = histograms.len(), "read threshold directory");
    Ok(histograms)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<ThresholdHistogram> {
        read_threshold_histogram(text.as_bytes(), Path::new("th.txt"))
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn three_values_in_three_buckets() {
        let h = parse("Node,Threshold\n0,0.05\n1,0.15\n2,1.0\n").expect("parse");
        let p = h.proportions();
        assert!(approx(p[0], 1.0 / 3.0));
        assert!(approx(p[1], 1.0 / 3.0));
        assert!(approx(p[9], 1.0 / 3.0));
        assert!(p[2..9].iter().all(|&x| x == 0.0));
        assert_eq!(h.rows(), 3);
    }

    #[test]
    fn bounds_are_inclusive() {
        assert_eq!(bucket_index(0.0), Some(0));
        assert_eq!(bucket_index(0.1), Some(0));
        assert_eq!(bucket_index(0.10001), Some(1));
        assert_eq!(bucket_index(0.5), Some(4));
        assert_eq!(bucket_index(1.0), Some(9));
    }

    #[test]
    fn out_of_range_values_fit_no_bucket() {
        assert_eq!(bucket_index(1.0001), None);
        assert_eq!(bucket_index(f64::NAN), None);
    }

    #[test]
    fn header_only_is_empty_file() {
        let err = parse("Node,Threshold\n").expect_err("must fail");
        assert!(matches!(err, RippleError::EmptyFile { .. }));
    }

    #[test]
    fn value_above_one_is_malformed() {
        let err = parse("Node,Threshold\n0,0.5\n1,1.5\n").expect_err("must fail");
        assert!(matches!(err, RippleError::MalformedRow { line: 3, .. }), "{err}");
    }

    #[test]
    fn unparseable_value_is_malformed() {
        let err = parse("Node,Threshold\n0,high\n").expect_err("must fail");
        assert!(matches!(err, RippleError::MalformedRow { line: 2, .. }));
        assert!(err.to_string().contains("high"));
    }

    #[test]
    fn missing_column_is_malformed() {
        let err = parse("Node,Threshold\n0\n").expect_err("must fail");
        assert!(matches!(err, RippleError::MalformedRow { .. }));
    }

    #[test]
    fn whitespace_around_fields_is_tolerated() {
        let h = parse("Node,Threshold\n0, 0.35 \n").expect("parse");
        assert!(approx(h.proportions()[3], 1.0));
    }

    #[test]
    fn max_and_last() {
        let h = ThresholdHistogram::from_values(&[0.95, 0.95, 0.95, 0.2]).expect("non-empty");
        assert!(approx(h.max_proportion(), 0.75));
        assert!(approx(h.last(), 0.75));
        assert_eq!(h.iter().count(), 10);
    }

    #[test]
    fn from_values_rejects_empty_and_out_of_range() {
        assert!(ThresholdHistogram::from_values(&[]).is_none());
        assert!(ThresholdHistogram::from_values(&[0.5, 2.0]).is_none());
    }

    #[test]
    fn directory_is_keyed_by_stem() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("Dolphins.txt"), "Node,Threshold\n0,0.5\n").expect("write");
        std::fs::write(dir.path().join("ENRON.txt"), "Node,Threshold\n0,0.9\n").expect("write");
        std::fs::write(dir.path().join("notes.md"), "ignored").expect("write");

        let all = histograms_in_dir(dir.path()).expect("read dir");
        let keys: Vec<&str> = all.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["Dolphins", "ENRON"]);
        assert!(approx(all["ENRON"].proportions()[8], 1.0));
    }

    #[test]
    fn missing_directory_is_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = histograms_in_dir(&dir.path().join("nope")).expect_err("must fail");
        assert!(matches!(err, RippleError::Io { .. }));
    }
}
