//! Experiment statistics: one summary record per network.
//!
//! # Input
//!
//! A results file is a headered CSV with the fixed schema in [`COLUMNS`].
//! Columns are looked up by exact name, so their order in the file does
//! not matter, but every one of them must be present.
//!
//! # Aggregation
//!
//! [`aggregate_statistics`] is a fold over the rows:
//!
//! 1. seed one zero-valued [`Statistics`] per known network;
//! 2. for each row, either skip it (network not known) or parse it and
//!    replace that network's record (a parse failure aborts the file);
//! 3. return the records in known-network order.
//!
//! Metric triples are stored in named fields. The file order of a triple
//! is Min, Max, Avg; reports print min, avg, max. Both orders are mapped
//! explicitly, never by position.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Serialize;
use tracing::{debug, instrument};

use ripple_core::{Result, RippleError};

/// Values below this (and not zero) are printed as [`BELOW_EPSILON`].
pub const EPSILON: f64 = 1e-5;

/// LaTeX marker printed for tiny non-zero values.
pub const BELOW_EPSILON: &str = r"$< \epsilon$";

/// Required columns of a results file, in the order the simulator writes them.
pub const COLUMNS: [&str; 24] = [
    "Network",
    "N",
    "InitialProp",
    "InfluenceProp",
    "InfluenceTargetProp",
    "Rounds",
    "MinDegreeIni",
    "MaxDegreeIni",
    "AvgDegreeIni",
    "MinPageIni",
    "MaxPageIni",
    "AvgPageIni",
    "MinBtwIni",
    "MaxBtwIni",
    "AvgBtwIni",
    "MinDegreeTar",
    "MaxDegreeTar",
    "AvgDegreeTar",
    "MinPageTar",
    "MaxPageTar",
    "AvgPageTar",
    "MinBtwTar",
    "MaxBtwTar",
    "AvgBtwTar",
];

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// Min, average, and max of one metric over a node set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct MetricTriple {
    pub min: f64,
    pub avg: f64,
    pub max: f64,
}

/// Summary of one network's row in a results file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statistics {
    /// Result key, as written in the `Network` column.
    pub network: String,
    pub n: u64,
    /// Proportion of nodes in the initial set.
    pub initial_prop: f64,
    /// Proportion of nodes influenced at the end.
    pub influence_prop: f64,
    /// Proportion of target nodes influenced.
    pub target_prop: f64,
    pub rounds: f64,
    pub degree_initial: MetricTriple,
    pub pagerank_initial: MetricTriple,
    pub betweenness_initial: MetricTriple,
    pub degree_influence: MetricTriple,
    pub pagerank_influence: MetricTriple,
    pub betweenness_influence: MetricTriple,
}

impl Statistics {
    /// Zero-valued record for a network with no row.
    #[must_use]
    pub fn empty(network: &str) -> Self {
        Self {
            network: network.to_string(),
            n: 0,
            initial_prop: 0.0,
            influence_prop: 0.0,
            target_prop: 0.0,
            rounds: 0.0,
            degree_initial: MetricTriple::default(),
            pagerank_initial: MetricTriple::default(),
            betweenness_initial: MetricTriple::default(),
            degree_influence: MetricTriple::default(),
            pagerank_influence: MetricTriple::default(),
            betweenness_influence: MetricTriple::default(),
        }
    }

    /// Network name for reports: underscores become spaces.
    #[must_use]
    pub fn display_name(&self) -> String {
        self.network.replace('_', " ")
    }

    /// Whether this record is still the zero default.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::empty(&self.network)
    }
}

/// Aggregated records in known-network order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct NetworkStatistics {
    records: Vec<Statistics>,
}

impl NetworkStatistics {
    /// One zero record per known network. Repeated names keep their first
    /// position.
    #[must_use]
    pub fn seeded(known: &[&str]) -> Self {
        let mut records: Vec<Statistics> = Vec::with_capacity(known.len());
        for name in known {
            if !records.iter().any(|s| s.network == *name) {
                records.push(Statistics::empty(name));
            }
        }
        Self { records }
    }

    #[must_use]
    pub fn get(&self, network: &str) -> Option<&Statistics> {
        self.records.iter().find(|s| s.network == network)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Statistics> {
        self.records.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn knows(&self, network: &str) -> bool {
        self.get(network).is_some()
    }

    /// Replace the record of `record.network`. The network must be known.
    pub(crate) fn with_record(mut self, record: Statistics) -> Self {
        if let Some(slot) = self.records.iter_mut().find(|s| s.network == record.network) {
            *slot = record;
        }
        self
    }
}

impl<'a> IntoIterator for &'a NetworkStatistics {
    type Item = &'a Statistics;
    type IntoIter = std::slice::Iter<'a, Statistics>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

// ---------------------------------------------------------------------------
// Schema
// ---------------------------------------------------------------------------

/// A required column and its position in one file.
#[derive(Debug, Clone, Copy)]
struct Column {
    name: &'static str,
    index: usize,
}

/// Column positions of one results file.
struct Schema {
    columns: [Column; 24],
}

impl Schema {
    fn from_headers(headers: &csv::StringRecord, source: &Path) -> Result<Self> {
        let mut columns = [Column { name: "", index: 0 }; 24];
        for (slot, name) in columns.iter_mut().zip(COLUMNS) {
            let index = headers.iter().position(|h| h == name).ok_or_else(|| {
                RippleError::SchemaMismatch {
                    path: source.to_path_buf(),
                    column: name.to_string(),
                }
            })?;
            *slot = Column { name, index };
        }
        Ok(Self { columns })
    }

    fn network<'r>(&self, record: &'r csv::StringRecord) -> Option<&'r str> {
        record.get(self.columns[0].index)
    }
}

/// Parses the fields of one known row, failing on the first bad field.
struct RowParser<'a> {
    record: &'a csv::StringRecord,
    schema: &'a Schema,
    source: &'a Path,
}

impl RowParser<'_> {
    fn line(&self) -> usize {
        self.record
            .position()
            .map_or(0, |p| usize::try_from(p.line()).unwrap_or(usize::MAX))
    }

    fn malformed(&self, reason: String) -> RippleError {
        RippleError::MalformedRow {
            path: self.source.to_path_buf(),
            line: self.line(),
            reason,
        }
    }

    fn field(&self, col: usize) -> Result<(&'static str, &str)> {
        let Column { name, index } = self.schema.columns[col];
        self.record
            .get(index)
            .map(|raw| (name, raw))
            .ok_or_else(|| self.malformed(format!("missing field `{name}`")))
    }

    fn float(&self, col: usize) -> Result<f64> {
        let (name, raw) = self.field(col)?;
        raw.parse::<f64>()
            .map_err(|e| self.malformed(format!("{name} `{raw}`: {e}")))
    }

    fn count(&self, col: usize) -> Result<u64> {
        let (name, raw) = self.field(col)?;
        raw.parse::<u64>()
            .map_err(|e| self.malformed(format!("{name} `{raw}`: {e}")))
    }

    /// Triple whose Min, Max, Avg columns start at `first`.
    fn triple(&self, first: usize) -> Result<MetricTriple> {
        Ok(MetricTriple {
            min: self.float(first)?,
            max: self.float(first + 1)?,
            avg: self.float(first + 2)?,
        })
    }

    fn parse(&self, network: &str) -> Result<Statistics> {
        Ok(Statistics {
            network: network.to_string(),
            n: self.count(1)?,
            initial_prop: self.float(2)?,
            influence_prop: self.float(3)?,
            target_prop: self.float(4)?,
            rounds: self.float(5)?,
            degree_initial: self.triple(6)?,
            pagerank_initial: self.triple(9)?,
            betweenness_initial: self.triple(12)?,
            degree_influence: self.triple(15)?,
            pagerank_influence: self.triple(18)?,
            betweenness_influence: self.triple(21)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Aggregate the results file at `path` over `known` result keys.
///
/// # Errors
///
/// Returns [`RippleError::SchemaMismatch`] if a required column is
/// missing, [`RippleError::MalformedRow`] if a known network's row has an
/// unparseable field, and [`RippleError::Io`]/[`RippleError::Csv`] on
/// read failure.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn aggregate_statistics(path: &Path, known: &[&str]) -> Result<NetworkStatistics> {
    let file = File::open(path).map_err(|e| RippleError::io(path, e))?;
    read_statistics(file, path, known)
}

/// Aggregate results rows read from `reader`. `source` only labels errors.
///
/// # Errors
///
/// Same as [`aggregate_statistics`].
pub fn read_statistics<R: Read>(
    reader: R,
    source: &Path,
    known: &[&str],
) -> Result<NetworkStatistics> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers().map_err(|e| RippleError::csv(source, e))?.clone();
    let schema = Schema::from_headers(&headers, source)?;

    let mut acc = NetworkStatistics::seeded(known);
    for record in rdr.records() {
        let record = record.map_err(|e| RippleError::csv(source, e))?;
        let network = schema.network(&record).unwrap_or_default();

        // Lenient branch: rows of unknown networks are skipped unparsed.
        if !acc.knows(network) {
            debug!(network, "skipping unknown network");
            continue;
        }

        // Fatal branch: a known network's row must parse completely.
        let parser = RowParser {
            record: &record,
            schema: &schema,
            source,
        };
        acc = acc.with_record(parser.parse(network)?);
    }

    debug!(networks = acc.len(), "aggregated statistics");
    Ok(acc)
}

// ---------------------------------------------------------------------------
// Formatting
// ---------------------------------------------------------------------------

/// Render a number for a report cell.
///
/// Non-zero values below [`EPSILON`] become [`BELOW_EPSILON`]; everything
/// else is printed with four decimals.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn format_value(value: f64) -> String {
    if value != 0.0 && value < EPSILON {
        return BELOW_EPSILON.to_string();
    }
    format!("{value:.4}")
}
