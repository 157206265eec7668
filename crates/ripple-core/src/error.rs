use std::fmt;
use std::io;
use std::path::PathBuf;

/// Machine-readable error codes for scripted batch runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    MalformedInput,
    MalformedRow,
    SchemaMismatch,
    EmptyFile,
    FileUnreadable,
    EmptyGraph,
    UnknownNetwork,
    InvalidRegistry,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::MalformedInput => "E1001",
            Self::MalformedRow => "E1002",
            Self::SchemaMismatch => "E1003",
            Self::EmptyFile => "E1004",
            Self::FileUnreadable => "E1005",
            Self::EmptyGraph => "E2001",
            Self::UnknownNetwork => "E3001",
            Self::InvalidRegistry => "E3002",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::MalformedInput => "Malformed edge-list line",
            Self::MalformedRow => "Malformed data row",
            Self::SchemaMismatch => "Required column missing",
            Self::EmptyFile => "File has no data rows",
            Self::FileUnreadable => "File could not be read",
            Self::EmptyGraph => "Graph has no nodes",
            Self::UnknownNetwork => "Network not registered",
            Self::InvalidRegistry => "Network registry is inconsistent",
        }
    }

    /// Optional remediation hint.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::MalformedInput => {
                Some("Each non-blank line must start with two non-negative integers.")
            }
            Self::MalformedRow => Some("Check the numeric fields of the reported line."),
            Self::SchemaMismatch => {
                Some("Regenerate the results file with the simulator's full header.")
            }
            Self::EmptyFile => Some("Re-run the experiment that produces this file."),
            Self::FileUnreadable => Some("Check the path and read permissions."),
            Self::EmptyGraph => None,
            Self::UnknownNetwork => Some("Use one of the registered network files or names."),
            Self::InvalidRegistry => Some("Report a bug: the built-in registry failed validation."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Errors produced by the loading, computation, and aggregation pipeline.
///
/// Every variant is fatal to the file or network being processed. Batch
/// drivers decide whether to isolate failures per network.
#[derive(Debug, thiserror::Error)]
pub enum RippleError {
    /// A non-blank edge-list line did not hold two integer node ids.
    #[error("{}:{line}: malformed edge: {reason}", .path.display())]
    MalformedInput {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    /// A data row matched by the reader held an unparseable field.
    #[error("{}:{line}: malformed row: {reason}", .path.display())]
    MalformedRow {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    /// A column required by the fixed results schema is absent.
    #[error("{}: missing required column `{column}`", .path.display())]
    SchemaMismatch { path: PathBuf, column: String },

    /// A file that must contain data rows contained none.
    #[error("{}: no data rows", .path.display())]
    EmptyFile { path: PathBuf },

    /// Centrality was requested on a graph without nodes.
    #[error("cannot compute {metric} on a graph with zero nodes")]
    EmptyGraph { metric: &'static str },

    /// A file name or result key does not belong to the registry.
    #[error("unknown network `{0}`")]
    UnknownNetwork(String),

    /// The built-in registry violated one of its invariants.
    #[error("invalid network registry: {0}")]
    InvalidRegistry(String),

    /// I/O failure while opening or reading a file.
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// CSV framing failure (bad quoting, inconsistent row length, I/O).
    #[error("{}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

impl RippleError {
    /// The stable code for this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::MalformedInput { .. } => ErrorCode::MalformedInput,
            Self::MalformedRow { .. } => ErrorCode::MalformedRow,
            Self::SchemaMismatch { .. } => ErrorCode::SchemaMismatch,
            Self::EmptyFile { .. } => ErrorCode::EmptyFile,
            Self::EmptyGraph { .. } => ErrorCode::EmptyGraph,
            Self::UnknownNetwork(_) => ErrorCode::UnknownNetwork,
            Self::InvalidRegistry(_) => ErrorCode::InvalidRegistry,
            Self::Io { .. } | Self::Csv { .. } => ErrorCode::FileUnreadable,
        }
    }

    /// Wrap an I/O error with the path it occurred on.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Wrap a CSV error with the path it occurred on.
    pub fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        Self::Csv {
            path: path.into(),
            source,
        }
    }
}

/// Result alias for the library crates.
pub type Result<T, E = RippleError> = std::result::Result<T, E>;
