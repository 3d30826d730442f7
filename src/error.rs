use thiserror::Error;

/// Errors returned by score parsing, clustering and representative selection.
#[derive(Debug, Error)]
pub enum Error {
    /// A comparison report line could not be turned into a score triple.
    #[error("malformed comparison at line {line}: {reason} ({content:?})")]
    Parse {
        /// 1-based line number in the report.
        line: usize,
        /// The offending line, verbatim.
        content: String,
        /// Human-readable explanation.
        reason: &'static str,
    },

    /// An item identifier does not carry a sequence number.
    #[error("no sequence number in item {item:?}")]
    Selection {
        /// The item whose identifier could not be read.
        item: String,
    },

    /// A representative was requested for a cluster with no members.
    #[error("empty cluster")]
    EmptyCluster,

    /// Invalid parameter value.
    #[error("invalid parameter {name}: {message}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Human-readable explanation.
        message: &'static str,
    },

    /// Reading the report failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, Error>;
