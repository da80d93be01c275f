use thiserror::Error;

/// Errors returned while loading, clustering or writing keyword data.
#[derive(Debug, Error)]
pub enum ClusterError {
    /// Threshold is not a number or falls outside `[0, 1]`.
    #[error("invalid similarity threshold {value:?}: {reason}")]
    InvalidThreshold { value: String, reason: &'static str },

    /// A requested column is not present in the input header.
    #[error("unknown column {name:?}, available columns: {available:?}")]
    UnknownColumn {
        name: String,
        available: Vec<String>,
    },

    /// Field separator must be a single byte.
    #[error(
        "invalid separator {0:?}: expected a single byte character, \
         multi-character and regex separators are not supported"
    )]
    InvalidSeparator(String),

    /// The input table could not be parsed.
    #[error("malformed input: {0}")]
    InputFormat(#[from] csv::Error),

    /// A row carries more fields than the header.
    #[error("malformed input: line {line} has {found} fields, header has {expected}")]
    RaggedRow {
        line: u64,
        found: usize,
        expected: usize,
    },

    /// A short row ends before the keyword column.
    #[error("malformed input: line {line} has no keyword field")]
    MissingKeyword { line: u64 },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("failed to write cluster summary: {0}")]
    Summary(#[from] serde_json::Error),
}

impl ClusterError {
    /// Configuration problems are detected before any row is processed.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            ClusterError::InvalidThreshold { .. }
                | ClusterError::UnknownColumn { .. }
                | ClusterError::InvalidSeparator(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, ClusterError>;
