use thiserror::Error;

/// Errors surfaced to the caller of the metrics pipeline.
///
/// Scoring functions never produce these: a degenerate text pair scores the
/// 0.0 sentinel instead. Only configuration and table-shape problems end up
/// here, and they are the caller's to fix.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum MetricsError {
    #[error("weight vector must contain at least one n-gram weight")]
    EmptyWeights,

    #[error("weight {index} is {value}; weights must be finite and non-negative")]
    InvalidWeight { index: usize, value: f64 },

    #[error("could not parse weights from '{0}'")]
    UnparsableWeights(String),

    #[error("unknown metric '{0}'")]
    UnknownMetric(String),

    #[error("column '{0}' not found in table")]
    MissingColumn(String),

    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("invalid metrics configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("an unexpected I/O error occurred: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MetricsError>;
