//! Domain-level error taxonomy for the aggregator.

use std::path::{Path, PathBuf};

/// Errors produced by structural validation of a result document.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("missing cohort key field: {field}")]
    MissingCohortKey { field: &'static str },

    #[error("run_number must be 1 or 2, got {0}")]
    InvalidRunNumber(i64),

    #[error("{field} out of range: {value} not in [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

impl ValidationError {
    /// Whether the document was well formed but could not be assigned to a cohort.
    pub fn is_missing_cohort_key(&self) -> bool {
        matches!(self, Self::MissingCohortKey { .. })
    }
}

/// Per-file load failures. None of these abort a batch.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("result document has the wrong shape in {path}: {source}")]
    Schema {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("schema validation failed for {path}: {source}")]
    Validation {
        path: PathBuf,
        #[source]
        source: ValidationError,
    },
}

impl LoadError {
    pub fn path(&self) -> &Path {
        match self {
            Self::Io { path, .. }
            | Self::Json { path, .. }
            | Self::Schema { path, .. }
            | Self::Validation { path, .. } => path,
        }
    }
}

/// Fatal aggregation errors.
#[derive(Debug, thiserror::Error)]
pub enum AggregateError {
    #[error("input directory does not exist: {0}")]
    InputDirMissing(PathBuf),

    #[error("output directory is not writable: {path}: {source}")]
    OutputUnwritable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for aggregator domain operations.
pub type Result<T> = std::result::Result<T, AggregateError>;
