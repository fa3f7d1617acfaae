//! Domain models for the aggregator.
//!
//! Canonical definitions for the core entities:
//! - `Measure`: a number or the explicit Unknown sentinel
//! - `RunIdentity` / `CohortKey`: who ran what, and which runs compare
//! - `MetricSet`: raw measurements from a result file
//! - `ScoreSet`: standardized dimension scores
//! - `RunRecord`: identity + metrics + scores + provenance

pub mod error;
pub mod identity;
pub mod measure;
pub mod metrics;
pub mod record;
pub mod score;

pub use error::{AggregateError, LoadError, Result, ValidationError};
pub use identity::{CohortKey, RunIdentity, RunNumber};
pub use measure::{Measure, UNKNOWN_LABEL};
pub use metrics::{Determinism, MetricSet, Reproducibility};
pub use record::{RunRecord, SourceRef};
pub use score::ScoreSet;
