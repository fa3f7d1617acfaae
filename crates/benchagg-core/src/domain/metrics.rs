//! Raw per-run measurements as submitted in a result file.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::measure::{Measure, UNKNOWN_LABEL};

/// Severity of differences observed between Run 1 and Run 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Value", into = "String")]
pub enum Reproducibility {
    /// No differences between runs.
    None,
    Minor,
    Major,
    #[default]
    Unknown,
}

impl From<Value> for Reproducibility {
    fn from(value: Value) -> Self {
        match value.as_str() {
            Some("None") => Self::None,
            Some("Minor") => Self::Minor,
            Some("Major") => Self::Major,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for Reproducibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::None => "None",
            Self::Minor => "Minor",
            Self::Major => "Major",
            Self::Unknown => UNKNOWN_LABEL,
        })
    }
}

impl From<Reproducibility> for String {
    fn from(value: Reproducibility) -> Self {
        value.to_string()
    }
}

/// Outcome of the determinism compliance check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Value", into = "String")]
pub enum Determinism {
    Pass,
    Fail,
    #[default]
    Unknown,
}

impl From<Value> for Determinism {
    fn from(value: Value) -> Self {
        match value.as_str() {
            Some("Pass") => Self::Pass,
            Some("Fail") => Self::Fail,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for Determinism {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Pass => "Pass",
            Self::Fail => "Fail",
            Self::Unknown => UNKNOWN_LABEL,
        })
    }
}

impl From<Determinism> for String {
    fn from(value: Determinism) -> Self {
        value.to_string()
    }
}

/// Measured quantities for one run.
///
/// Every field defaults to its unknown form, so a metric that was never
/// reported is indistinguishable from one reported as `"Unknown"`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricSet {
    /// Fraction of acceptance checks passed, 0.0–1.0.
    pub acceptance_passrate: Measure,
    pub reproducibility_rating: Reproducibility,
    pub determinism_compliance: Determinism,
    pub clarifications_count: Measure,
    pub interventions_count: Measure,
    pub reruns_count: Measure,
    /// Fraction of contract checks passed, 0.0–1.0.
    pub contract_completeness_passrate: Measure,
    /// Rating of the generated run instructions, 0–100.
    pub instructions_quality_rating: Measure,
    pub overreach_incidents_count: Measure,
    /// Time to first response, minutes.
    pub ttfr_minutes: Measure,
    /// Time to first completion, minutes.
    pub ttfc_minutes: Measure,
}
