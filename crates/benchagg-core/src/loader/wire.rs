//! On-disk shape of a submitted result document.
//!
//! ```json
//! {
//!   "result_data": {
//!     "run_identity": { "tool_name": "...", "run_number": 1, ... },
//!     "metrics": { "acceptance": { "passrate": 0.9 }, "ttfr": { "minutes": 4 }, ... },
//!     "scores": { ... }
//!   }
//! }
//! ```
//!
//! Identity fields are optional here so that validation can report which
//! one is missing. The submitted `scores` block is not read; scores are
//! always recomputed.

use serde::Deserialize;

use crate::domain::{Determinism, Measure, MetricSet, Reproducibility};

#[derive(Debug, Clone, Deserialize)]
pub struct ResultDocument {
    pub result_data: ResultData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResultData {
    pub run_identity: RawRunIdentity,
    #[serde(default)]
    pub metrics: RawMetrics,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawRunIdentity {
    pub tool_name: Option<String>,
    pub tool_version: Option<String>,
    pub target_model: Option<String>,
    pub api_style: Option<String>,
    pub spec_reference: Option<String>,
    pub run_number: Option<i64>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct Passrate {
    pub passrate: Measure,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct Timing {
    pub minutes: Measure,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct RawMetrics {
    pub acceptance: Passrate,
    pub reproducibility_rating: Reproducibility,
    pub determinism_compliance: Determinism,
    pub clarifications_count: Measure,
    pub interventions_count: Measure,
    pub reruns_count: Measure,
    pub contract_completeness_passrate: Measure,
    pub instructions_quality_rating: Measure,
    pub overreach_incidents_count: Measure,
    pub ttfr: Timing,
    pub ttfc: Timing,
}

impl From<RawMetrics> for MetricSet {
    fn from(raw: RawMetrics) -> Self {
        MetricSet {
            acceptance_passrate: raw.acceptance.passrate,
            reproducibility_rating: raw.reproducibility_rating,
            determinism_compliance: raw.determinism_compliance,
            clarifications_count: raw.clarifications_count,
            interventions_count: raw.interventions_count,
            reruns_count: raw.reruns_count,
            contract_completeness_passrate: raw.contract_completeness_passrate,
            instructions_quality_rating: raw.instructions_quality_rating,
            overreach_incidents_count: raw.overreach_incidents_count,
            ttfr_minutes: raw.ttfr.minutes,
            ttfc_minutes: raw.ttfc.minutes,
        }
    }
}
