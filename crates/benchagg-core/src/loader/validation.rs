//! Structural validation of result documents.
//!
//! Checks:
//! 1. `tool_name` and `run_number` are present; `run_number` is 1 or 2.
//! 2. The cohort key fields (`spec_reference`, `target_model`, `api_style`)
//!    are present and non-blank.
//! 3. Known numeric metrics are inside their documented ranges. Unknown
//!    metrics always pass; they are not an error.

use crate::domain::{Measure, MetricSet, RunIdentity, RunNumber, ValidationError};

use super::wire::{RawRunIdentity, ResultDocument};

const UNBOUNDED: f64 = f64::INFINITY;

/// Validate a parsed document and split it into identity and metrics.
///
/// # Errors
///
/// - `ValidationError::MissingField`: `tool_name` or `run_number` absent.
/// - `ValidationError::InvalidRunNumber`: `run_number` not 1 or 2.
/// - `ValidationError::MissingCohortKey`: a cohort key field is absent or blank.
/// - `ValidationError::OutOfRange`: a known metric is outside its range.
pub fn validate_document(
    doc: ResultDocument,
) -> Result<(RunIdentity, MetricSet), ValidationError> {
    let identity = validate_identity(doc.result_data.run_identity)?;
    let metrics = MetricSet::from(doc.result_data.metrics);
    validate_metrics(&metrics)?;
    Ok((identity, metrics))
}

fn validate_identity(raw: RawRunIdentity) -> Result<RunIdentity, ValidationError> {
    let tool_name = non_blank(raw.tool_name).ok_or(ValidationError::MissingField {
        field: "tool_name",
    })?;
    let run_number = raw.run_number.ok_or(ValidationError::MissingField {
        field: "run_number",
    })?;
    let run_number = RunNumber::try_from(run_number)?;

    let spec_reference = cohort_field("spec_reference", raw.spec_reference)?;
    let target_model = cohort_field("target_model", raw.target_model)?;
    let api_style = cohort_field("api_style", raw.api_style)?;

    Ok(RunIdentity {
        tool_name,
        tool_version: non_blank(raw.tool_version),
        target_model,
        api_style,
        spec_reference,
        run_number,
    })
}

fn validate_metrics(m: &MetricSet) -> Result<(), ValidationError> {
    let checks: [(&'static str, Measure, f64, f64); 9] = [
        ("acceptance.passrate", m.acceptance_passrate, 0.0, 1.0),
        ("contract_completeness_passrate", m.contract_completeness_passrate, 0.0, 1.0),
        ("instructions_quality_rating", m.instructions_quality_rating, 0.0, 100.0),
        ("clarifications_count", m.clarifications_count, 0.0, UNBOUNDED),
        ("interventions_count", m.interventions_count, 0.0, UNBOUNDED),
        ("reruns_count", m.reruns_count, 0.0, UNBOUNDED),
        ("overreach_incidents_count", m.overreach_incidents_count, 0.0, UNBOUNDED),
        ("ttfr.minutes", m.ttfr_minutes, 0.0, UNBOUNDED),
        ("ttfc.minutes", m.ttfc_minutes, 0.0, UNBOUNDED),
    ];

    for (field, measure, min, max) in checks {
        if let Some(value) = measure.known() {
            if value < min || value > max {
                return Err(ValidationError::OutOfRange {
                    field,
                    value,
                    min,
                    max,
                });
            }
        }
    }
    Ok(())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn cohort_field(field: &'static str, value: Option<String>) -> Result<String, ValidationError> {
    non_blank(value).ok_or(ValidationError::MissingCohortKey { field })
}
