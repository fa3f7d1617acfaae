//! Dimension score calculator.
//!
//! Turns one run's [`MetricSet`] into a [`ScoreSet`]. Every function here is
//! pure and looks at a single record only; the speed dimension needs the
//! whole cohort and is filled in later by [`crate::speed`], which then calls
//! [`overall`] again.

use crate::domain::{Determinism, Measure, MetricSet, Reproducibility, RunRecord, ScoreSet};

/// Minimum number of known dimensions among C, R, D, E, S, K for `overall`.
pub const MIN_KNOWN_DIMENSIONS: usize = 4;

/// Upper bound of the overreach penalty.
pub const OVERREACH_PENALTY_CAP: f64 = 40.0;

const CLARIFICATION_COST: f64 = 3.0;
const INTERVENTION_COST: f64 = 10.0;
const RERUN_COST: f64 = 5.0;
const OVERREACH_COST: f64 = 8.0;

const CONTRACT_WEIGHT: f64 = 0.7;
const INSTRUCTIONS_WEIGHT: f64 = 0.3;

/// Round to one decimal place, half away from zero.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

// ---------------------------------------------------------------------------
// Per-dimension rules
// ---------------------------------------------------------------------------

/// C: acceptance passrate as a percentage.
pub fn correctness(passrate: Measure) -> Measure {
    passrate.map(|p| round1(100.0 * p))
}

/// R: fixed mapping of the reproducibility rating.
pub fn reproducibility(rating: Reproducibility) -> Measure {
    match rating {
        Reproducibility::None => Measure::Known(100.0),
        Reproducibility::Minor => Measure::Known(80.0),
        Reproducibility::Major => Measure::Known(40.0),
        Reproducibility::Unknown => Measure::Unknown,
    }
}

/// D: pass/fail of the determinism check.
pub fn determinism(compliance: Determinism) -> Measure {
    match compliance {
        Determinism::Pass => Measure::Known(100.0),
        Determinism::Fail => Measure::Known(0.0),
        Determinism::Unknown => Measure::Unknown,
    }
}

/// E: 100 minus weighted operator effort, floored at 0.
///
/// Unknown counts are skipped rather than counted as zero. When none of the
/// three counts is known the score is Unknown.
pub fn effort(clarifications: Measure, interventions: Measure, reruns: Measure) -> Measure {
    let deductions = [
        (clarifications, CLARIFICATION_COST),
        (interventions, INTERVENTION_COST),
        (reruns, RERUN_COST),
    ];

    let known: Vec<f64> = deductions
        .iter()
        .filter_map(|(count, cost)| count.known().map(|c| c * cost))
        .collect();
    if known.is_empty() {
        return Measure::Unknown;
    }

    let score = 100.0 - known.iter().sum::<f64>();
    Measure::from_f64(round1(score).clamp(0.0, 100.0))
}

/// K: blend of contract completeness and instructions quality.
pub fn contract_docs(contract_passrate: Measure, instructions_quality: Measure) -> Measure {
    contract_passrate.zip_with(instructions_quality, |passrate, quality| {
        round1(CONTRACT_WEIGHT * (100.0 * passrate) + INSTRUCTIONS_WEIGHT * quality)
    })
}

/// P_O: 8 points per overreach incident, capped at 40.
pub fn overreach_penalty(incidents: Measure) -> Measure {
    incidents.map(|n| round1(OVERREACH_COST * n).clamp(0.0, OVERREACH_PENALTY_CAP))
}

/// Mean of the known contributing dimensions minus the overreach penalty.
///
/// Needs at least [`MIN_KNOWN_DIMENSIONS`] known values among C, R, D, E, S,
/// K. An unknown penalty subtracts nothing. The penalty is never averaged in.
pub fn overall(scores: &ScoreSet) -> Measure {
    let known: Vec<f64> = scores
        .contributing()
        .iter()
        .filter_map(|m| m.known())
        .collect();
    if known.len() < MIN_KNOWN_DIMENSIONS {
        return Measure::Unknown;
    }

    let mean = known.iter().sum::<f64>() / known.len() as f64;
    let penalty = scores.overreach_penalty.known().unwrap_or(0.0);
    Measure::from_f64(round1(mean - penalty).clamp(0.0, 100.0))
}

// ---------------------------------------------------------------------------
// Record-level entry points
// ---------------------------------------------------------------------------

/// Compute every dimension that does not need cohort context.
///
/// `speed` is left Unknown; `overall` reflects the five other dimensions and
/// is recomputed once speed is known.
pub fn score_dimensions(metrics: &MetricSet) -> ScoreSet {
    let mut scores = ScoreSet {
        correctness: correctness(metrics.acceptance_passrate),
        reproducibility: reproducibility(metrics.reproducibility_rating),
        determinism: determinism(metrics.determinism_compliance),
        effort: effort(
            metrics.clarifications_count,
            metrics.interventions_count,
            metrics.reruns_count,
        ),
        speed: Measure::Unknown,
        contract_docs: contract_docs(
            metrics.contract_completeness_passrate,
            metrics.instructions_quality_rating,
        ),
        overreach_penalty: overreach_penalty(metrics.overreach_incidents_count),
        overall: Measure::Unknown,
    };
    scores.overall = overall(&scores);
    scores
}

/// Attach per-record scores, replacing whatever the record carried.
pub fn score_record(record: RunRecord) -> RunRecord {
    let scores = score_dimensions(&record.metrics);
    record.with_scores(scores)
}
