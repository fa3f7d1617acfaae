//! Cohort-relative speed normalizer.
//!
//! Timing has no fixed scale across spec/model/tool combinations, so the
//! speed dimension is scored against the other runs in the same cohort:
//! the fastest run scores 100, the slowest 0, linear in between. This is the
//! only score that cannot be computed on a record in isolation, and it can
//! only run once the whole cohort is known.

use crate::cohort::Cohort;
use crate::domain::{Measure, RunRecord};
use crate::scoring::{overall, round1};

/// Weight of time-to-first-response in the speed score.
pub const TTFR_WEIGHT: f64 = 0.4;
/// Weight of time-to-first-completion in the speed score.
pub const TTFC_WEIGHT: f64 = 0.6;

/// Min-max normalize a timing series, lower time scoring higher.
///
/// Returns one entry per input. Unknown inputs get `None`; if fewer than two
/// inputs are known, every entry is `None`. A series where all known values
/// tie scores 100 across the board.
pub fn min_max_scores(values: &[Measure]) -> Vec<Option<f64>> {
    let known: Vec<f64> = values.iter().filter_map(|m| m.known()).collect();
    if known.len() < 2 {
        return vec![None; values.len()];
    }

    let min = known.iter().copied().fold(f64::INFINITY, f64::min);
    let max = known.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    values
        .iter()
        .map(|m| {
            m.known().map(|v| {
                if max > min {
                    round1(100.0 * (1.0 - (v - min) / (max - min)))
                } else {
                    100.0
                }
            })
        })
        .collect()
}

/// Weighted speed score from the two normalized timings.
pub fn combine(ttfr_score: f64, ttfc_score: f64) -> f64 {
    round1(TTFR_WEIGHT * ttfr_score + TTFC_WEIGHT * ttfc_score)
}

/// Assign `speed` to every record in the cohort that has both normalized
/// timings, then recompute `overall` for all of them.
pub fn normalize_cohort(cohort: Cohort) -> Cohort {
    let ttfr: Vec<Measure> = cohort.records.iter().map(|r| r.metrics.ttfr_minutes).collect();
    let ttfc: Vec<Measure> = cohort.records.iter().map(|r| r.metrics.ttfc_minutes).collect();
    let ttfr_scores = min_max_scores(&ttfr);
    let ttfc_scores = min_max_scores(&ttfc);

    let records: Vec<RunRecord> = cohort
        .records
        .into_iter()
        .zip(ttfr_scores.into_iter().zip(ttfc_scores))
        .map(|(record, (r, c))| {
            let mut scores = record.scores;
            scores.speed = match (r, c) {
                (Some(r), Some(c)) => Measure::from_f64(combine(r, c)),
                _ => Measure::Unknown,
            };
            scores.overall = overall(&scores);
            record.with_scores(scores)
        })
        .collect();

    tracing::debug!(
        cohort = %cohort.key,
        records = records.len(),
        with_speed = records.iter().filter(|r| r.scores.speed.is_known()).count(),
        "speed normalized"
    );

    Cohort {
        key: cohort.key,
        records,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn known(values: &[f64]) -> Vec<Measure> {
        values.iter().copied().map(Measure::Known).collect()
    }

    #[test]
    fn linear_best_to_worst() {
        let scores = min_max_scores(&known(&[10.0, 20.0, 30.0]));
        assert_eq!(scores, vec![Some(100.0), Some(50.0), Some(0.0)]);
    }

    #[test]
    fn all_tied_score_hundred() {
        let scores = min_max_scores(&known(&[15.0, 15.0, 15.0]));
        assert_eq!(scores, vec![Some(100.0); 3]);
    }

    #[test]
    fn single_value_has_no_peers() {
        assert_eq!(min_max_scores(&known(&[12.0])), vec![None]);
    }

    #[test]
    fn unknown_entries_are_skipped() {
        let values = vec![Measure::Known(5.0), Measure::Unknown, Measure::Known(15.0)];
        assert_eq!(
            min_max_scores(&values),
            vec![Some(100.0), None, Some(0.0)]
        );
    }

    #[test]
    fn one_known_among_unknowns_has_no_peers() {
        let values = vec![Measure::Unknown, Measure::Known(7.0), Measure::Unknown];
        assert_eq!(min_max_scores(&values), vec![None, None, None]);
    }

    #[test]
    fn normalized_values_are_rounded() {
        let scores = min_max_scores(&known(&[0.0, 1.0, 3.0]));
        assert_eq!(scores, vec![Some(100.0), Some(66.7), Some(0.0)]);
    }

    #[test]
    fn combine_weights_ttfr_and_ttfc() {
        assert!((combine(80.0, 60.0) - 68.0).abs() < 1e-9);
        assert_eq!(combine(100.0, 100.0), 100.0);
        assert_eq!(combine(0.0, 0.0), 0.0);
    }
}
