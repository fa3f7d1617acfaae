//! Standardized dimension scores for one run.

use serde::{Deserialize, Serialize};

use super::measure::Measure;

/// The seven scoring dimensions plus the derived overall score.
///
/// Field names on the wire match the result-file `scores` block.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreSet {
    /// C, 0–100.
    #[serde(rename = "correctness_C")]
    pub correctness: Measure,
    /// R, 0–100.
    #[serde(rename = "reproducibility_R")]
    pub reproducibility: Measure,
    /// D, 0–100.
    #[serde(rename = "determinism_D")]
    pub determinism: Measure,
    /// E, 0–100.
    #[serde(rename = "effort_E")]
    pub effort: Measure,
    /// S, 0–100. Only assigned relative to a cohort.
    #[serde(rename = "speed_S")]
    pub speed: Measure,
    /// K, 0–100.
    #[serde(rename = "contract_docs_K")]
    pub contract_docs: Measure,
    /// P_O, 0–40. Subtracted from the overall score.
    #[serde(rename = "penalty_overreach_PO")]
    pub overreach_penalty: Measure,
    #[serde(rename = "overall_score")]
    pub overall: Measure,
}

impl ScoreSet {
    /// Dimensions averaged into `overall`, in C, R, D, E, S, K order.
    pub fn contributing(&self) -> [Measure; 6] {
        [
            self.correctness,
            self.reproducibility,
            self.determinism,
            self.effort,
            self.speed,
            self.contract_docs,
        ]
    }

    /// Field-by-field: keep `self` where known, take `fallback` elsewhere.
    pub fn or_fallback(&self, fallback: &ScoreSet) -> ScoreSet {
        ScoreSet {
            correctness: self.correctness.or(fallback.correctness),
            reproducibility: self.reproducibility.or(fallback.reproducibility),
            determinism: self.determinism.or(fallback.determinism),
            effort: self.effort.or(fallback.effort),
            speed: self.speed.or(fallback.speed),
            contract_docs: self.contract_docs.or(fallback.contract_docs),
            overreach_penalty: self.overreach_penalty.or(fallback.overreach_penalty),
            overall: self.overall.or(fallback.overall),
        }
    }

    pub fn is_all_unknown(&self) -> bool {
        self.contributing().iter().all(|m| !m.is_known())
            && !self.overreach_penalty.is_known()
            && !self.overall.is_known()
    }
}
