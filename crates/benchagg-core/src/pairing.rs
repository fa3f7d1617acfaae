//! Tool pairing and comparison report assembly.
//!
//! Within one cohort, records are grouped by tool identity (name + version)
//! into a [`ToolSlot`] holding at most one Run 1 and one Run 2. Each slot
//! becomes a [`ComparisonRow`] of the cohort's [`ComparisonReport`].
//!
//! A second record for an already-filled slot replaces the first. The
//! replacement is logged and kept in [`ComparisonReport::conflicts`] so the
//! rendered report shows it.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cohort::Cohort;
use crate::domain::{CohortKey, Measure, RunNumber, RunRecord, ScoreSet, SourceRef};
use crate::obs::emit_slot_conflict;

// ---------------------------------------------------------------------------
// Slots
// ---------------------------------------------------------------------------

/// Run 1 / Run 2 of a single tool identity within a cohort.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolSlot {
    pub run1: Option<RunRecord>,
    pub run2: Option<RunRecord>,
}

impl ToolSlot {
    /// Put `record` into the slot for its run number, returning the record
    /// it displaced, if any.
    pub fn place(&mut self, record: RunRecord) -> Option<RunRecord> {
        let slot = match record.identity.run_number {
            RunNumber::One => &mut self.run1,
            RunNumber::Two => &mut self.run2,
        };
        slot.replace(record)
    }

    /// The record whose identity represents the tool: Run 1, else Run 2.
    pub fn primary(&self) -> Option<&RunRecord> {
        self.run1.as_ref().or(self.run2.as_ref())
    }

    /// Scores shown for the tool: Run 1's where known, Run 2's elsewhere.
    pub fn display_scores(&self) -> ScoreSet {
        match (&self.run1, &self.run2) {
            (Some(r1), Some(r2)) => r1.scores.or_fallback(&r2.scores),
            (Some(r1), None) => r1.scores,
            (None, Some(r2)) => r2.scores,
            (None, None) => ScoreSet::default(),
        }
    }
}

/// A record that was overwritten by a later record for the same slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotConflict {
    pub tool: String,
    pub run_number: RunNumber,
    pub replaced: String,
    pub kept: String,
}

/// Group a cohort's records by tool identity.
pub fn pair_tools(records: &[RunRecord]) -> (BTreeMap<String, ToolSlot>, Vec<SlotConflict>) {
    let mut slots: BTreeMap<String, ToolSlot> = BTreeMap::new();
    let mut conflicts = Vec::new();

    for record in records {
        let tool = record.identity.tool_key();
        let run_number = record.identity.run_number;
        let kept = record.source.file_name.clone();

        if let Some(previous) = slots.entry(tool.clone()).or_default().place(record.clone()) {
            let conflict = SlotConflict {
                tool,
                run_number,
                replaced: previous.source.file_name,
                kept,
            };
            emit_slot_conflict(&conflict);
            conflicts.push(conflict);
        }
    }

    (slots, conflicts)
}

// ---------------------------------------------------------------------------
// Report model
// ---------------------------------------------------------------------------

/// A per-run table cell: absent slot, or the slot's value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunCell {
    NotAvailable,
    Value(Measure),
}

impl RunCell {
    fn of(record: Option<&RunRecord>, pick: impl Fn(&RunRecord) -> Measure) -> Self {
        record.map_or(Self::NotAvailable, |r| Self::Value(pick(r)))
    }
}

/// One cell per protocol run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunPair {
    pub run1: RunCell,
    pub run2: RunCell,
}

/// One table row per tool identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub tool: String,
    pub tool_name: String,
    pub tool_version: Option<String>,
    pub target_model: String,
    pub spec_reference: String,
    pub ttfr_minutes: RunPair,
    pub ttfc_minutes: RunPair,
    pub scores: ScoreSet,
}

/// Source files behind a tool's row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunDetail {
    pub tool: String,
    pub run1: Option<SourceRef>,
    pub run2: Option<SourceRef>,
}

/// Structured content of one cohort's comparison report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub report_id: String,
    pub cohort: CohortKey,
    pub generated_at: DateTime<Utc>,
    /// Tool identities, sorted.
    pub tools: Vec<String>,
    pub rows: Vec<ComparisonRow>,
    pub details: Vec<RunDetail>,
    pub conflicts: Vec<SlotConflict>,
}

/// Build the comparison report for a cohort whose speed scores are final.
pub fn assemble_report(cohort: &Cohort, generated_at: DateTime<Utc>) -> ComparisonReport {
    let (slots, conflicts) = pair_tools(&cohort.records);

    let mut rows = Vec::with_capacity(slots.len());
    let mut details = Vec::with_capacity(slots.len());
    for (tool, slot) in &slots {
        let Some(primary) = slot.primary() else {
            continue;
        };
        let id = &primary.identity;

        rows.push(ComparisonRow {
            tool: tool.clone(),
            tool_name: id.tool_name.clone(),
            tool_version: id.tool_version.clone(),
            target_model: id.target_model.clone(),
            spec_reference: id.spec_reference.clone(),
            ttfr_minutes: RunPair {
                run1: RunCell::of(slot.run1.as_ref(), |r| r.metrics.ttfr_minutes),
                run2: RunCell::of(slot.run2.as_ref(), |r| r.metrics.ttfr_minutes),
            },
            ttfc_minutes: RunPair {
                run1: RunCell::of(slot.run1.as_ref(), |r| r.metrics.ttfc_minutes),
                run2: RunCell::of(slot.run2.as_ref(), |r| r.metrics.ttfc_minutes),
            },
            scores: slot.display_scores(),
        });
        details.push(RunDetail {
            tool: tool.clone(),
            run1: slot.run1.as_ref().map(|r| r.source.clone()),
            run2: slot.run2.as_ref().map(|r| r.source.clone()),
        });
    }

    ComparisonReport {
        report_id: cohort.key.report_id(),
        cohort: cohort.key.clone(),
        generated_at,
        tools: slots.keys().cloned().collect(),
        rows,
        details,
        conflicts,
    }
}
