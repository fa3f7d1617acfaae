//! Structured observability hooks for aggregation batches.
//!
//! This module provides:
//! - A batch-scoped tracing span via the `BatchSpan` RAII guard
//! - Emission functions for batch lifecycle events: start, rejected input,
//!   cohort normalization, slot conflicts, report output and renames, finish
//!
//! Rejections, conflicts and renames are emitted at `warn!`, everything else at
//! `info!`. Filtering follows `RUST_LOG`.

use std::path::Path;

use tracing::{info, warn};

use crate::domain::{CohortKey, LoadError};
use crate::pairing::SlotConflict;

/// RAII guard that enters a batch-scoped tracing span.
///
/// # Example
///
/// ```ignore
/// let _span = BatchSpan::enter("results/submitted");
/// // every event below carries input_dir = "results/submitted"
/// ```
pub struct BatchSpan {
    _span: tracing::span::EnteredSpan,
}

impl BatchSpan {
    pub fn enter(input_dir: &str) -> Self {
        let span = tracing::info_span!("benchagg.batch", input_dir = %input_dir);
        Self {
            _span: span.entered(),
        }
    }
}

/// Emit event: batch started over `files` candidate result files.
pub fn emit_batch_started(input_dir: &Path, files: usize, spec_filter: Option<&str>) {
    info!(
        event = "batch.started",
        input_dir = %input_dir.display(),
        files = files,
        spec_filter = spec_filter.unwrap_or("*"),
    );
}

/// Emit event: a result file was excluded from aggregation.
pub fn emit_file_rejected(error: &LoadError) {
    warn!(
        event = "file.rejected",
        path = %error.path().display(),
        error = %error,
    );
}

/// Emit event: speed normalization finished for a cohort.
pub fn emit_cohort_normalized(key: &CohortKey, records: usize, with_speed: usize) {
    info!(
        event = "cohort.normalized",
        cohort = %key,
        records = records,
        with_speed = with_speed,
    );
}

/// Emit event: a record replaced an earlier one for the same tool and run.
pub fn emit_slot_conflict(conflict: &SlotConflict) {
    warn!(
        event = "slot.conflict",
        tool = %conflict.tool,
        run_number = %conflict.run_number,
        replaced = %conflict.replaced,
        kept = %conflict.kept,
    );
}

/// Emit event: a comparison report was written.
pub fn emit_report_written(report_id: &str, path: &Path) {
    info!(event = "report.written", report_id = %report_id, path = %path.display());
}

/// Emit event: a report's file name clashed with an earlier report's and
/// was given a digest suffix.
pub fn emit_report_renamed(report_id: &str, clashed: &str, stem: &str) {
    warn!(
        event = "report.renamed",
        report_id = %report_id,
        clashed = %clashed,
        stem = %stem,
    );
}

/// Emit event: batch finished.
pub fn emit_batch_finished(reports: usize, duration_ms: u64) {
    info!(
        event = "batch.finished",
        reports = reports,
        duration_ms = duration_ms,
    );
}
