//! Batch orchestration.
//!
//! [`aggregate`] is the pure engine: scored records in, one report per
//! cohort out. [`run_batch`] wraps it with the file-system collaborators
//! (loading result files, writing reports) and collects [`BatchStats`].
//!
//! Stage order is fixed: per-record scoring, spec filter, cohort partition,
//! per-cohort speed normalization, per-cohort report assembly. Speed needs
//! the complete cohort, so partitioning always precedes it.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cohort::{filter_spec, partition};
use crate::domain::{AggregateError, RunRecord};
use crate::loader::load_results;
use crate::obs::{
    emit_batch_finished, emit_batch_started, emit_cohort_normalized, emit_report_written,
    BatchSpan,
};
use crate::pairing::{assemble_report, ComparisonReport};
use crate::reporting::{write_comparison_json, write_comparison_md, ReportNames};
use crate::scoring::score_record;
use crate::speed::normalize_cohort;

/// Default directory scanned for submitted result files.
pub const DEFAULT_INPUT_DIR: &str = "results/submitted";
/// Default directory for compiled reports.
pub const DEFAULT_OUTPUT_DIR: &str = "results/compiled";

/// Settings for one aggregation batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Only aggregate records whose spec reference equals this exactly.
    pub spec_version: Option<String>,
    /// Also write a JSON artifact next to every markdown report.
    pub emit_json: bool,
}

impl Default for AggregateConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from(DEFAULT_INPUT_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            spec_version: None,
            emit_json: false,
        }
    }
}

/// Counters for a single batch.
///
/// A plain value owned by the batch; [`BatchStats::flush`] emits everything
/// as one `info!` event at the end.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchStats {
    pub files_seen: usize,
    pub files_rejected: usize,
    pub records_accepted: usize,
    pub records_filtered_out: usize,
    pub cohorts: usize,
    pub reports_written: usize,
    pub slot_conflicts: usize,
}

impl BatchStats {
    pub fn flush(&self) {
        tracing::info!(
            metric = "flush",
            files_seen = self.files_seen,
            files_rejected = self.files_rejected,
            records_accepted = self.records_accepted,
            records_filtered_out = self.records_filtered_out,
            cohorts = self.cohorts,
            reports_written = self.reports_written,
            slot_conflicts = self.slot_conflicts,
        );
    }
}

/// What a batch produced.
#[derive(Debug, Clone, Default)]
pub struct BatchSummary {
    pub stats: BatchStats,
    pub reports: Vec<ComparisonReport>,
    /// Every file written, markdown and JSON.
    pub written: Vec<PathBuf>,
}

/// Score, filter, partition, normalize and assemble one report per cohort.
pub fn aggregate(
    records: Vec<RunRecord>,
    spec_version: Option<&str>,
    generated_at: DateTime<Utc>,
) -> Vec<ComparisonReport> {
    let scored: Vec<RunRecord> = records.into_iter().map(score_record).collect();
    let filtered = filter_spec(scored, spec_version);

    partition(filtered)
        .into_iter()
        .map(normalize_cohort)
        .map(|cohort| {
            let with_speed = cohort
                .records
                .iter()
                .filter(|r| r.scores.speed.is_known())
                .count();
            emit_cohort_normalized(&cohort.key, cohort.len(), with_speed);
            assemble_report(&cohort, generated_at)
        })
        .collect()
}

/// Run a full batch: load, aggregate and write reports.
///
/// # Errors
///
/// Fails only on fatal conditions: missing input directory or an output
/// directory that cannot be created or written. Bad result files are
/// skipped and counted in [`BatchStats::files_rejected`].
pub fn run_batch(config: &AggregateConfig) -> Result<BatchSummary> {
    let started = Instant::now();
    let _span = BatchSpan::enter(&config.input_dir.display().to_string());

    let loaded = load_results(&config.input_dir)
        .with_context(|| format!("load results from {:?}", config.input_dir))?;
    emit_batch_started(
        &config.input_dir,
        loaded.files_seen,
        config.spec_version.as_deref(),
    );

    let mut stats = BatchStats {
        files_seen: loaded.files_seen,
        files_rejected: loaded.rejected.len(),
        records_accepted: loaded.records.len(),
        ..BatchStats::default()
    };

    let matching = filter_spec(loaded.records, config.spec_version.as_deref());
    stats.records_filtered_out = stats.records_accepted - matching.len();

    // filtered above
    let reports = aggregate(matching, None, Utc::now());
    stats.cohorts = reports.len();
    stats.slot_conflicts = reports.iter().map(|r| r.conflicts.len()).sum();

    if reports.is_empty() {
        tracing::warn!("no valid results to aggregate");
        stats.flush();
        emit_batch_finished(0, started.elapsed().as_millis() as u64);
        return Ok(BatchSummary {
            stats,
            ..BatchSummary::default()
        });
    }

    std::fs::create_dir_all(&config.output_dir).map_err(|source| {
        AggregateError::OutputUnwritable {
            path: config.output_dir.clone(),
            source,
        }
    })?;

    let mut names = ReportNames::new();
    let mut written = Vec::new();
    for report in &reports {
        let stem = names.claim(report)?;
        let path = write_comparison_md(&config.output_dir, &stem, report)?;
        emit_report_written(&report.report_id, &path);
        written.push(path);
        stats.reports_written += 1;

        if config.emit_json {
            written.push(write_comparison_json(&config.output_dir, &stem, report)?);
        }
    }

    stats.flush();
    emit_batch_finished(stats.reports_written, started.elapsed().as_millis() as u64);
    Ok(BatchSummary {
        stats,
        reports,
        written,
    })
}
