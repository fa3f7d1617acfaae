//! Benchmark run aggregator core library.
//!
//! Scores submitted benchmark runs, normalizes speed within each cohort of
//! comparable runs, pairs Run 1 / Run 2 of every tool, and renders one
//! comparison report per cohort.

pub mod batch;
pub mod cohort;
pub mod domain;
pub mod loader;
pub mod obs;
pub mod pairing;
pub mod reporting;
pub mod scoring;
pub mod speed;
pub mod telemetry;

pub use domain::{
    AggregateError, CohortKey, Determinism, LoadError, Measure, MetricSet, Reproducibility,
    Result, RunIdentity, RunNumber, RunRecord, ScoreSet, SourceRef, ValidationError,
};

pub use batch::{aggregate, run_batch, AggregateConfig, BatchStats, BatchSummary};
pub use cohort::{filter_spec, partition, Cohort};
pub use loader::{load_result_file, load_results, parse_result, LoadOutcome};
pub use obs::{
    emit_batch_finished, emit_batch_started, emit_cohort_normalized, emit_file_rejected,
    emit_report_renamed, emit_report_written, emit_slot_conflict, BatchSpan,
};
pub use pairing::{
    assemble_report, pair_tools, ComparisonReport, ComparisonRow, RunCell, RunDetail, RunPair,
    SlotConflict, ToolSlot,
};
pub use reporting::{
    render_comparison_md, report_file_stem, write_comparison_json, write_comparison_md,
    ReportNames,
};
pub use scoring::{score_dimensions, score_record};
pub use speed::{min_max_scores, normalize_cohort};
pub use telemetry::init_tracing;

/// Aggregator version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
