//! Record loader.
//!
//! Reads every `*.json` file directly inside an input directory, validates
//! it, and turns it into an unscored [`RunRecord`]. A file that cannot be
//! read, parsed or validated is reported as a [`LoadError`] and skipped; it
//! never aborts the batch. Only a missing or unreadable input directory is
//! fatal.

pub mod validation;
pub mod wire;

use std::path::{Path, PathBuf};

use serde_json::error::Category;

use crate::domain::{AggregateError, LoadError, Result, RunRecord, SourceRef};
use crate::obs::emit_file_rejected;

pub use validation::validate_document;
pub use wire::ResultDocument;

/// Everything read from an input directory.
#[derive(Debug, Default)]
pub struct LoadOutcome {
    pub files_seen: usize,
    pub records: Vec<RunRecord>,
    pub rejected: Vec<LoadError>,
}

/// Result files in `dir`, sorted by file name.
pub fn list_result_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(AggregateError::InputDirMissing(dir.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Parse and validate the raw bytes of one result file.
pub fn parse_result(path: &Path, bytes: &[u8]) -> std::result::Result<RunRecord, LoadError> {
    let doc: ResultDocument = serde_json::from_slice(bytes).map_err(|source| {
        let path = path.to_path_buf();
        match source.classify() {
            Category::Data => LoadError::Schema { path, source },
            Category::Io | Category::Syntax | Category::Eof => LoadError::Json { path, source },
        }
    })?;
    let (identity, metrics) = validate_document(doc).map_err(|source| LoadError::Validation {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(RunRecord::new(
        identity,
        metrics,
        SourceRef::from_file(path, bytes),
    ))
}

/// Read, parse and validate one result file.
pub fn load_result_file(path: &Path) -> std::result::Result<RunRecord, LoadError> {
    let bytes = std::fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_result(path, &bytes)
}

/// Load every result file in `dir`.
pub fn load_results(dir: &Path) -> Result<LoadOutcome> {
    let files = list_result_files(dir)?;
    let mut outcome = LoadOutcome {
        files_seen: files.len(),
        ..LoadOutcome::default()
    };

    for path in &files {
        match load_result_file(path) {
            Ok(record) => outcome.records.push(record),
            Err(err) => {
                emit_file_rejected(&err);
                outcome.rejected.push(err);
            }
        }
    }

    tracing::debug!(
        files = outcome.files_seen,
        accepted = outcome.records.len(),
        rejected = outcome.rejected.len(),
        "results loaded"
    );
    Ok(outcome)
}
