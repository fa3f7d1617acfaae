//! A loaded run together with its scores and provenance.

use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::identity::RunIdentity;
use super::metrics::MetricSet;
use super::score::ScoreSet;

/// Where a record came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRef {
    pub file_name: String,
    pub path: String,
    /// SHA256 hex digest of the raw file bytes.
    pub sha256: String,
}

impl SourceRef {
    pub fn from_file(path: &Path, bytes: &[u8]) -> Self {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            file_name,
            path: path.display().to_string(),
            sha256: hex::encode(Sha256::digest(bytes)),
        }
    }

    /// First 12 hex chars of the digest.
    pub fn short_digest(&self) -> &str {
        self.sha256.get(..12).unwrap_or(&self.sha256)
    }
}

/// One benchmark run as it moves through the scoring pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    pub identity: RunIdentity,
    pub metrics: MetricSet,
    pub scores: ScoreSet,
    pub source: SourceRef,
}

impl RunRecord {
    /// A record with every score still unknown.
    pub fn new(identity: RunIdentity, metrics: MetricSet, source: SourceRef) -> Self {
        Self {
            identity,
            metrics,
            scores: ScoreSet::default(),
            source,
        }
    }

    pub fn with_scores(self, scores: ScoreSet) -> Self {
        Self { scores, ..self }
    }
}
