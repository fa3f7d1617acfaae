//! Cohort builder.
//!
//! Partitions scored records by (spec reference, target model, API style).
//! Cohorts come back ordered by key; records inside a cohort keep the order
//! they had in the input.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::{CohortKey, RunRecord};

/// Records that share a [`CohortKey`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cohort {
    pub key: CohortKey,
    pub records: Vec<RunRecord>,
}

impl Cohort {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Split `records` into cohorts. Every record lands in exactly one cohort.
pub fn partition(records: Vec<RunRecord>) -> Vec<Cohort> {
    let mut grouped: BTreeMap<CohortKey, Vec<RunRecord>> = BTreeMap::new();
    for record in records {
        grouped
            .entry(record.identity.cohort_key())
            .or_default()
            .push(record);
    }

    grouped
        .into_iter()
        .map(|(key, records)| Cohort { key, records })
        .collect()
}

/// Keep only records whose spec reference matches `spec_version` exactly.
pub fn filter_spec(records: Vec<RunRecord>, spec_version: Option<&str>) -> Vec<RunRecord> {
    match spec_version {
        Some(version) => records
            .into_iter()
            .filter(|r| r.identity.spec_reference == version)
            .collect(),
        None => records,
    }
}
