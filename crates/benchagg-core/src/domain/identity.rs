//! Run identity and the cohort key derived from it.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::ValidationError;

/// Which of the two protocol runs a record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum RunNumber {
    One,
    Two,
}

impl TryFrom<i64> for RunNumber {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            other => Err(ValidationError::InvalidRunNumber(other)),
        }
    }
}

impl From<RunNumber> for i64 {
    fn from(value: RunNumber) -> Self {
        match value {
            RunNumber::One => 1,
            RunNumber::Two => 2,
        }
    }
}

impl fmt::Display for RunNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", i64::from(*self))
    }
}

/// Identifies one benchmark run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunIdentity {
    pub tool_name: String,
    pub tool_version: Option<String>,
    pub target_model: String,
    pub api_style: String,
    pub spec_reference: String,
    pub run_number: RunNumber,
}

impl RunIdentity {
    /// Tool name plus version, used to pair Run 1 with Run 2.
    pub fn tool_key(&self) -> String {
        format!(
            "{} {}",
            self.tool_name,
            self.tool_version.as_deref().unwrap_or_default()
        )
        .trim()
        .to_string()
    }

    pub fn cohort_key(&self) -> CohortKey {
        CohortKey {
            spec_reference: self.spec_reference.clone(),
            target_model: self.target_model.clone(),
            api_style: self.api_style.clone(),
        }
    }
}

/// Runs sharing a key are timed against each other.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CohortKey {
    pub spec_reference: String,
    pub target_model: String,
    pub api_style: String,
}

impl CohortKey {
    /// Deterministic report identifier for this cohort.
    pub fn report_id(&self) -> String {
        format!(
            "{}-Model{}-{}-Comparison",
            self.spec_reference, self.target_model, self.api_style
        )
    }
}

impl fmt::Display for CohortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}",
            self.spec_reference, self.target_model, self.api_style
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(version: Option<&str>) -> RunIdentity {
        RunIdentity {
            tool_name: "Cursor".to_string(),
            tool_version: version.map(str::to_string),
            target_model: "A".to_string(),
            api_style: "REST".to_string(),
            spec_reference: "v1.0.0".to_string(),
            run_number: RunNumber::One,
        }
    }

    #[test]
    fn tool_key_includes_version() {
        assert_eq!(identity(Some("0.42")).tool_key(), "Cursor 0.42");
    }

    #[test]
    fn tool_key_without_version_is_trimmed() {
        assert_eq!(identity(None).tool_key(), "Cursor");
        assert_eq!(identity(Some("")).tool_key(), "Cursor");
    }

    #[test]
    fn report_id_from_cohort_key() {
        let key = identity(None).cohort_key();
        assert_eq!(key.report_id(), "v1.0.0-ModelA-REST-Comparison");
    }

    #[test]
    fn run_number_accepts_only_one_and_two() {
        assert_eq!(RunNumber::try_from(1).unwrap(), RunNumber::One);
        assert_eq!(RunNumber::try_from(2).unwrap(), RunNumber::Two);
        assert!(matches!(
            RunNumber::try_from(3),
            Err(ValidationError::InvalidRunNumber(3))
        ));
    }

    #[test]
    fn run_number_serde_as_integer() {
        let json = serde_json::to_string(&RunNumber::Two).expect("serialize");
        assert_eq!(json, "2");
        let back: RunNumber = serde_json::from_str("1").expect("deserialize");
        assert_eq!(back, RunNumber::One);
        assert!(serde_json::from_str::<RunNumber>("0").is_err());
    }
}
