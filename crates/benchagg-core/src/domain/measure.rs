//! The `Known | Unknown` value type carried by every metric and score.
//!
//! Zero is a legitimate score, so absence of data is never encoded as `0.0`
//! or as a bare `Option` that callers might `unwrap_or(0.0)`. On the wire a
//! [`Measure`] is either a JSON number or the string `"Unknown"`; any other
//! JSON value read from a result file collapses to [`Measure::Unknown`].

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Marker written for values that could not be computed.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// A numeric quantity that may be missing.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum Measure {
    Known(f64),
    #[default]
    Unknown,
}

impl Measure {
    /// Wrap a finite number; NaN and infinities become `Unknown`.
    pub fn from_f64(value: f64) -> Self {
        if value.is_finite() {
            Self::Known(value)
        } else {
            Self::Unknown
        }
    }

    pub fn known(self) -> Option<f64> {
        match self {
            Self::Known(v) => Some(v),
            Self::Unknown => None,
        }
    }

    pub fn is_known(self) -> bool {
        matches!(self, Self::Known(_))
    }

    /// Apply `f` to a known value, keeping `Unknown` as is.
    pub fn map(self, f: impl FnOnce(f64) -> f64) -> Self {
        match self {
            Self::Known(v) => Self::from_f64(f(v)),
            Self::Unknown => Self::Unknown,
        }
    }

    /// Combine two known values; `Unknown` if either side is unknown.
    pub fn zip_with(self, other: Measure, f: impl FnOnce(f64, f64) -> f64) -> Self {
        match (self, other) {
            (Self::Known(a), Self::Known(b)) => Self::from_f64(f(a, b)),
            _ => Self::Unknown,
        }
    }

    /// `self` when known, otherwise `fallback`.
    pub fn or(self, fallback: Measure) -> Self {
        if self.is_known() {
            self
        } else {
            fallback
        }
    }
}

impl From<Option<f64>> for Measure {
    fn from(value: Option<f64>) -> Self {
        value.map(Self::from_f64).unwrap_or(Self::Unknown)
    }
}

impl From<Value> for Measure {
    fn from(value: Value) -> Self {
        value.as_f64().into()
    }
}

impl From<Measure> for Value {
    fn from(measure: Measure) -> Self {
        measure
            .known()
            .and_then(serde_json::Number::from_f64)
            .map(Value::Number)
            .unwrap_or_else(|| Value::String(UNKNOWN_LABEL.to_string()))
    }
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Known(v) => write!(f, "{}", v),
            Self::Unknown => f.write_str(UNKNOWN_LABEL),
        }
    }
}
