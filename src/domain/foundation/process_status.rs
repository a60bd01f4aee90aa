//! ProcessStatus enum - health grade of a single assessed business process.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// Health grade assigned to a process during an assessment.
///
/// Variant order is the canonical reporting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessStatus {
    Healthy,
    Careful,
    Warning,
    Unable,
    Na,
}

impl ProcessStatus {
    /// All statuses in reporting order.
    pub const ALL: [ProcessStatus; 5] = [
        ProcessStatus::Healthy,
        ProcessStatus::Careful,
        ProcessStatus::Warning,
        ProcessStatus::Unable,
        ProcessStatus::Na,
    ];

    /// Warning and unable processes count toward the critical bucket.
    pub fn is_critical(&self) -> bool {
        matches!(self, ProcessStatus::Warning | ProcessStatus::Unable)
    }

    /// Wire/storage representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProcessStatus::Healthy => "healthy",
            ProcessStatus::Careful => "careful",
            ProcessStatus::Warning => "warning",
            ProcessStatus::Unable => "unable",
            ProcessStatus::Na => "na",
        }
    }

    /// Human-readable label used in generated prose.
    pub fn label(&self) -> &'static str {
        match self {
            ProcessStatus::Healthy => "healthy",
            ProcessStatus::Careful => "needs care",
            ProcessStatus::Warning => "warning",
            ProcessStatus::Unable => "unable to assess",
            ProcessStatus::Na => "not applicable",
        }
    }
}

impl fmt::Display for ProcessStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ProcessStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProcessStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| {
                ValidationError::invalid_format("status", format!("unknown process status '{}'", s))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn critical_bucket_is_warning_and_unable() {
        let critical: Vec<_> = ProcessStatus::ALL
            .into_iter()
            .filter(ProcessStatus::is_critical)
            .collect();
        assert_eq!(critical, vec![ProcessStatus::Warning, ProcessStatus::Unable]);
    }

    #[test]
    fn parses_every_wire_value() {
        for status in ProcessStatus::ALL {
            assert_eq!(status.as_str().parse::<ProcessStatus>().unwrap(), status);
        }
    }

    #[test]
    fn rejects_unknown_value() {
        assert!("broken".parse::<ProcessStatus>().is_err());
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(serde_json::to_string(&ProcessStatus::Na).unwrap(), "\"na\"");
        let parsed: ProcessStatus = serde_json::from_str("\"careful\"").unwrap();
        assert_eq!(parsed, ProcessStatus::Careful);
    }
}
