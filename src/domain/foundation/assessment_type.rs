//! AssessmentType enum - the kinds of process assessment a customer can hold.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// Kind of assessment. A customer holds at most one live assessment per type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AssessmentType {
    #[serde(rename = "typeA")]
    TypeA,
    #[serde(rename = "typeB")]
    TypeB,
    #[serde(rename = "typeC")]
    TypeC,
}

impl AssessmentType {
    /// Order in which assessment types are scanned when resolving the
    /// assessment linked to a proposal. The first match wins.
    pub const RESOLUTION_ORDER: [AssessmentType; 3] = [
        AssessmentType::TypeA,
        AssessmentType::TypeB,
        AssessmentType::TypeC,
    ];

    /// Wire/storage representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            AssessmentType::TypeA => "typeA",
            AssessmentType::TypeB => "typeB",
            AssessmentType::TypeC => "typeC",
        }
    }

    /// Label used in generated prose.
    pub fn label(&self) -> &'static str {
        match self {
            AssessmentType::TypeA => "Type A",
            AssessmentType::TypeB => "Type B",
            AssessmentType::TypeC => "Type C",
        }
    }
}

impl fmt::Display for AssessmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AssessmentType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::RESOLUTION_ORDER
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| {
                ValidationError::invalid_format(
                    "assessment_type",
                    format!("unknown assessment type '{}'", s),
                )
            })
    }
}
