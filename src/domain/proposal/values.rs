//! Value objects for proposals.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::assessment::StatusCounts;
use crate::domain::foundation::{AssessmentType, ProcessStatus, ValidationError};

// ════════════════════════════════════════════════════════════════════════════════
// ProposalType
// ════════════════════════════════════════════════════════════════════════════════

/// Kind of engagement a proposal describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProposalType {
    #[serde(rename = "typeA")]
    TypeA,
    #[serde(rename = "typeB")]
    TypeB,
    #[serde(rename = "typeC")]
    TypeC,
    #[serde(rename = "custom")]
    Custom,
}

impl ProposalType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProposalType::TypeA => "typeA",
            ProposalType::TypeB => "typeB",
            ProposalType::TypeC => "typeC",
            ProposalType::Custom => "custom",
        }
    }
}

impl From<AssessmentType> for ProposalType {
    fn from(value: AssessmentType) -> Self {
        match value {
            AssessmentType::TypeA => ProposalType::TypeA,
            AssessmentType::TypeB => ProposalType::TypeB,
            AssessmentType::TypeC => ProposalType::TypeC,
        }
    }
}

impl fmt::Display for ProposalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ProposalType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "typeA" => Ok(ProposalType::TypeA),
            "typeB" => Ok(ProposalType::TypeB),
            "typeC" => Ok(ProposalType::TypeC),
            "custom" => Ok(ProposalType::Custom),
            other => Err(ValidationError::invalid_format(
                "proposal_type",
                format!("unknown proposal type '{}'", other),
            )),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// ProposalStatus
// ════════════════════════════════════════════════════════════════════════════════

/// Lifecycle status of a proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProposalStatus {
    #[default]
    Draft,
    Review,
    Sent,
    Accepted,
    Rejected,
}

impl ProposalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProposalStatus::Draft => "draft",
            ProposalStatus::Review => "review",
            ProposalStatus::Sent => "sent",
            ProposalStatus::Accepted => "accepted",
            ProposalStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ProposalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ProposalStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(ProposalStatus::Draft),
            "review" => Ok(ProposalStatus::Review),
            "sent" => Ok(ProposalStatus::Sent),
            "accepted" => Ok(ProposalStatus::Accepted),
            "rejected" => Ok(ProposalStatus::Rejected),
            other => Err(ValidationError::invalid_format(
                "status",
                format!("unknown proposal status '{}'", other),
            )),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// OverallRating
// ════════════════════════════════════════════════════════════════════════════════

/// Critical share above which a proposal is rated critical.
pub const CRITICAL_THRESHOLD: f64 = 0.5;
/// Critical share above which a proposal is rated warning.
pub const WARNING_THRESHOLD: f64 = 0.3;
/// Critical share above which a proposal is rated moderate.
pub const MODERATE_THRESHOLD: f64 = 0.1;

/// Overall health rating derived from an assessment's status distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OverallRating {
    #[default]
    Healthy,
    Moderate,
    Warning,
    Critical,
}

impl OverallRating {
    /// Classifies a status distribution by its critical share
    /// `(warning + unable) / total`. Thresholds are strict.
    pub fn classify(counts: &StatusCounts) -> Self {
        let total: usize = counts.values().sum();
        if total == 0 {
            return OverallRating::Healthy;
        }

        let critical: usize = counts
            .iter()
            .filter(|(status, _)| status.is_critical())
            .map(|(_, count)| *count)
            .sum();
        let critical_pct = critical as f64 / total as f64;

        if critical_pct > CRITICAL_THRESHOLD {
            OverallRating::Critical
        } else if critical_pct > WARNING_THRESHOLD {
            OverallRating::Warning
        } else if critical_pct > MODERATE_THRESHOLD {
            OverallRating::Moderate
        } else {
            OverallRating::Healthy
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OverallRating::Healthy => "healthy",
            OverallRating::Moderate => "moderate",
            OverallRating::Warning => "warning",
            OverallRating::Critical => "critical",
        }
    }
}

impl fmt::Display for OverallRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for OverallRating {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "healthy" => Ok(OverallRating::Healthy),
            "moderate" => Ok(OverallRating::Moderate),
            "warning" => Ok(OverallRating::Warning),
            "critical" => Ok(OverallRating::Critical),
            other => Err(ValidationError::invalid_format(
                "overall_rating",
                format!("unknown rating '{}'", other),
            )),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// ExternalRef
// ════════════════════════════════════════════════════════════════════════════════

/// Identifier and link of an object created in the external task tracker.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExternalRef {
    pub id: String,
    pub url: String,
}

impl ExternalRef {
    pub fn new(id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
        }
    }
}

impl fmt::Display for ExternalRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.id, self.url)
    }
}

/// Rounds a monetary or hour amount to two decimal places.
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
