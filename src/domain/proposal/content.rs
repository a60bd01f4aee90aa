//! ProposalContent - the narrative body of a proposal.

use serde::{Deserialize, Serialize};

/// Narrative content of a proposal.
///
/// A closed record: unknown keys are rejected when parsing so that
/// free-form payloads cannot slip into exported versions.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProposalContent {
    pub executive_summary: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub assumptions: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub out_of_scope: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_terms: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ProposalContent {
    /// Content holding only an executive summary.
    pub fn with_summary(executive_summary: impl Into<String>) -> Self {
        Self {
            executive_summary: executive_summary.into(),
            ..Default::default()
        }
    }
}
