//! Version - immutable snapshot of a proposal taken at export time.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::domain::foundation::{ProposalId, Timestamp, UserId, VersionId};
use crate::domain::proposal::{sort_sections, ProposalContent, ProposalError, Section};

use super::VersionNumber;

/// The frozen inputs an export is regenerated from.
#[derive(Debug, Clone, Copy)]
pub struct ExportSource<'a> {
    pub content: &'a ProposalContent,
    pub sections: &'a [Section],
}

/// An exported, numbered copy of a proposal's content and sections.
///
/// Once built, a version is never modified. Regenerating an export reads
/// only the frozen snapshots held here, never the live proposal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Version {
    id: VersionId,
    proposal_id: ProposalId,
    version_number: VersionNumber,
    content_snapshot: ProposalContent,
    sections_snapshot: Vec<Section>,
    content_checksum: String,
    exported_by: UserId,
    exported_at: Timestamp,
    artifact_url: Option<String>,
}

impl Version {
    /// Freezes the given content and sections as version `version_number`.
    ///
    /// Sections are stored in presentation order.
    pub fn freeze(
        proposal_id: ProposalId,
        version_number: VersionNumber,
        content: ProposalContent,
        mut sections: Vec<Section>,
        exported_by: UserId,
        artifact_url: Option<String>,
    ) -> Result<Self, ProposalError> {
        sort_sections(&mut sections);
        let content_checksum = compute_checksum(&content, &sections)?;

        Ok(Self {
            id: VersionId::new(),
            proposal_id,
            version_number,
            content_snapshot: content,
            sections_snapshot: sections,
            content_checksum,
            exported_by,
            exported_at: Timestamp::now(),
            artifact_url,
        })
    }

    /// Reconstitutes a version from persistence.
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: VersionId,
        proposal_id: ProposalId,
        version_number: VersionNumber,
        content_snapshot: ProposalContent,
        sections_snapshot: Vec<Section>,
        content_checksum: String,
        exported_by: UserId,
        exported_at: Timestamp,
        artifact_url: Option<String>,
    ) -> Self {
        Self {
            id,
            proposal_id,
            version_number,
            content_snapshot,
            sections_snapshot,
            content_checksum,
            exported_by,
            exported_at,
            artifact_url,
        }
    }

    pub fn id(&self) -> VersionId {
        self.id
    }

    pub fn proposal_id(&self) -> ProposalId {
        self.proposal_id
    }

    pub fn version_number(&self) -> VersionNumber {
        self.version_number
    }

    pub fn content_snapshot(&self) -> &ProposalContent {
        &self.content_snapshot
    }

    pub fn sections_snapshot(&self) -> &[Section] {
        &self.sections_snapshot
    }

    /// SHA-256 over the canonical JSON of both snapshots.
    pub fn content_checksum(&self) -> &str {
        &self.content_checksum
    }

    pub fn exported_by(&self) -> &UserId {
        &self.exported_by
    }

    pub fn exported_at(&self) -> Timestamp {
        self.exported_at
    }

    pub fn artifact_url(&self) -> Option<&str> {
        self.artifact_url.as_deref()
    }

    /// Returns true if this version belongs to `proposal_id`.
    pub fn belongs_to(&self, proposal_id: &ProposalId) -> bool {
        &self.proposal_id == proposal_id
    }

    /// The frozen content and sections to regenerate this export from.
    pub fn export_source(&self) -> ExportSource<'_> {
        ExportSource {
            content: &self.content_snapshot,
            sections: &self.sections_snapshot,
        }
    }

    /// Recomputes the checksum and compares it to the stored one.
    pub fn verify_checksum(&self) -> bool {
        compute_checksum(&self.content_snapshot, &self.sections_snapshot)
            .map(|checksum| checksum == self.content_checksum)
            .unwrap_or(false)
    }
}

fn compute_checksum(content: &ProposalContent, sections: &[Section]) -> Result<String, ProposalError> {
    let canonical = serde_json::to_vec(&(content, sections))
        .map_err(|e| ProposalError::Internal(format!("Failed to serialize version snapshot: {}", e)))?;
    let mut hasher = Sha256::new();
    hasher.update(&canonical);
    Ok(format!("{:x}", hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::proposal::SectionDraft;

    fn user() -> UserId {
        UserId::new("user-1").unwrap()
    }

    fn section(proposal_id: ProposalId, title: &str, sort_order: u32) -> Section {
        Section::from_draft(
            proposal_id,
            SectionDraft {
                title: title.to_string(),
                description: String::new(),
                deliverables: vec!["Runbook".to_string()],
                hours: 8.0,
                rate: 100.0,
                start_date: None,
                end_date: None,
                addressed_process_names: vec![],
                sort_order,
            },
        )
    }

    #[test]
    fn freeze_orders_sections_and_computes_checksum() {
        let pid = ProposalId::new();
        let version = Version::freeze(
            pid,
            VersionNumber::first(),
            ProposalContent::with_summary("Summary"),
            vec![section(pid, "Second", 1), section(pid, "First", 0)],
            user(),
            None,
        )
        .unwrap();

        let titles: Vec<&str> = version.sections_snapshot().iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["First", "Second"]);
        assert_eq!(version.content_checksum().len(), 64);
        assert!(version.verify_checksum());
        assert!(version.belongs_to(&pid));
        assert!(!version.belongs_to(&ProposalId::new()));
    }

    #[test]
    fn export_source_is_decoupled_from_later_edits() {
        let pid = ProposalId::new();
        let mut content = ProposalContent::with_summary("Original");
        let version = Version::freeze(
            pid,
            VersionNumber::first(),
            content.clone(),
            vec![section(pid, "Only", 0)],
            user(),
            Some("https://files/v1.pdf".to_string()),
        )
        .unwrap();

        content.executive_summary = "Edited later".to_string();

        let source = version.export_source();
        assert_eq!(source.content.executive_summary, "Original");
        assert_eq!(source.sections.len(), 1);
        assert_eq!(version.artifact_url(), Some("https://files/v1.pdf"));
    }

    #[test]
    fn same_snapshots_give_same_checksum() {
        let pid = ProposalId::new();
        let sections = vec![section(pid, "Only", 0)];
        let a = Version::freeze(
            pid,
            VersionNumber::first(),
            ProposalContent::with_summary("S"),
            sections.clone(),
            user(),
            None,
        )
        .unwrap();
        let b = Version::freeze(
            pid,
            VersionNumber::new(2).unwrap(),
            ProposalContent::with_summary("S"),
            sections,
            user(),
            None,
        )
        .unwrap();

        assert_eq!(a.content_checksum(), b.content_checksum());
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn tampered_snapshot_fails_verification() {
        let pid = ProposalId::new();
        let version = Version::freeze(
            pid,
            VersionNumber::first(),
            ProposalContent::with_summary("S"),
            vec![],
            user(),
            None,
        )
        .unwrap();

        let tampered = Version::reconstitute(
            version.id(),
            pid,
            version.version_number(),
            ProposalContent::with_summary("Changed"),
            vec![],
            version.content_checksum().to_string(),
            user(),
            version.exported_at(),
            None,
        );

        assert!(!tampered.verify_checksum());
    }
}
