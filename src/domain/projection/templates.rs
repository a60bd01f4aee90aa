//! Static project templates.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::proposal::ProposalType;

/// Identifies a project template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateKey {
    ProcessOptimization,
    SystemsImplementation,
    AdvisoryRetainer,
    StandardEngagement,
}

impl TemplateKey {
    /// Template used for each proposal type. Custom proposals use the
    /// standard engagement.
    pub fn for_proposal_type(proposal_type: ProposalType) -> Self {
        match proposal_type {
            ProposalType::TypeA => TemplateKey::ProcessOptimization,
            ProposalType::TypeB => TemplateKey::SystemsImplementation,
            ProposalType::TypeC => TemplateKey::AdvisoryRetainer,
            ProposalType::Custom => TemplateKey::StandardEngagement,
        }
    }

    /// Parses a stored key, falling back to the standard engagement for
    /// anything unrecognized.
    pub fn parse_or_fallback(key: &str) -> Self {
        match key {
            "process_optimization" => TemplateKey::ProcessOptimization,
            "systems_implementation" => TemplateKey::SystemsImplementation,
            "advisory_retainer" => TemplateKey::AdvisoryRetainer,
            _ => TemplateKey::StandardEngagement,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateKey::ProcessOptimization => "process_optimization",
            TemplateKey::SystemsImplementation => "systems_implementation",
            TemplateKey::AdvisoryRetainer => "advisory_retainer",
            TemplateKey::StandardEngagement => "standard_engagement",
        }
    }
}

impl fmt::Display for TemplateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One phase of a project template and its task titles.
#[derive(Debug, PartialEq, Eq)]
pub struct PhaseTemplate {
    pub name: &'static str,
    pub tasks: &'static [&'static str],
}

/// An ordered list of phases applied to every section of a proposal.
#[derive(Debug, PartialEq, Eq)]
pub struct ProjectTemplate {
    pub key: TemplateKey,
    pub name: &'static str,
    pub phases: &'static [PhaseTemplate],
}

impl ProjectTemplate {
    pub fn phase_count(&self) -> usize {
        self.phases.len()
    }
}

static PROCESS_OPTIMIZATION: ProjectTemplate = ProjectTemplate {
    key: TemplateKey::ProcessOptimization,
    name: "Process Optimization",
    phases: &[
        PhaseTemplate {
            name: "Discovery",
            tasks: &["Interview process owners", "Map current state", "Collect baseline metrics"],
        },
        PhaseTemplate {
            name: "Design",
            tasks: &["Draft future-state process", "Review design with stakeholders"],
        },
        PhaseTemplate {
            name: "Implementation",
            tasks: &["Configure tooling changes", "Update procedures", "Pilot with one team"],
        },
        PhaseTemplate {
            name: "Handoff",
            tasks: &["Train process owners", "Confirm success metrics"],
        },
    ],
};

static SYSTEMS_IMPLEMENTATION: ProjectTemplate = ProjectTemplate {
    key: TemplateKey::SystemsImplementation,
    name: "Systems Implementation",
    phases: &[
        PhaseTemplate {
            name: "Requirements",
            tasks: &["Gather functional requirements", "Document integrations"],
        },
        PhaseTemplate {
            name: "Configuration",
            tasks: &["Configure system objects", "Set up permissions"],
        },
        PhaseTemplate {
            name: "Data Migration",
            tasks: &["Map legacy fields", "Run test migration", "Run production migration"],
        },
        PhaseTemplate {
            name: "Testing",
            tasks: &["Write test scenarios", "Run user acceptance testing"],
        },
        PhaseTemplate {
            name: "Go-Live",
            tasks: &["Cut over", "Hypercare support"],
        },
    ],
};

static ADVISORY_RETAINER: ProjectTemplate = ProjectTemplate {
    key: TemplateKey::AdvisoryRetainer,
    name: "Advisory Retainer",
    phases: &[
        PhaseTemplate {
            name: "Onboarding",
            tasks: &["Kickoff call", "Agree on priorities"],
        },
        PhaseTemplate {
            name: "Advisory Sessions",
            tasks: &["Hold monthly working session", "Share written recommendations"],
        },
        PhaseTemplate {
            name: "Quarterly Review",
            tasks: &["Review progress against priorities"],
        },
    ],
};

static STANDARD_ENGAGEMENT: ProjectTemplate = ProjectTemplate {
    key: TemplateKey::StandardEngagement,
    name: "Standard Engagement",
    phases: &[
        PhaseTemplate {
            name: "Kickoff",
            tasks: &["Confirm scope", "Schedule check-ins"],
        },
        PhaseTemplate {
            name: "Execution",
            tasks: &["Deliver agreed work"],
        },
        PhaseTemplate {
            name: "Review",
            tasks: &["Review deliverables with customer"],
        },
        PhaseTemplate {
            name: "Closeout",
            tasks: &["Collect sign-off", "Send final report"],
        },
    ],
};

/// Lookup for the built-in templates.
pub struct TemplateCatalog;

impl TemplateCatalog {
    pub fn get(key: TemplateKey) -> &'static ProjectTemplate {
        match key {
            TemplateKey::ProcessOptimization => &PROCESS_OPTIMIZATION,
            TemplateKey::SystemsImplementation => &SYSTEMS_IMPLEMENTATION,
            TemplateKey::AdvisoryRetainer => &ADVISORY_RETAINER,
            TemplateKey::StandardEngagement => &STANDARD_ENGAGEMENT,
        }
    }

    /// Resolves a stored key, falling back to the standard engagement.
    pub fn resolve(key: &str) -> &'static ProjectTemplate {
        Self::get(TemplateKey::parse_or_fallback(key))
    }

    pub fn for_proposal_type(proposal_type: ProposalType) -> &'static ProjectTemplate {
        Self::get(TemplateKey::for_proposal_type(proposal_type))
    }
}
