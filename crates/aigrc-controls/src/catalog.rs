//! # Control Catalog — the Static Obligation Catalog
//!
//! Defines `ControlCategory`, `ApplicabilityTag`, `ControlCatalogEntry`,
//! and the built-in default catalog. The catalog is global and static:
//! per-subject state lives in `ControlImplementation` records keyed by
//! control code, never in the catalog itself.
//!
//! ## Categories
//!
//! | Prefix | Category | Concern |
//! |--------|----------|---------|
//! | GOV | Governance | Policies, inventory, accountability, vendors |
//! | RSK | RiskManagement | Risk system, impact assessments |
//! | DAT | DataGovernance | Data quality, bias controls |
//! | TEC | TechnicalRobustness | Documentation, logging, robustness |
//! | HUM | HumanOversight | Oversight measures |
//! | TRA | Transparency | User-facing disclosure duties |
//! | DEP | Deployer | Duties of the deploying organization |
//! | TRN | Training | Staff AI-literacy duties |

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use aigrc_core::ControlCode;

// ─── ApplicabilityTag ────────────────────────────────────────────────

/// Tags controlling when a catalog entry attaches to a subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicabilityTag {
    /// Attaches to every subject.
    All,
    /// Attaches when the subject is classified `high_risk_candidate`.
    HighRisk,
    /// Attaches when the subject is classified `limited_risk`.
    LimitedRisk,
    /// Attaches when the subject is built on a third-party vendor model.
    VendorBased,
}

impl ApplicabilityTag {
    /// Returns the snake_case string identifier for this tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::HighRisk => "high_risk",
            Self::LimitedRisk => "limited_risk",
            Self::VendorBased => "vendor_based",
        }
    }
}

impl std::fmt::Display for ApplicabilityTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── ControlCategory ─────────────────────────────────────────────────

/// The obligation category of a catalog control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlCategory {
    /// Governance policies, inventory, and vendor accountability.
    Governance,
    /// Risk management system and impact assessments.
    RiskManagement,
    /// Data quality and bias controls.
    DataGovernance,
    /// Technical documentation, logging, robustness.
    TechnicalRobustness,
    /// Human oversight measures.
    HumanOversight,
    /// User-facing transparency duties.
    Transparency,
    /// Duties specific to the deploying organization.
    Deployer,
    /// Staff AI-literacy training duties.
    Training,
}

impl ControlCategory {
    /// All categories in canonical order.
    pub fn all() -> &'static [ControlCategory] {
        &[
            Self::Governance,
            Self::RiskManagement,
            Self::DataGovernance,
            Self::TechnicalRobustness,
            Self::HumanOversight,
            Self::Transparency,
            Self::Deployer,
            Self::Training,
        ]
    }

    /// The three-letter code prefix for this category (e.g. `GOV`).
    pub fn code_prefix(&self) -> &'static str {
        match self {
            Self::Governance => "GOV",
            Self::RiskManagement => "RSK",
            Self::DataGovernance => "DAT",
            Self::TechnicalRobustness => "TEC",
            Self::HumanOversight => "HUM",
            Self::Transparency => "TRA",
            Self::Deployer => "DEP",
            Self::Training => "TRN",
        }
    }

    /// Returns the snake_case string identifier for this category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Governance => "governance",
            Self::RiskManagement => "risk_management",
            Self::DataGovernance => "data_governance",
            Self::TechnicalRobustness => "technical_robustness",
            Self::HumanOversight => "human_oversight",
            Self::Transparency => "transparency",
            Self::Deployer => "deployer",
            Self::Training => "training",
        }
    }
}

impl std::fmt::Display for ControlCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── ControlCatalogEntry ─────────────────────────────────────────────

/// One obligation in the static control catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlCatalogEntry {
    /// Stable catalog code (e.g. `GOV-01`).
    pub code: ControlCode,
    /// Human-readable obligation name.
    pub name: String,
    /// Obligation category.
    pub category: ControlCategory,
    /// Tags controlling when this entry attaches.
    pub applies_to: BTreeSet<ApplicabilityTag>,
}

// ─── Default Catalog ─────────────────────────────────────────────────

/// The built-in catalog: (code, name, category, applicability tags).
///
/// Codes are stable identifiers; renumbering an existing code would orphan
/// every implementation record referencing it.
const DEFAULT_CATALOG: &[(
    &str,
    &str,
    ControlCategory,
    &[ApplicabilityTag],
)] = &[
    (
        "GOV-01",
        "AI governance policy",
        ControlCategory::Governance,
        &[ApplicabilityTag::All],
    ),
    (
        "GOV-02",
        "AI system inventory and ownership",
        ControlCategory::Governance,
        &[ApplicabilityTag::All],
    ),
    (
        "GOV-03",
        "Roles and accountability assignment",
        ControlCategory::Governance,
        &[ApplicabilityTag::All],
    ),
    (
        "GOV-04",
        "Vendor due diligence",
        ControlCategory::Governance,
        &[ApplicabilityTag::VendorBased],
    ),
    (
        "GOV-05",
        "Vendor contract AI clauses",
        ControlCategory::Governance,
        &[ApplicabilityTag::VendorBased],
    ),
    (
        "RSK-01",
        "Risk management system",
        ControlCategory::RiskManagement,
        &[ApplicabilityTag::HighRisk],
    ),
    (
        "RSK-02",
        "Fundamental rights impact assessment",
        ControlCategory::RiskManagement,
        &[ApplicabilityTag::HighRisk],
    ),
    (
        "DAT-01",
        "Data governance and quality controls",
        ControlCategory::DataGovernance,
        &[ApplicabilityTag::HighRisk],
    ),
    (
        "DAT-02",
        "Bias monitoring and mitigation",
        ControlCategory::DataGovernance,
        &[ApplicabilityTag::HighRisk],
    ),
    (
        "TEC-01",
        "Technical documentation",
        ControlCategory::TechnicalRobustness,
        &[ApplicabilityTag::HighRisk],
    ),
    (
        "TEC-02",
        "Automatic event logging",
        ControlCategory::TechnicalRobustness,
        &[ApplicabilityTag::HighRisk],
    ),
    (
        "TEC-03",
        "Accuracy, robustness and cybersecurity",
        ControlCategory::TechnicalRobustness,
        &[ApplicabilityTag::HighRisk],
    ),
    (
        "TEC-04",
        "Vendor model change monitoring",
        ControlCategory::TechnicalRobustness,
        &[ApplicabilityTag::VendorBased],
    ),
    (
        "HUM-01",
        "Human oversight measures",
        ControlCategory::HumanOversight,
        &[ApplicabilityTag::HighRisk],
    ),
    (
        "TRA-01",
        "User-facing transparency notices",
        ControlCategory::Transparency,
        &[ApplicabilityTag::LimitedRisk, ApplicabilityTag::HighRisk],
    ),
    (
        "TRA-02",
        "Synthetic content marking",
        ControlCategory::Transparency,
        &[ApplicabilityTag::LimitedRisk],
    ),
    (
        "DEP-01",
        "Use per provider instructions",
        ControlCategory::Deployer,
        &[ApplicabilityTag::HighRisk],
    ),
    (
        "DEP-02",
        "Input data relevance controls",
        ControlCategory::Deployer,
        &[ApplicabilityTag::HighRisk],
    ),
    (
        "DEP-03",
        "Serious incident reporting",
        ControlCategory::Deployer,
        &[ApplicabilityTag::HighRisk],
    ),
    (
        "TRN-01",
        "AI literacy training programme",
        ControlCategory::Training,
        &[ApplicabilityTag::All],
    ),
];

/// Build the built-in default catalog.
pub fn default_catalog() -> Catalog {
    let entries = DEFAULT_CATALOG
        .iter()
        .map(|(code, name, category, tags)| ControlCatalogEntry {
            code: ControlCode::new(*code),
            name: (*name).to_string(),
            category: *category,
            applies_to: tags.iter().copied().collect(),
        })
        .collect();
    Catalog { entries }
}

// ─── Catalog ─────────────────────────────────────────────────────────

/// The control catalog: a static set of obligations, keyed by code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    /// All catalog entries.
    pub entries: Vec<ControlCatalogEntry>,
}

impl Catalog {
    /// Build a catalog from explicit entries (e.g. a jurisdiction-specific
    /// catalog loaded by the adapter).
    pub fn new(entries: Vec<ControlCatalogEntry>) -> Self {
        Self { entries }
    }

    /// Look up an entry by code.
    pub fn get(&self, code: &ControlCode) -> Option<&ControlCatalogEntry> {
        self.entries.iter().find(|entry| &entry.code == code)
    }

    /// Number of entries in the catalog.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        default_catalog()
    }
}
