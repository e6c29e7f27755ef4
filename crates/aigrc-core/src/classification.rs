//! # Classification — Risk Levels and the Versioned Record
//!
//! Defines `RiskLevel` with its total precedence order, `Confidence`, and
//! the persisted `Classification` record that forms the audit trail.
//!
//! ## Precedence
//!
//! When several screening stages produce a finding, the highest-precedence
//! level wins:
//!
//! ```text
//! prohibited > needs_review > high_risk_candidate
//!            > limited_risk > minimal_risk > not_classified
//! ```
//!
//! `prohibited` is absorbing: once any prohibited-practice indicator fires,
//! no later stage can soften the outcome.
//!
//! ## Record Invariants
//!
//! Per subject: exactly one `Classification` row has `is_current = true`,
//! `version` starts at 1 and strictly increases, and past rows are never
//! updated or deleted. The ledger in `aigrc-ledger` enforces these at the
//! store boundary.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::AigrcError;
use crate::identity::{ClassifierId, SubjectId};
use crate::temporal::Timestamp;

// ─── RiskLevel ───────────────────────────────────────────────────────

/// The classification outcome category driving which obligations apply.
///
/// One enum serves both the engine outcome and the persisted record;
/// `prohibited` is the persisted reading of a blocked subject, and
/// `high_risk_candidate` stays a candidate until a human confirms the
/// assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    /// A prohibited-practice indicator fired; the use is blocked outright.
    Prohibited,
    /// Screening was incomplete or ambiguous; a human review is required.
    NeedsReview,
    /// At least one high-risk category applies.
    HighRiskCandidate,
    /// Transparency obligations attach; no high-risk category applies.
    LimitedRisk,
    /// In scope but no risk-elevating indicator applies, or out of scope.
    MinimalRisk,
    /// No screening answers exist for the subject yet.
    NotClassified,
}

impl RiskLevel {
    /// All risk levels in descending precedence order.
    pub fn all() -> &'static [RiskLevel] {
        &[
            Self::Prohibited,
            Self::NeedsReview,
            Self::HighRiskCandidate,
            Self::LimitedRisk,
            Self::MinimalRisk,
            Self::NotClassified,
        ]
    }

    /// Precedence rank. Higher wins when combining stage findings.
    pub fn precedence(&self) -> u8 {
        match self {
            Self::Prohibited => 5,
            Self::NeedsReview => 4,
            Self::HighRiskCandidate => 3,
            Self::LimitedRisk => 2,
            Self::MinimalRisk => 1,
            Self::NotClassified => 0,
        }
    }

    /// Combine two findings, keeping the higher-precedence one.
    pub fn escalate(self, other: Self) -> Self {
        if self.precedence() >= other.precedence() {
            self
        } else {
            other
        }
    }

    /// Whether this level blocks deployment outright.
    pub fn is_blocked(&self) -> bool {
        matches!(self, Self::Prohibited)
    }

    /// Whether a classification at this level exists at all.
    pub fn is_classified(&self) -> bool {
        !matches!(self, Self::NotClassified)
    }

    /// Returns the snake_case string identifier for this level.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Prohibited => "prohibited",
            Self::NeedsReview => "needs_review",
            Self::HighRiskCandidate => "high_risk_candidate",
            Self::LimitedRisk => "limited_risk",
            Self::MinimalRisk => "minimal_risk",
            Self::NotClassified => "not_classified",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskLevel {
    type Err = AigrcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .find(|level| level.as_str() == s)
            .copied()
            .ok_or_else(|| AigrcError::SchemaValidation(format!("unknown risk level: {s:?}")))
    }
}

// ─── Confidence ──────────────────────────────────────────────────────

/// How confident the engine is in a classification.
///
/// `low` always accompanies `prohibited` and `needs_review`; `medium`
/// records that `unsure` answers were consulted without independently
/// escalating; `high` means the outcome rests on definite answers only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    /// No `unsure` answer was consulted for the final level.
    High,
    /// `unsure` answers were consulted but did not escalate the level.
    Medium,
    /// The outcome is blocked or requires review.
    Low,
}

impl Confidence {
    /// Returns the snake_case string identifier for this value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── Classification Record ───────────────────────────────────────────

/// One immutable entry in a subject's classification history.
///
/// Rows are appended by `aigrc-ledger`; nothing outside the store boundary
/// constructs a row with `version > 1`. The `reassessment_required` flag is
/// raised by external triggers (vendor change, model change, periodic
/// review) and cleared by the next committed classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    /// The subject this classification describes.
    pub subject_id: SubjectId,
    /// The classified risk level.
    pub risk_level: RiskLevel,
    /// Engine confidence; `None` when the subject was never screened.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<Confidence>,
    /// Human-auditable explanation of how the level was reached.
    pub rationale: String,
    /// Monotonically increasing version, starting at 1.
    pub version: u32,
    /// Whether this row is the authoritative classification.
    pub is_current: bool,
    /// When this row was committed.
    pub created_at: Timestamp,
    /// The actor that produced this classification.
    pub classifier_id: ClassifierId,
    /// Why a re-assessment was performed, when version > 1.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_reason: Option<String>,
    /// Raised externally when a material change invalidates this row.
    #[serde(default)]
    pub reassessment_required: bool,
}
