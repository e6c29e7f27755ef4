//! # Gap Model — Deficiency Items with Stable Enums
//!
//! `GapItem` is a derived, non-persistent record: the reporting adapter
//! renders it and throws it away. Category and severity are closed enums
//! with a stable wire format, so downstream consumers can filter and sort
//! without string matching.

use serde::{Deserialize, Serialize};

// ─── Severity ────────────────────────────────────────────────────────

/// Severity of a detected gap.
///
/// Declaration order is the sort order: `critical` sorts before `high`,
/// which sorts before `medium` and `low`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GapSeverity {
    /// Blocks compliance outright; fix first.
    Critical,
    /// Material deficiency in an applicable obligation.
    High,
    /// Deficiency that degrades audit readiness.
    Medium,
    /// Informational; work is underway or low-impact.
    Low,
}

impl GapSeverity {
    /// Returns the snake_case string identifier for this severity.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl std::fmt::Display for GapSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── Category ────────────────────────────────────────────────────────

/// The concern a gap belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GapCategory {
    /// Classification missing or stale.
    Classification,
    /// Control implementation deficiencies.
    Control,
    /// Evidence missing, unreviewed, or expired.
    Evidence,
    /// Staff training obligations unmet.
    Training,
    /// Fundamental-rights impact assessment outstanding.
    Fria,
    /// Remediation tasks overdue.
    Task,
}

impl GapCategory {
    /// Returns the snake_case string identifier for this category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Classification => "classification",
            Self::Control => "control",
            Self::Evidence => "evidence",
            Self::Training => "training",
            Self::Fria => "fria",
            Self::Task => "task",
        }
    }
}

impl std::fmt::Display for GapCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── GapItem ─────────────────────────────────────────────────────────

/// One detected deficiency.
///
/// `id` is deterministic for a given snapshot (rule name plus the entity
/// the rule fired on), so re-running detection over the same snapshot
/// produces identical items in identical order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GapItem {
    /// Deterministic identifier, e.g. `control.not_started.RSK-01`.
    pub id: String,
    /// The concern this gap belongs to.
    pub category: GapCategory,
    /// How urgent the gap is.
    pub severity: GapSeverity,
    /// Short human-readable title.
    pub title: String,
    /// What was observed.
    pub description: String,
    /// What to do about it.
    pub action_hint: String,
    /// The entity the rule fired on, when it fired per-item.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related_entity_id: Option<String>,
}
