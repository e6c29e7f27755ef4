//! # Compliance Artifacts — Controls, Evidence, Tasks
//!
//! Per-subject records the engine reads but never writes: control
//! implementations, evidence records, and remediation tasks. These are
//! owned by external modules; the gap detector and readiness scorer
//! consume them from the snapshot.

use serde::{Deserialize, Serialize};

use crate::identity::{ControlCode, EvidenceId, SubjectId, TaskId};
use crate::temporal::Timestamp;

// ─── Control Implementation ──────────────────────────────────────────

/// Implementation status of a control for a subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImplementationStatus {
    /// No work has started on this control.
    NotStarted,
    /// Implementation work is underway.
    InProgress,
    /// The control is implemented.
    Implemented,
    /// The control was assessed as not applicable to this subject.
    NotApplicable,
}

impl ImplementationStatus {
    /// Whether this status can still earn readiness credit.
    ///
    /// `NotApplicable` implementations are excluded from scoring
    /// denominators; they can neither earn nor lose points.
    pub fn is_scoreable(&self) -> bool {
        !matches!(self, Self::NotApplicable)
    }

    /// Returns the snake_case string identifier for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::InProgress => "in_progress",
            Self::Implemented => "implemented",
            Self::NotApplicable => "not_applicable",
        }
    }
}

impl std::fmt::Display for ImplementationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-subject instantiation of a catalog control.
///
/// When a re-classification makes a control inapplicable, the record is
/// kept and flagged by the caller rather than deleted — the audit trail of
/// past obligations survives reclassification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlImplementation {
    /// The subject this implementation belongs to.
    pub subject_id: SubjectId,
    /// The catalog control being implemented.
    pub control_code: ControlCode,
    /// Current implementation status.
    pub status: ImplementationStatus,
    /// Number of evidence records attached to this control.
    pub evidence_count: u32,
}

// ─── Evidence ────────────────────────────────────────────────────────

/// Lifecycle status of an evidence record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceStatus {
    /// Uploaded but not yet reviewed.
    Draft,
    /// Reviewed and accepted.
    Approved,
    /// Past its validity window; must be refreshed.
    Expired,
    /// Retired from the active evidence set; kept for audit.
    Archived,
}

impl EvidenceStatus {
    /// Whether this record counts toward the active evidence denominator.
    ///
    /// Archived evidence is historical; it neither earns nor costs
    /// readiness credit.
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Archived)
    }

    /// Returns the snake_case string identifier for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Approved => "approved",
            Self::Expired => "expired",
            Self::Archived => "archived",
        }
    }
}

impl std::fmt::Display for EvidenceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A compliance evidence record for a subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceRecord {
    /// Unique evidence identifier.
    pub id: EvidenceId,
    /// The subject this evidence belongs to.
    pub subject_id: SubjectId,
    /// Current lifecycle status.
    pub status: EvidenceStatus,
}

// ─── Tasks ───────────────────────────────────────────────────────────

/// Status of a remediation task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Not started.
    Todo,
    /// Being worked on.
    InProgress,
    /// Completed.
    Done,
    /// Blocked on an external dependency.
    Blocked,
}

impl TaskStatus {
    /// Whether the task still demands work.
    pub fn is_open(&self) -> bool {
        !matches!(self, Self::Done)
    }

    /// Returns the snake_case string identifier for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in_progress",
            Self::Done => "done",
            Self::Blocked => "blocked",
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Priority of a remediation task. Drives overdue-gap severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    /// Can slip without compliance impact.
    Low,
    /// Normal priority.
    Medium,
    /// Directly gates a compliance obligation.
    High,
}

/// A remediation task for a subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique task identifier.
    pub id: TaskId,
    /// The subject this task belongs to.
    pub subject_id: SubjectId,
    /// Current status.
    pub status: TaskStatus,
    /// Optional deadline.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Timestamp>,
    /// Priority, driving overdue-gap severity.
    pub priority: TaskPriority,
}

impl Task {
    /// Whether the task is open and past its due date as of `now`.
    ///
    /// Tasks without a due date are never overdue.
    pub fn is_overdue(&self, now: Timestamp) -> bool {
        self.status.is_open()
            && self
                .due_date
                .map(|due| due.is_before(now))
                .unwrap_or(false)
    }
}
