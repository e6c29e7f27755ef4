//! # Compliance Snapshot — the Engine's Point-in-Time Input
//!
//! `ComplianceSnapshot` bundles everything the engine components read for
//! one subject: screening answers, the current classification (if any),
//! control implementations, evidence records, and tasks. The adapter builds
//! one from the external store, validates it once, and hands it to the
//! engine; every component then treats it as well-formed and immutable.
//!
//! ## Validation
//!
//! Malformed snapshots are rejected here, before any engine component runs:
//! cross-subject records, duplicate control codes, duplicate evidence/task
//! ids, and classification rows violating the version invariants all
//! produce `AigrcError::InvalidSnapshot`. Missing answers are NOT a
//! validation failure — incomplete screening degrades inside the
//! classification engine instead.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::answer::AnswerSet;
use crate::artifact::{ControlImplementation, EvidenceRecord, Task};
use crate::classification::Classification;
use crate::digest::{sha256_digest, CanonicalBytes, ContentDigest};
use crate::error::AigrcError;
use crate::identity::{OrganizationId, SubjectId};
use crate::temporal::Timestamp;

/// Point-in-time view of one subject's compliance state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceSnapshot {
    /// The subject under assessment.
    pub subject_id: SubjectId,
    /// The organization that owns the subject.
    pub organization_id: OrganizationId,
    /// Whether the subject is built on a third-party vendor model/service.
    pub vendor_based: bool,
    /// When this snapshot was taken.
    pub taken_at: Timestamp,
    /// The subject's screening answers (possibly empty).
    pub answers: AnswerSet,
    /// The current classification, if one has been committed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classification: Option<Classification>,
    /// Control implementation records.
    pub controls: Vec<ControlImplementation>,
    /// Evidence records.
    pub evidence: Vec<EvidenceRecord>,
    /// Remediation tasks.
    pub tasks: Vec<Task>,
}

impl ComplianceSnapshot {
    /// Create an empty snapshot for a subject, taken now.
    pub fn new(subject_id: SubjectId, organization_id: OrganizationId) -> Self {
        Self {
            subject_id,
            organization_id,
            vendor_based: false,
            taken_at: Timestamp::now(),
            answers: AnswerSet::new(subject_id),
            classification: None,
            controls: Vec::new(),
            evidence: Vec::new(),
            tasks: Vec::new(),
        }
    }

    /// Validate the snapshot at the adapter boundary.
    ///
    /// # Errors
    ///
    /// Returns `AigrcError::InvalidSnapshot` naming the first violation
    /// found: a record scoped to a different subject, a duplicate control
    /// code, a duplicate evidence or task id, or a classification row with
    /// `version == 0` or `is_current == false` (the snapshot carries the
    /// current row; history lives behind the ledger).
    pub fn validate(&self) -> Result<(), AigrcError> {
        if self.answers.subject_id != self.subject_id {
            return Err(AigrcError::InvalidSnapshot(format!(
                "answer set belongs to {}, snapshot is for {}",
                self.answers.subject_id, self.subject_id
            )));
        }

        if let Some(classification) = &self.classification {
            if classification.subject_id != self.subject_id {
                return Err(AigrcError::InvalidSnapshot(format!(
                    "classification belongs to {}, snapshot is for {}",
                    classification.subject_id, self.subject_id
                )));
            }
            if classification.version == 0 {
                return Err(AigrcError::InvalidSnapshot(
                    "classification version must be >= 1".to_string(),
                ));
            }
            if !classification.is_current {
                return Err(AigrcError::InvalidSnapshot(
                    "snapshot must carry the current classification row".to_string(),
                ));
            }
        }

        let mut codes = HashSet::new();
        for control in &self.controls {
            if control.subject_id != self.subject_id {
                return Err(AigrcError::InvalidSnapshot(format!(
                    "control {} belongs to {}, snapshot is for {}",
                    control.control_code, control.subject_id, self.subject_id
                )));
            }
            if !codes.insert(&control.control_code) {
                return Err(AigrcError::InvalidSnapshot(format!(
                    "duplicate control implementation: {}",
                    control.control_code
                )));
            }
        }

        let mut evidence_ids = HashSet::new();
        for record in &self.evidence {
            if record.subject_id != self.subject_id {
                return Err(AigrcError::InvalidSnapshot(format!(
                    "evidence {} belongs to {}, snapshot is for {}",
                    record.id, record.subject_id, self.subject_id
                )));
            }
            if !evidence_ids.insert(record.id) {
                return Err(AigrcError::InvalidSnapshot(format!(
                    "duplicate evidence record: {}",
                    record.id
                )));
            }
        }

        let mut task_ids = HashSet::new();
        for task in &self.tasks {
            if task.subject_id != self.subject_id {
                return Err(AigrcError::InvalidSnapshot(format!(
                    "task {} belongs to {}, snapshot is for {}",
                    task.id, task.subject_id, self.subject_id
                )));
            }
            if !task_ids.insert(task.id) {
                return Err(AigrcError::InvalidSnapshot(format!(
                    "duplicate task: {}",
                    task.id
                )));
            }
        }

        Ok(())
    }

    /// Canonical content fingerprint of this snapshot.
    ///
    /// Two snapshots with equal content produce equal fingerprints, making
    /// the digest a safe key for caches an adapter may maintain in front of
    /// the recompute entry point. The engine itself never memoizes.
    pub fn fingerprint(&self) -> Result<ContentDigest, AigrcError> {
        let bytes = CanonicalBytes::new(self)?;
        Ok(sha256_digest(&bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::{EvidenceStatus, ImplementationStatus, TaskPriority, TaskStatus};
    use crate::classification::{Confidence, RiskLevel};
    use crate::identity::{ClassifierId, ControlCode, EvidenceId, TaskId};

    fn snapshot() -> ComplianceSnapshot {
        ComplianceSnapshot::new(SubjectId::new(), OrganizationId::new())
    }

    fn control(subject_id: SubjectId, code: &str) -> ControlImplementation {
        ControlImplementation {
            subject_id,
            control_code: ControlCode::new(code),
            status: ImplementationStatus::NotStarted,
            evidence_count: 0,
        }
    }

    #[test]
    fn test_empty_snapshot_validates() {
        assert!(snapshot().validate().is_ok());
    }

    #[test]
    fn test_cross_subject_answers_rejected() {
        let mut snap = snapshot();
        snap.answers = AnswerSet::new(SubjectId::new());
        assert!(matches!(
            snap.validate(),
            Err(AigrcError::InvalidSnapshot(_))
        ));
    }

    #[test]
    fn test_duplicate_control_codes_rejected() {
        let mut snap = snapshot();
        snap.controls.push(control(snap.subject_id, "GOV-01"));
        snap.controls.push(control(snap.subject_id, "GOV-01"));
        assert!(snap.validate().is_err());
    }

    #[test]
    fn test_cross_subject_control_rejected() {
        let mut snap = snapshot();
        snap.controls.push(control(SubjectId::new(), "GOV-01"));
        assert!(snap.validate().is_err());
    }

    #[test]
    fn test_duplicate_evidence_rejected() {
        let mut snap = snapshot();
        let id = EvidenceId::new();
        for _ in 0..2 {
            snap.evidence.push(EvidenceRecord {
                id,
                subject_id: snap.subject_id,
                status: EvidenceStatus::Draft,
            });
        }
        assert!(snap.validate().is_err());
    }

    #[test]
    fn test_duplicate_task_rejected() {
        let mut snap = snapshot();
        let id = TaskId::new();
        for _ in 0..2 {
            snap.tasks.push(Task {
                id,
                subject_id: snap.subject_id,
                status: TaskStatus::Todo,
                due_date: None,
                priority: TaskPriority::Low,
            });
        }
        assert!(snap.validate().is_err());
    }

    #[test]
    fn test_non_current_classification_rejected() {
        let mut snap = snapshot();
        snap.classification = Some(Classification {
            subject_id: snap.subject_id,
            risk_level: RiskLevel::MinimalRisk,
            confidence: Some(Confidence::High),
            rationale: "clean".to_string(),
            version: 2,
            is_current: false,
            created_at: Timestamp::now(),
            classifier_id: ClassifierId::new("pipeline"),
            change_reason: None,
            reassessment_required: false,
        });
        assert!(snap.validate().is_err());
    }

    #[test]
    fn test_version_zero_rejected() {
        let mut snap = snapshot();
        snap.classification = Some(Classification {
            subject_id: snap.subject_id,
            risk_level: RiskLevel::MinimalRisk,
            confidence: Some(Confidence::High),
            rationale: "clean".to_string(),
            version: 0,
            is_current: true,
            created_at: Timestamp::now(),
            classifier_id: ClassifierId::new("pipeline"),
            change_reason: None,
            reassessment_required: false,
        });
        assert!(snap.validate().is_err());
    }

    // ── Fingerprint ──────────────────────────────────────────────────

    #[test]
    fn test_fingerprint_is_stable() {
        let snap = snapshot();
        assert_eq!(
            snap.fingerprint().unwrap(),
            snap.clone().fingerprint().unwrap()
        );
    }

    #[test]
    fn test_fingerprint_changes_with_content() {
        let snap = snapshot();
        let mut other = snap.clone();
        other.controls.push(control(other.subject_id, "GOV-01"));
        assert_ne!(snap.fingerprint().unwrap(), other.fingerprint().unwrap());
    }
}
