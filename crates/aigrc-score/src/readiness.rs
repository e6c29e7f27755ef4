//! # General Readiness Scorer — Weighted Partial Credit
//!
//! Four categories with fixed weights summing to 100:
//!
//! | Category | Weight | Earned |
//! |----------|--------|--------|
//! | Classification | 25 | 25 clean, 15 reassessment-flagged, 0 unclassified |
//! | Controls | 40 | 40·implemented/total + 10·in_progress/total |
//! | Evidence | 25 | 25·approved/total |
//! | Tasks | 10 | 10 when zero overdue, else 0 |
//!
//! Classification and tasks are always applicable. Controls and evidence
//! are applicable only when they have scoreable items — `not_applicable`
//! implementations and `archived` evidence do not count. Categories with
//! no applicable items are excluded from both numerator and denominator,
//! so the remaining weights renormalize implicitly:
//!
//! ```text
//! value = round(100 · Σ earned / Σ applicable_weight)
//! ```
//!
//! An unclassified subject with no controls, no evidence, and no overdue
//! tasks therefore scores round(100·10/35) = 29, not 10.

use serde::{Deserialize, Serialize};

use aigrc_core::{ComplianceSnapshot, EvidenceStatus, ImplementationStatus};

// ─── Weights ─────────────────────────────────────────────────────────

const CLASSIFICATION_WEIGHT: u32 = 25;
const CONTROLS_WEIGHT: u32 = 40;
const CONTROLS_IN_PROGRESS_CREDIT: f64 = 10.0;
const EVIDENCE_WEIGHT: u32 = 25;
const TASKS_WEIGHT: u32 = 10;

const CLASSIFICATION_CLEAN_POINTS: f64 = 25.0;
const CLASSIFICATION_FLAGGED_POINTS: f64 = 15.0;

// ─── Output Types ────────────────────────────────────────────────────

/// The scored categories of the general readiness formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreCategory {
    /// Classification freshness.
    Classification,
    /// Control implementation progress.
    Controls,
    /// Evidence approval progress.
    Evidence,
    /// Overdue-task hygiene.
    Tasks,
}

impl ScoreCategory {
    /// Returns the snake_case string identifier for this category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Classification => "classification",
            Self::Controls => "controls",
            Self::Evidence => "evidence",
            Self::Tasks => "tasks",
        }
    }
}

impl std::fmt::Display for ScoreCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Earned and available points for one applicable category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    /// The category scored.
    pub category: ScoreCategory,
    /// Points earned (partial credit allowed).
    pub earned: f64,
    /// The category's weight in the applicable denominator.
    pub available: u32,
}

/// The aggregated readiness score with its per-category breakdown.
///
/// Only applicable categories appear in the breakdown; their `available`
/// weights sum to the denominator the value was computed over.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadinessScore {
    /// Rounded completeness, 0..=100.
    pub value: u8,
    /// Per-category earned/available rows for progress rendering.
    pub breakdown: Vec<CategoryBreakdown>,
}

// ─── score ───────────────────────────────────────────────────────────

/// Compute the general readiness score for a snapshot.
///
/// Pure: overdue checks use `snapshot.taken_at`. The result is always in
/// 0..=100 — the denominator includes the always-applicable
/// classification and tasks categories, so it is never zero.
pub fn score(snapshot: &ComplianceSnapshot) -> ReadinessScore {
    let mut breakdown = Vec::with_capacity(4);

    // Classification — always applicable.
    let classification_earned = match &snapshot.classification {
        Some(row) if row.risk_level.is_classified() => {
            if row.reassessment_required {
                CLASSIFICATION_FLAGGED_POINTS
            } else {
                CLASSIFICATION_CLEAN_POINTS
            }
        }
        _ => 0.0,
    };
    breakdown.push(CategoryBreakdown {
        category: ScoreCategory::Classification,
        earned: classification_earned,
        available: CLASSIFICATION_WEIGHT,
    });

    // Controls — applicable when any scoreable implementation exists.
    let scoreable: Vec<_> = snapshot
        .controls
        .iter()
        .filter(|c| c.status.is_scoreable())
        .collect();
    if !scoreable.is_empty() {
        let total = scoreable.len() as f64;
        let implemented = scoreable
            .iter()
            .filter(|c| c.status == ImplementationStatus::Implemented)
            .count() as f64;
        let in_progress = scoreable
            .iter()
            .filter(|c| c.status == ImplementationStatus::InProgress)
            .count() as f64;
        let earned = CONTROLS_WEIGHT as f64 * (implemented / total)
            + CONTROLS_IN_PROGRESS_CREDIT * (in_progress / total);
        breakdown.push(CategoryBreakdown {
            category: ScoreCategory::Controls,
            earned,
            available: CONTROLS_WEIGHT,
        });
    }

    // Evidence — applicable when any active record exists.
    let active: Vec<_> = snapshot
        .evidence
        .iter()
        .filter(|e| e.status.is_active())
        .collect();
    if !active.is_empty() {
        let total = active.len() as f64;
        let approved = active
            .iter()
            .filter(|e| e.status == EvidenceStatus::Approved)
            .count() as f64;
        breakdown.push(CategoryBreakdown {
            category: ScoreCategory::Evidence,
            earned: EVIDENCE_WEIGHT as f64 * (approved / total),
            available: EVIDENCE_WEIGHT,
        });
    }

    // Tasks — always applicable.
    let any_overdue = snapshot
        .tasks
        .iter()
        .any(|task| task.is_overdue(snapshot.taken_at));
    breakdown.push(CategoryBreakdown {
        category: ScoreCategory::Tasks,
        earned: if any_overdue { 0.0 } else { TASKS_WEIGHT as f64 },
        available: TASKS_WEIGHT,
    });

    let earned: f64 = breakdown.iter().map(|row| row.earned).sum();
    let available: u32 = breakdown.iter().map(|row| row.available).sum();
    let value = (100.0 * earned / available as f64).round().clamp(0.0, 100.0) as u8;

    ReadinessScore { value, breakdown }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aigrc_core::{
        Classification, ClassifierId, Confidence, ControlCode, ControlImplementation, EvidenceId,
        EvidenceRecord, OrganizationId, RiskLevel, SubjectId, Task, TaskId, TaskPriority,
        TaskStatus, Timestamp,
    };
    use proptest::prelude::*;

    fn snapshot() -> ComplianceSnapshot {
        let mut snap = ComplianceSnapshot::new(SubjectId::new(), OrganizationId::new());
        snap.taken_at = Timestamp::parse("2026-06-01T00:00:00Z").unwrap();
        snap
    }

    fn classified(snap: &mut ComplianceSnapshot, reassess: bool) {
        snap.classification = Some(Classification {
            subject_id: snap.subject_id,
            risk_level: RiskLevel::LimitedRisk,
            confidence: Some(Confidence::High),
            rationale: "test".to_string(),
            version: 1,
            is_current: true,
            created_at: snap.taken_at,
            classifier_id: ClassifierId::new("tester"),
            change_reason: None,
            reassessment_required: reassess,
        });
    }

    fn controls(snap: &mut ComplianceSnapshot, statuses: &[ImplementationStatus]) {
        snap.controls = statuses
            .iter()
            .enumerate()
            .map(|(i, status)| ControlImplementation {
                subject_id: snap.subject_id,
                control_code: ControlCode::new(format!("CTL-{i:02}")),
                status: *status,
                evidence_count: 0,
            })
            .collect();
    }

    fn evidence(snap: &mut ComplianceSnapshot, statuses: &[EvidenceStatus]) {
        snap.evidence = statuses
            .iter()
            .map(|status| EvidenceRecord {
                id: EvidenceId::new(),
                subject_id: snap.subject_id,
                status: *status,
            })
            .collect();
    }

    fn row(result: &ReadinessScore, category: ScoreCategory) -> Option<&CategoryBreakdown> {
        result.breakdown.iter().find(|r| r.category == category)
    }

    // ── Scenario pins ────────────────────────────────────────────────

    #[test]
    fn test_empty_unclassified_snapshot_scores_29() {
        // Only classification (0/25) and tasks (10/10) are applicable:
        // round(100 * 10 / 35) = 29.
        let result = score(&snapshot());
        assert_eq!(result.value, 29);
        assert_eq!(result.breakdown.len(), 2);
    }

    #[test]
    fn test_fully_compliant_snapshot_scores_100() {
        let mut snap = snapshot();
        classified(&mut snap, false);
        controls(&mut snap, &[ImplementationStatus::Implemented; 10]);
        evidence(&mut snap, &[EvidenceStatus::Approved; 5]);
        let result = score(&snap);
        assert_eq!(result.value, 100);
    }

    #[test]
    fn test_all_in_progress_controls_earn_quarter_credit() {
        let mut snap = snapshot();
        controls(&mut snap, &[ImplementationStatus::InProgress; 10]);
        let result = score(&snap);
        let controls_row = row(&result, ScoreCategory::Controls).unwrap();
        assert!((controls_row.earned - 10.0).abs() < f64::EPSILON);
        // Applicable: classification 25 + controls 40 + tasks 10 = 75;
        // earned: 0 + 10 + 10 = 20; round(100*20/75) = 27.
        assert_eq!(result.value, 27);
    }

    #[test]
    fn test_reassessment_flag_earns_15() {
        let mut snap = snapshot();
        classified(&mut snap, true);
        let result = score(&snap);
        let cls = row(&result, ScoreCategory::Classification).unwrap();
        assert!((cls.earned - 15.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_overdue_task_zeroes_tasks_category() {
        let mut snap = snapshot();
        snap.tasks = vec![Task {
            id: TaskId::new(),
            subject_id: snap.subject_id,
            status: TaskStatus::Todo,
            due_date: Some(Timestamp::parse("2026-05-01T00:00:00Z").unwrap()),
            priority: TaskPriority::Medium,
        }];
        let result = score(&snap);
        let tasks = row(&result, ScoreCategory::Tasks).unwrap();
        assert_eq!(tasks.earned, 0.0);
        assert_eq!(result.value, 0);
    }

    // ── Denominator rules ────────────────────────────────────────────

    #[test]
    fn test_not_applicable_controls_excluded_from_denominator() {
        let mut snap = snapshot();
        controls(
            &mut snap,
            &[
                ImplementationStatus::Implemented,
                ImplementationStatus::NotApplicable,
            ],
        );
        let result = score(&snap);
        let controls_row = row(&result, ScoreCategory::Controls).unwrap();
        // 1 of 1 scoreable implemented -> full 40.
        assert!((controls_row.earned - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_only_not_applicable_controls_drop_category() {
        let mut snap = snapshot();
        controls(&mut snap, &[ImplementationStatus::NotApplicable; 3]);
        let result = score(&snap);
        assert!(row(&result, ScoreCategory::Controls).is_none());
    }

    #[test]
    fn test_archived_evidence_excluded_from_denominator() {
        let mut snap = snapshot();
        evidence(
            &mut snap,
            &[
                EvidenceStatus::Approved,
                EvidenceStatus::Archived,
                EvidenceStatus::Archived,
            ],
        );
        let result = score(&snap);
        let evidence_row = row(&result, ScoreCategory::Evidence).unwrap();
        assert!((evidence_row.earned - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_mixed_evidence_earns_proportionally() {
        let mut snap = snapshot();
        evidence(
            &mut snap,
            &[
                EvidenceStatus::Approved,
                EvidenceStatus::Draft,
                EvidenceStatus::Expired,
                EvidenceStatus::Approved,
            ],
        );
        let result = score(&snap);
        let evidence_row = row(&result, ScoreCategory::Evidence).unwrap();
        assert!((evidence_row.earned - 12.5).abs() < f64::EPSILON);
    }

    // ── Wire format ──────────────────────────────────────────────────

    #[test]
    fn test_score_serializes_with_breakdown_rows() {
        let mut snap = snapshot();
        classified(&mut snap, false);
        let json = serde_json::to_value(score(&snap)).unwrap();
        assert!(json["value"].is_u64());
        assert_eq!(
            json["breakdown"][0]["category"],
            serde_json::json!("classification")
        );
    }

    // ── Bounds ───────────────────────────────────────────────────────

    fn impl_status_strategy() -> impl Strategy<Value = ImplementationStatus> {
        prop_oneof![
            Just(ImplementationStatus::NotStarted),
            Just(ImplementationStatus::InProgress),
            Just(ImplementationStatus::Implemented),
            Just(ImplementationStatus::NotApplicable),
        ]
    }

    fn evidence_status_strategy() -> impl Strategy<Value = EvidenceStatus> {
        prop_oneof![
            Just(EvidenceStatus::Draft),
            Just(EvidenceStatus::Approved),
            Just(EvidenceStatus::Expired),
            Just(EvidenceStatus::Archived),
        ]
    }

    proptest! {
        /// The score is always within 0..=100, whatever the snapshot holds.
        #[test]
        fn property_score_is_bounded(
            control_statuses in proptest::collection::vec(impl_status_strategy(), 0..20),
            evidence_statuses in proptest::collection::vec(evidence_status_strategy(), 0..20),
            has_classification in any::<bool>(),
            reassess in any::<bool>(),
            overdue in any::<bool>(),
        ) {
            let mut snap = snapshot();
            if has_classification {
                classified(&mut snap, reassess);
            }
            controls(&mut snap, &control_statuses);
            evidence(&mut snap, &evidence_statuses);
            if overdue {
                snap.tasks = vec![Task {
                    id: TaskId::new(),
                    subject_id: snap.subject_id,
                    status: TaskStatus::Todo,
                    due_date: Some(Timestamp::parse("2026-05-01T00:00:00Z").unwrap()),
                    priority: TaskPriority::High,
                }];
            }
            let result = score(&snap);
            prop_assert!(result.value <= 100);
            let available: u32 = result.breakdown.iter().map(|r| r.available).sum();
            prop_assert!(available >= 35);
        }
    }
}
