//! # Gap Detection Rules
//!
//! `detect_gaps()` runs every rule independently over the snapshot and
//! concatenates their findings — rules never suppress each other, so a
//! subject can surface classification, control, evidence, task, fria, and
//! training gaps at the same time. Output is sorted by severity, then
//! category, then id, so the same snapshot always yields the same list.
//!
//! ## Rules
//!
//! | Rule | Fires | Severity |
//! |------|-------|----------|
//! | missing classification | no classification or `not_classified` | critical |
//! | reassessment flagged | `reassessment_required` on the current row | high |
//! | nothing started | every scoreable control `not_started` | critical (aggregate) |
//! | critical control idle | `not_started` control tagged `high_risk` or category deployer | high (per control) |
//! | control underway | `in_progress` control | low (per control) |
//! | no evidence | zero evidence records | high |
//! | unreviewed evidence | any `draft` evidence | medium (aggregate) |
//! | expired evidence | each `expired` record | high (per record) |
//! | overdue task | open task past due | high/medium by priority |
//! | fria outstanding | level is `high_risk_candidate` | high |
//! | training idle | no resolved training control implemented | medium (aggregate) |

use aigrc_core::{
    ComplianceSnapshot, EvidenceStatus, ImplementationStatus, RiskLevel, TaskPriority,
};
use aigrc_controls::{ApplicabilityTag, Catalog, ControlCategory};

use crate::gap::{GapCategory, GapItem, GapSeverity};

/// Detect all gaps in a snapshot.
///
/// Pure: overdue checks use `snapshot.taken_at` as the reference time, so
/// the same snapshot yields the same gaps regardless of when detection
/// runs.
pub fn detect_gaps(snapshot: &ComplianceSnapshot, catalog: &Catalog) -> Vec<GapItem> {
    let mut gaps = Vec::new();

    classification_gaps(snapshot, &mut gaps);
    control_gaps(snapshot, catalog, &mut gaps);
    evidence_gaps(snapshot, &mut gaps);
    task_gaps(snapshot, &mut gaps);
    fria_gaps(snapshot, &mut gaps);
    training_gaps(snapshot, catalog, &mut gaps);

    gaps.sort_by(|a, b| {
        a.severity
            .cmp(&b.severity)
            .then(a.category.cmp(&b.category))
            .then(a.id.cmp(&b.id))
    });
    gaps
}

/// The current risk level, treating an absent classification as unclassified.
fn risk_level(snapshot: &ComplianceSnapshot) -> RiskLevel {
    snapshot
        .classification
        .as_ref()
        .map(|c| c.risk_level)
        .unwrap_or(RiskLevel::NotClassified)
}

// ─── Classification ──────────────────────────────────────────────────

fn classification_gaps(snapshot: &ComplianceSnapshot, gaps: &mut Vec<GapItem>) {
    if !risk_level(snapshot).is_classified() {
        gaps.push(GapItem {
            id: "classification.missing".to_string(),
            category: GapCategory::Classification,
            severity: GapSeverity::Critical,
            title: "System not classified".to_string(),
            description: "No risk classification exists for this subject; no obligation \
                          set can be derived."
                .to_string(),
            action_hint: "Complete the screening questionnaire and run classification."
                .to_string(),
            related_entity_id: None,
        });
        return;
    }

    if snapshot
        .classification
        .as_ref()
        .is_some_and(|c| c.reassessment_required)
    {
        gaps.push(GapItem {
            id: "classification.reassessment".to_string(),
            category: GapCategory::Classification,
            severity: GapSeverity::High,
            title: "Classification flagged for reassessment".to_string(),
            description: "A material change invalidated the current classification."
                .to_string(),
            action_hint: "Re-run the screening and commit a new classification version."
                .to_string(),
            related_entity_id: None,
        });
    }
}

// ─── Controls ────────────────────────────────────────────────────────

fn control_gaps(snapshot: &ComplianceSnapshot, catalog: &Catalog, gaps: &mut Vec<GapItem>) {
    let scoreable: Vec<_> = snapshot
        .controls
        .iter()
        .filter(|c| c.status.is_scoreable())
        .collect();
    if scoreable.is_empty() {
        return;
    }

    if scoreable
        .iter()
        .all(|c| c.status == ImplementationStatus::NotStarted)
    {
        gaps.push(GapItem {
            id: "control.all_not_started".to_string(),
            category: GapCategory::Control,
            severity: GapSeverity::Critical,
            title: "No control implementation started".to_string(),
            description: format!(
                "All {} applicable controls are not started.",
                scoreable.len()
            ),
            action_hint: "Prioritize the high-risk and deployer controls and begin \
                          implementation."
                .to_string(),
            related_entity_id: None,
        });
        return;
    }

    for control in &scoreable {
        match control.status {
            ImplementationStatus::NotStarted => {
                let Some(entry) = catalog.get(&control.control_code) else {
                    continue;
                };
                let critical_obligation = entry.applies_to.contains(&ApplicabilityTag::HighRisk)
                    || entry.category == ControlCategory::Deployer;
                if critical_obligation {
                    gaps.push(GapItem {
                        id: format!("control.not_started.{}", control.control_code),
                        category: GapCategory::Control,
                        severity: GapSeverity::High,
                        title: format!("Control {} not started", control.control_code),
                        description: format!(
                            "{} ({}) is applicable and has no implementation work.",
                            entry.name, entry.code
                        ),
                        action_hint: "Assign an owner and start implementation.".to_string(),
                        related_entity_id: Some(control.control_code.as_str().to_string()),
                    });
                }
            }
            ImplementationStatus::InProgress => {
                gaps.push(GapItem {
                    id: format!("control.in_progress.{}", control.control_code),
                    category: GapCategory::Control,
                    severity: GapSeverity::Low,
                    title: format!("Control {} in progress", control.control_code),
                    description: "Implementation is underway but not complete.".to_string(),
                    action_hint: "Finish implementation and attach evidence.".to_string(),
                    related_entity_id: Some(control.control_code.as_str().to_string()),
                });
            }
            ImplementationStatus::Implemented | ImplementationStatus::NotApplicable => {}
        }
    }
}

// ─── Evidence ────────────────────────────────────────────────────────

fn evidence_gaps(snapshot: &ComplianceSnapshot, gaps: &mut Vec<GapItem>) {
    if snapshot.evidence.is_empty() {
        gaps.push(GapItem {
            id: "evidence.none".to_string(),
            category: GapCategory::Evidence,
            severity: GapSeverity::High,
            title: "No evidence on file".to_string(),
            description: "The subject has no evidence records at all.".to_string(),
            action_hint: "Upload evidence for the implemented controls.".to_string(),
            related_entity_id: None,
        });
        return;
    }

    let draft_count = snapshot
        .evidence
        .iter()
        .filter(|e| e.status == EvidenceStatus::Draft)
        .count();
    if draft_count > 0 {
        gaps.push(GapItem {
            id: "evidence.draft".to_string(),
            category: GapCategory::Evidence,
            severity: GapSeverity::Medium,
            title: "Evidence awaiting review".to_string(),
            description: format!("{draft_count} evidence record(s) are still in draft."),
            action_hint: "Review and approve or reject the draft evidence.".to_string(),
            related_entity_id: None,
        });
    }

    for record in &snapshot.evidence {
        if record.status == EvidenceStatus::Expired {
            gaps.push(GapItem {
                id: format!("evidence.expired.{}", record.id.as_uuid()),
                category: GapCategory::Evidence,
                severity: GapSeverity::High,
                title: "Evidence expired".to_string(),
                description: "An evidence record is past its validity window.".to_string(),
                action_hint: "Refresh the evidence and re-submit for approval.".to_string(),
                related_entity_id: Some(record.id.to_string()),
            });
        }
    }
}

// ─── Tasks ───────────────────────────────────────────────────────────

fn task_gaps(snapshot: &ComplianceSnapshot, gaps: &mut Vec<GapItem>) {
    for task in &snapshot.tasks {
        if task.is_overdue(snapshot.taken_at) {
            let severity = if task.priority == TaskPriority::High {
                GapSeverity::High
            } else {
                GapSeverity::Medium
            };
            gaps.push(GapItem {
                id: format!("task.overdue.{}", task.id.as_uuid()),
                category: GapCategory::Task,
                severity,
                title: "Remediation task overdue".to_string(),
                description: format!(
                    "Task is {} and past its due date.",
                    task.status.as_str()
                ),
                action_hint: "Complete the task or re-plan its due date.".to_string(),
                related_entity_id: Some(task.id.to_string()),
            });
        }
    }
}

// ─── FRIA ────────────────────────────────────────────────────────────

fn fria_gaps(snapshot: &ComplianceSnapshot, gaps: &mut Vec<GapItem>) {
    if risk_level(snapshot) == RiskLevel::HighRiskCandidate {
        gaps.push(GapItem {
            id: "fria.outstanding".to_string(),
            category: GapCategory::Fria,
            severity: GapSeverity::High,
            title: "Impact assessment may be outstanding".to_string(),
            description: "High-risk subjects require a fundamental-rights impact \
                          assessment before deployment."
                .to_string(),
            action_hint: "Complete and document the impact assessment.".to_string(),
            related_entity_id: None,
        });
    }
}

// ─── Training ────────────────────────────────────────────────────────

fn training_gaps(snapshot: &ComplianceSnapshot, catalog: &Catalog, gaps: &mut Vec<GapItem>) {
    let training_controls: Vec<_> = snapshot
        .controls
        .iter()
        .filter(|c| {
            catalog
                .get(&c.control_code)
                .is_some_and(|entry| entry.category == ControlCategory::Training)
        })
        .filter(|c| c.status.is_scoreable())
        .collect();

    if !training_controls.is_empty()
        && !training_controls
            .iter()
            .any(|c| c.status == ImplementationStatus::Implemented)
    {
        gaps.push(GapItem {
            id: "training.not_implemented".to_string(),
            category: GapCategory::Training,
            severity: GapSeverity::Medium,
            title: "AI literacy training not in place".to_string(),
            description: "No applicable training control has been implemented.".to_string(),
            action_hint: "Roll out the AI literacy programme to staff operating the system."
                .to_string(),
            related_entity_id: None,
        });
    }
}
