//! # Classification Engine — Precedence Combination
//!
//! `classify()` runs the four screening stages over an answer set and
//! combines their findings under the precedence order defined on
//! [`RiskLevel`]:
//!
//! ```text
//! prohibited > needs_review > high_risk_candidate
//!            > limited_risk > minimal_risk > not_classified
//! ```
//!
//! Two short circuits sit in front of the combination: an empty answer set
//! is `not_classified`, and an out-of-scope definition test is
//! `minimal_risk` without consulting the later stages. A triggered
//! prohibited screening overrides every later stage.
//!
//! ## Confidence Grading
//!
//! - `low` — the outcome is `prohibited` or `needs_review`.
//! - `medium` — an `unsure` answer was consulted but did not escalate the
//!   level on its own.
//! - `high` — only definite answers were consulted.

use serde::{Deserialize, Serialize};

use aigrc_core::{AnswerSet, Confidence, RiskLevel};

use crate::stages::{
    definition_test, high_risk_screening, prohibited_screening, transparency_screening,
    DefinitionFinding, HighRiskFinding, ProhibitedFinding, TransparencyFinding,
};

// ─── Outcome Types ───────────────────────────────────────────────────

/// Why the caller should open a review task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EscalationReason {
    /// A prohibited-practice indicator fired; legal review is mandatory.
    ProhibitedPractice,
    /// Screening was incomplete or ambiguous; an assessor must finish it.
    ReviewRequired,
}

/// Signal that the caller should create a review task.
///
/// The engine never creates the task itself — it is a pure function, and
/// task creation belongs to the module that owns tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Escalation {
    /// Why escalation is required.
    pub reason: EscalationReason,
    /// Human-readable detail for the review task body.
    pub detail: String,
}

/// The result of classifying one answer set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationOutcome {
    /// The combined risk level.
    pub risk_level: RiskLevel,
    /// Confidence grade; `None` only for `not_classified`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<Confidence>,
    /// Human-auditable explanation of how the level was reached.
    pub rationale: String,
    /// Present when the caller should open a review task.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub escalation: Option<Escalation>,
}

// ─── classify ────────────────────────────────────────────────────────

/// Classify a subject from its screening answers.
///
/// Pure function: same answers, same outcome. Missing answers degrade the
/// affected stages to `needs_review` rather than erroring.
pub fn classify(answers: &AnswerSet) -> ClassificationOutcome {
    if answers.is_empty() {
        return ClassificationOutcome {
            risk_level: RiskLevel::NotClassified,
            confidence: None,
            rationale: "no screening answers recorded for this subject".to_string(),
            escalation: None,
        };
    }

    // Stage 1 — definition test. Out of scope short-circuits everything.
    let definition = definition_test(answers);
    if definition == DefinitionFinding::OutOfScope {
        return ClassificationOutcome {
            risk_level: RiskLevel::MinimalRisk,
            confidence: Some(Confidence::High),
            rationale: "definition test: no autonomy, inference, or adaptiveness — \
                        subject is out of scope"
                .to_string(),
            escalation: None,
        };
    }

    // Stage 2 — prohibited screening. A trigger overrides stages 3-4.
    let prohibited = prohibited_screening(answers);
    if let ProhibitedFinding::Triggered { practices } = &prohibited {
        let names: Vec<&str> = practices.iter().map(|p| p.as_str()).collect();
        let detail = format!("prohibited practices flagged: {}", names.join(", "));
        tracing::debug!(practices = ?names, "prohibited screening fired");
        return ClassificationOutcome {
            risk_level: RiskLevel::Prohibited,
            confidence: Some(Confidence::Low),
            rationale: detail.clone(),
            escalation: Some(Escalation {
                reason: EscalationReason::ProhibitedPractice,
                detail,
            }),
        };
    }

    let high_risk = high_risk_screening(answers);
    let transparency = transparency_screening(answers);

    // Combine remaining findings under the precedence order.
    let mut level = RiskLevel::MinimalRisk;
    let mut consulted_unsure = false;
    let mut reasons: Vec<String> = Vec::new();
    let mut review_reasons: Vec<String> = Vec::new();

    // OutOfScope and Triggered were handled by the short circuits above;
    // only the remaining findings reach the combination.
    if let DefinitionFinding::InScope {
        consulted_unsure: unsure,
    } = &definition
    {
        consulted_unsure |= unsure;
    }
    if definition == DefinitionFinding::NeedsReview {
        level = level.escalate(RiskLevel::NeedsReview);
        review_reasons.push("definition test incomplete or inconclusive".to_string());
    }

    if prohibited == ProhibitedFinding::Incomplete {
        level = level.escalate(RiskLevel::NeedsReview);
        review_reasons.push("prohibited-practice screening incomplete".to_string());
    }

    match &high_risk {
        HighRiskFinding::Triggered {
            categories,
            consulted_unsure: unsure,
        } => {
            level = level.escalate(RiskLevel::HighRiskCandidate);
            consulted_unsure |= unsure;
            let names: Vec<&str> = categories.iter().map(|c| c.as_str()).collect();
            reasons.push(format!("high-risk categories: {}", names.join(", ")));
        }
        HighRiskFinding::Ambiguous { categories } => {
            level = level.escalate(RiskLevel::NeedsReview);
            let names: Vec<&str> = categories.iter().map(|c| c.as_str()).collect();
            review_reasons.push(format!(
                "high-risk screening unresolved for: {}",
                names.join(", ")
            ));
        }
        HighRiskFinding::Cleared => {}
        HighRiskFinding::Incomplete => {
            level = level.escalate(RiskLevel::NeedsReview);
            review_reasons.push("high-risk screening incomplete".to_string());
        }
    }

    match &transparency {
        TransparencyFinding::Triggered {
            indicators,
            consulted_unsure: unsure,
        } => {
            level = level.escalate(RiskLevel::LimitedRisk);
            consulted_unsure |= unsure;
            let names: Vec<&str> = indicators.iter().map(|t| t.as_str()).collect();
            reasons.push(format!("transparency indicators: {}", names.join(", ")));
        }
        TransparencyFinding::Cleared {
            consulted_unsure: unsure,
        } => {
            consulted_unsure |= unsure;
        }
        TransparencyFinding::Incomplete => {
            level = level.escalate(RiskLevel::NeedsReview);
            review_reasons.push("transparency screening incomplete".to_string());
        }
    }

    if level == RiskLevel::NeedsReview {
        let detail = review_reasons.join("; ");
        let mut rationale = detail.clone();
        if !reasons.is_empty() {
            rationale = format!("{rationale}; pending findings: {}", reasons.join("; "));
        }
        return ClassificationOutcome {
            risk_level: RiskLevel::NeedsReview,
            confidence: Some(Confidence::Low),
            rationale,
            escalation: Some(Escalation {
                reason: EscalationReason::ReviewRequired,
                detail,
            }),
        };
    }

    let confidence = if consulted_unsure {
        Confidence::Medium
    } else {
        Confidence::High
    };
    let rationale = if reasons.is_empty() {
        "all screenings cleared; no risk-elevating indicator applies".to_string()
    } else {
        reasons.join("; ")
    };

    ClassificationOutcome {
        risk_level: level,
        confidence: Some(confidence),
        rationale,
        escalation: None,
    }
}
