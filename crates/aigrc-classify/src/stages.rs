//! # Screening Stages — Four Independent Evaluators
//!
//! Each stage is a pure function from the answer set to a typed finding.
//! Stages never consult each other; the precedence combination lives in
//! `engine.rs`. A stage whose prerequisite answers are absent reports an
//! incomplete finding rather than guessing — the engine degrades those to
//! `needs_review`.
//!
//! ## Stage Rules
//!
//! | Stage | Fires on | Clears on |
//! |-------|----------|-----------|
//! | Definition test | any `yes` (in scope) | all three `no` (out of scope) |
//! | Prohibited | any `yes` OR `unsure` | all eight answered `no` |
//! | High-risk | any `yes` | all nine answered `no` |
//! | Transparency | any `yes` | all five answered (`no`/`unsure`) |
//!
//! The prohibited stage is the only one where `unsure` fires: prohibited
//! practices are forbidden outright, so uncertainty is treated as exposure.

use aigrc_core::{
    AnswerSet, DefinitionIndicator, HighRiskCategory, ProhibitedPractice, QuestionKey,
    TransparencyIndicator, TriState,
};

// ─── Definition Test ─────────────────────────────────────────────────

/// Finding of the AI-system definition test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefinitionFinding {
    /// At least one definition indicator applies; the subject is in scope.
    InScope {
        /// Whether any `unsure` answer was consulted.
        consulted_unsure: bool,
    },
    /// All three indicators answered `no`; classification does not apply.
    OutOfScope,
    /// Indicators missing or only `unsure`; scope cannot be determined.
    NeedsReview,
}

/// Evaluate the AI-system definition test.
///
/// A single `yes` establishes scope regardless of the remaining
/// indicators; the out-of-scope short-circuit requires all three to be
/// answered `no`.
pub fn definition_test(answers: &AnswerSet) -> DefinitionFinding {
    let mut all_no = true;
    let mut any_yes = false;
    let mut any_unsure = false;

    for indicator in DefinitionIndicator::all() {
        match answers.value(QuestionKey::Definition(*indicator)) {
            Some(TriState::Yes) => {
                any_yes = true;
                all_no = false;
            }
            Some(TriState::Unsure) => {
                any_unsure = true;
                all_no = false;
            }
            Some(TriState::No) => {}
            None => {
                all_no = false;
            }
        }
    }

    if any_yes {
        DefinitionFinding::InScope {
            consulted_unsure: any_unsure,
        }
    } else if all_no {
        DefinitionFinding::OutOfScope
    } else {
        DefinitionFinding::NeedsReview
    }
}

// ─── Prohibited-Practice Screening ───────────────────────────────────

/// Finding of the prohibited-practice screening.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProhibitedFinding {
    /// One or more practices answered `yes` or `unsure` — blocked.
    Triggered {
        /// The practices that fired, in canonical order.
        practices: Vec<ProhibitedPractice>,
    },
    /// All eight indicators answered `no`.
    Cleared,
    /// Nothing fired, but not all indicators were answered.
    Incomplete,
}

/// Evaluate the prohibited-practice screening.
///
/// Any `yes` OR `unsure` fires: a practice the respondent cannot rule out
/// is treated as present. The stage clears only when every indicator is
/// answered `no` — an unanswered indicator leaves the screening incomplete.
pub fn prohibited_screening(answers: &AnswerSet) -> ProhibitedFinding {
    let mut practices = Vec::new();
    let mut unanswered = 0usize;

    for practice in ProhibitedPractice::all() {
        match answers.value(QuestionKey::Prohibited(*practice)) {
            Some(TriState::Yes) | Some(TriState::Unsure) => practices.push(*practice),
            Some(TriState::No) => {}
            None => unanswered += 1,
        }
    }

    if !practices.is_empty() {
        ProhibitedFinding::Triggered { practices }
    } else if unanswered == 0 {
        ProhibitedFinding::Cleared
    } else {
        ProhibitedFinding::Incomplete
    }
}

// ─── High-Risk Screening ─────────────────────────────────────────────

/// Finding of the high-risk screening.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HighRiskFinding {
    /// One or more categories answered `yes`.
    Triggered {
        /// The categories that fired, in canonical order.
        categories: Vec<HighRiskCategory>,
        /// Whether any `unsure` answer was also present.
        consulted_unsure: bool,
    },
    /// No `yes`, but one or more categories answered `unsure`.
    Ambiguous {
        /// The categories answered `unsure`, in canonical order.
        categories: Vec<HighRiskCategory>,
    },
    /// All nine categories answered `no`.
    Cleared,
    /// Nothing fired, no `unsure`, but not all categories were answered.
    Incomplete,
}

/// Evaluate the high-risk screening.
///
/// `yes` fires the category; `unsure` without any `yes` makes the finding
/// ambiguous (review required) rather than high-risk.
pub fn high_risk_screening(answers: &AnswerSet) -> HighRiskFinding {
    let mut yes = Vec::new();
    let mut unsure = Vec::new();
    let mut unanswered = 0usize;

    for category in HighRiskCategory::all() {
        match answers.value(QuestionKey::HighRisk(*category)) {
            Some(TriState::Yes) => yes.push(*category),
            Some(TriState::Unsure) => unsure.push(*category),
            Some(TriState::No) => {}
            None => unanswered += 1,
        }
    }

    if !yes.is_empty() {
        HighRiskFinding::Triggered {
            categories: yes,
            consulted_unsure: !unsure.is_empty(),
        }
    } else if !unsure.is_empty() {
        HighRiskFinding::Ambiguous { categories: unsure }
    } else if unanswered == 0 {
        HighRiskFinding::Cleared
    } else {
        HighRiskFinding::Incomplete
    }
}

// ─── Transparency Screening ──────────────────────────────────────────

/// Finding of the transparency screening.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransparencyFinding {
    /// One or more indicators answered `yes` — transparency obligations attach.
    Triggered {
        /// The indicators that fired, in canonical order.
        indicators: Vec<TransparencyIndicator>,
        /// Whether any `unsure` answer was also present.
        consulted_unsure: bool,
    },
    /// All five indicators answered, none `yes`.
    Cleared {
        /// Whether any `unsure` answer was consulted.
        consulted_unsure: bool,
    },
    /// No `yes`, and not all indicators were answered.
    Incomplete,
}

/// Evaluate the transparency screening.
///
/// Independent of the prohibited and high-risk stages: its finding only
/// matters when no higher-precedence stage decided the classification.
/// `unsure` does not fire an obligation, but it is recorded so the engine
/// can grade confidence down.
pub fn transparency_screening(answers: &AnswerSet) -> TransparencyFinding {
    let mut yes = Vec::new();
    let mut any_unsure = false;
    let mut unanswered = 0usize;

    for indicator in TransparencyIndicator::all() {
        match answers.value(QuestionKey::Transparency(*indicator)) {
            Some(TriState::Yes) => yes.push(*indicator),
            Some(TriState::Unsure) => any_unsure = true,
            Some(TriState::No) => {}
            None => unanswered += 1,
        }
    }

    if !yes.is_empty() {
        TransparencyFinding::Triggered {
            indicators: yes,
            consulted_unsure: any_unsure,
        }
    } else if unanswered == 0 {
        TransparencyFinding::Cleared {
            consulted_unsure: any_unsure,
        }
    } else {
        TransparencyFinding::Incomplete
    }
}
