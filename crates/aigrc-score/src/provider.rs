//! # Provider Readiness Scorer — Fixed Weights, No Renormalization
//!
//! Providers of high-risk systems track a different artifact set: the
//! conformity paperwork itself. This scorer aggregates eight fixed-weight
//! obligation categories, each valued `complete` = 100, `in_progress` = 50,
//! `not_started` = 0, weighted-summed directly:
//!
//! ```text
//! value = round(Σ weight_i · credit_i / 100)
//! ```
//!
//! Unlike the general scorer there is NO renormalization: a category with
//! no recorded obligation counts as `not_started` and drags the score
//! down. A provider that has not begun its CE marking is not "not yet
//! applicable" — it is behind. This policy difference is deliberate and
//! must not be "fixed" to match the general scorer.

use serde::{Deserialize, Serialize};

// ─── ProviderCategory ────────────────────────────────────────────────

/// The eight provider obligation categories with fixed weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderCategory {
    /// Technical documentation package.
    TechnicalDocumentation,
    /// Risk management system.
    RiskManagement,
    /// Quality management system.
    QualityManagement,
    /// Conformity assessment procedure.
    ConformityAssessment,
    /// EU declaration of conformity.
    DeclarationOfConformity,
    /// CE marking affixed.
    CeMarking,
    /// Registration in the EU database.
    DatabaseRegistration,
    /// Post-market monitoring system.
    PostMarketMonitoring,
}

/// Total number of provider obligation categories.
pub const PROVIDER_CATEGORY_COUNT: usize = 8;

impl ProviderCategory {
    /// All categories in canonical order.
    pub fn all() -> &'static [ProviderCategory] {
        &[
            Self::TechnicalDocumentation,
            Self::RiskManagement,
            Self::QualityManagement,
            Self::ConformityAssessment,
            Self::DeclarationOfConformity,
            Self::CeMarking,
            Self::DatabaseRegistration,
            Self::PostMarketMonitoring,
        ]
    }

    /// The category's fixed weight. Weights sum to 100.
    pub fn weight(&self) -> u32 {
        match self {
            Self::TechnicalDocumentation => 20,
            Self::RiskManagement => 15,
            Self::QualityManagement => 15,
            Self::ConformityAssessment => 15,
            Self::DeclarationOfConformity => 10,
            Self::CeMarking => 5,
            Self::DatabaseRegistration => 10,
            Self::PostMarketMonitoring => 10,
        }
    }

    /// Returns the snake_case string identifier for this category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TechnicalDocumentation => "technical_documentation",
            Self::RiskManagement => "risk_management",
            Self::QualityManagement => "quality_management",
            Self::ConformityAssessment => "conformity_assessment",
            Self::DeclarationOfConformity => "declaration_of_conformity",
            Self::CeMarking => "ce_marking",
            Self::DatabaseRegistration => "database_registration",
            Self::PostMarketMonitoring => "post_market_monitoring",
        }
    }
}

impl std::fmt::Display for ProviderCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── ObligationState ─────────────────────────────────────────────────

/// Progress state of one provider obligation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObligationState {
    /// The obligation is fully met.
    Complete,
    /// Work is underway.
    InProgress,
    /// No work has started.
    NotStarted,
}

impl ObligationState {
    /// Credit earned, as a percentage of the category weight.
    pub fn credit(&self) -> u32 {
        match self {
            Self::Complete => 100,
            Self::InProgress => 50,
            Self::NotStarted => 0,
        }
    }
}

/// One recorded provider obligation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderObligation {
    /// The obligation category.
    pub category: ProviderCategory,
    /// Its progress state.
    pub state: ObligationState,
}

// ─── Output Types ────────────────────────────────────────────────────

/// Per-category row of the provider score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderCategoryBreakdown {
    /// The obligation category.
    pub category: ProviderCategory,
    /// The state the score was computed from.
    pub state: ObligationState,
    /// The category's fixed weight.
    pub weight: u32,
    /// Points earned: weight · credit / 100.
    pub earned: f64,
}

/// The provider readiness score with all eight category rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderReadinessScore {
    /// Rounded completeness, 0..=100.
    pub value: u8,
    /// One row per category, in canonical order — including categories
    /// with no recorded obligation (counted as not started).
    pub breakdown: Vec<ProviderCategoryBreakdown>,
}

// ─── provider_score ──────────────────────────────────────────────────

/// Compute the provider readiness score.
///
/// Categories absent from `obligations` count as `not_started`; when a
/// category appears more than once, the last entry wins (the adapter
/// supplies the latest state last).
pub fn provider_score(obligations: &[ProviderObligation]) -> ProviderReadinessScore {
    let state_of = |category: ProviderCategory| {
        obligations
            .iter()
            .rev()
            .find(|o| o.category == category)
            .map(|o| o.state)
            .unwrap_or(ObligationState::NotStarted)
    };

    let breakdown: Vec<ProviderCategoryBreakdown> = ProviderCategory::all()
        .iter()
        .map(|category| {
            let state = state_of(*category);
            let weight = category.weight();
            ProviderCategoryBreakdown {
                category: *category,
                state,
                weight,
                earned: weight as f64 * state.credit() as f64 / 100.0,
            }
        })
        .collect();

    let value = breakdown
        .iter()
        .map(|row| row.earned)
        .sum::<f64>()
        .round()
        .clamp(0.0, 100.0) as u8;

    ProviderReadinessScore { value, breakdown }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_in(state: ObligationState) -> Vec<ProviderObligation> {
        ProviderCategory::all()
            .iter()
            .map(|category| ProviderObligation {
                category: *category,
                state,
            })
            .collect()
    }

    #[test]
    fn test_weights_sum_to_100() {
        let total: u32 = ProviderCategory::all().iter().map(|c| c.weight()).sum();
        assert_eq!(total, 100);
        assert_eq!(ProviderCategory::all().len(), PROVIDER_CATEGORY_COUNT);
    }

    #[test]
    fn test_all_complete_scores_100() {
        assert_eq!(provider_score(&all_in(ObligationState::Complete)).value, 100);
    }

    #[test]
    fn test_all_in_progress_scores_50() {
        assert_eq!(
            provider_score(&all_in(ObligationState::InProgress)).value,
            50
        );
    }

    #[test]
    fn test_empty_input_scores_0_with_full_breakdown() {
        // No renormalization: unrecorded categories count as not started.
        let result = provider_score(&[]);
        assert_eq!(result.value, 0);
        assert_eq!(result.breakdown.len(), PROVIDER_CATEGORY_COUNT);
        for row in &result.breakdown {
            assert_eq!(row.state, ObligationState::NotStarted);
            assert_eq!(row.earned, 0.0);
        }
    }

    #[test]
    fn test_single_complete_category_earns_its_weight_only() {
        let result = provider_score(&[ProviderObligation {
            category: ProviderCategory::TechnicalDocumentation,
            state: ObligationState::Complete,
        }]);
        assert_eq!(result.value, 20);
    }

    #[test]
    fn test_half_credit_rounds() {
        // CE marking (5) in progress earns 2.5, alone -> rounds to 3.
        let result = provider_score(&[ProviderObligation {
            category: ProviderCategory::CeMarking,
            state: ObligationState::InProgress,
        }]);
        assert_eq!(result.value, 3);
    }

    #[test]
    fn test_last_entry_wins_on_duplicates() {
        let result = provider_score(&[
            ProviderObligation {
                category: ProviderCategory::RiskManagement,
                state: ObligationState::NotStarted,
            },
            ProviderObligation {
                category: ProviderCategory::RiskManagement,
                state: ObligationState::Complete,
            },
        ]);
        assert_eq!(result.value, 15);
    }

    #[test]
    fn test_breakdown_is_in_canonical_order() {
        let result = provider_score(&[]);
        let categories: Vec<ProviderCategory> =
            result.breakdown.iter().map(|row| row.category).collect();
        assert_eq!(categories, ProviderCategory::all().to_vec());
    }

    #[test]
    fn test_mixed_states_weighted_sum() {
        // tech docs complete (20) + risk mgmt in progress (7.5)
        // + conformity complete (15) = 42.5 -> 43.
        let result = provider_score(&[
            ProviderObligation {
                category: ProviderCategory::TechnicalDocumentation,
                state: ObligationState::Complete,
            },
            ProviderObligation {
                category: ProviderCategory::RiskManagement,
                state: ObligationState::InProgress,
            },
            ProviderObligation {
                category: ProviderCategory::ConformityAssessment,
                state: ObligationState::Complete,
            },
        ]);
        assert_eq!(result.value, 43);
    }
}
