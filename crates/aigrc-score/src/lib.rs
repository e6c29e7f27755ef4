//! # aigrc-score — Readiness Scorers
//!
//! Aggregates a compliance snapshot into a single 0–100 completeness
//! number, two ways:
//!
//! - **General scorer** (`readiness.rs`): four weighted categories
//!   (classification 25, controls 40, evidence 25, tasks 10) with partial
//!   credit and implicit renormalization — categories with nothing to
//!   score are excluded from both numerator and denominator.
//!
//! - **Provider scorer** (`provider.rs`): eight fixed-weight provider
//!   obligations, weighted-summed directly with NO renormalization. The
//!   policy difference from the general scorer is intentional and pinned
//!   by tests.
//!
//! ## Crate Policy
//!
//! Scores are ephemeral computation outputs: never persisted, always
//! recomputed from the latest snapshot. Both scorers are total functions
//! and read time only from `snapshot.taken_at`.

pub mod provider;
pub mod readiness;

pub use provider::{
    provider_score, ObligationState, ProviderCategory, ProviderCategoryBreakdown,
    ProviderObligation, ProviderReadinessScore, PROVIDER_CATEGORY_COUNT,
};
pub use readiness::{score, CategoryBreakdown, ReadinessScore, ScoreCategory};
