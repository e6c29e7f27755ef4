//! # aigrc-classify — Classification Engine
//!
//! Evaluates a subject's screening answers through four sequential stages
//! and produces a risk classification with confidence, rationale, and an
//! optional escalation signal:
//!
//! - **Stages** (`stages.rs`): the four stage evaluators — AI-system
//!   definition test, prohibited-practice screening, high-risk screening,
//!   and transparency screening — each a pure function over the answer set.
//!
//! - **Engine** (`engine.rs`): `classify()`, combining stage findings by
//!   precedence and grading confidence from the `unsure` answers consulted.
//!
//! ## Crate Policy
//!
//! - `classify()` is a pure function: no I/O, no clock reads, no side
//!   effects. Committing the result to history is `aigrc-ledger`'s job,
//!   and raising a review task is the caller's, signaled via `escalation`.
//! - Incomplete input never errors; stages degrade to `needs_review`.

pub mod engine;
pub mod stages;

pub use engine::{classify, ClassificationOutcome, Escalation, EscalationReason};
pub use stages::{
    definition_test, high_risk_screening, prohibited_screening, transparency_screening,
    DefinitionFinding, HighRiskFinding, ProhibitedFinding, TransparencyFinding,
};
