//! # aigrc-core — Foundational Types for the Compliance Engine
//!
//! This crate is the bedrock of the aigrc workspace. It defines the data
//! model shared by every engine component: screening answers, classification
//! records, compliance artifacts, and the point-in-time snapshot the engine
//! is evaluated over. Every other crate in the workspace depends on
//! `aigrc-core`; it depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for domain primitives.** `SubjectId`,
//!    `OrganizationId`, `EvidenceId`, `TaskId`, `ClassifierId`,
//!    `ControlCode` — no bare strings or UUIDs for identifiers.
//!
//! 2. **Closed enums at the adapter boundary.** Screening questions, risk
//!    levels, artifact statuses, and severities are closed tagged enums.
//!    Unknown tags are a deserialization error, never passed through.
//!
//! 3. **UTC-only timestamps.** The `Timestamp` type enforces UTC with
//!    seconds precision, so audit-trail ordering and overdue checks are
//!    deterministic regardless of the store's timezone hygiene.
//!
//! 4. **Snapshot in, result out.** `ComplianceSnapshot` is the single input
//!    bundle every engine component reads. It validates itself once at the
//!    adapter boundary; downstream components treat it as well-formed.
//!
//! 5. **Canonical digests for external caches.** `ComplianceSnapshot::fingerprint()`
//!    flows through `CanonicalBytes` — the engine itself never memoizes.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `aigrc-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All public types derive `Debug`, `Clone`, and implement
//!   `Serialize`/`Deserialize`.

pub mod answer;
pub mod artifact;
pub mod classification;
pub mod digest;
pub mod error;
pub mod identity;
pub mod snapshot;
pub mod temporal;

// Re-export primary types for ergonomic imports.
pub use answer::{
    Answer, AnswerSet, DefinitionIndicator, HighRiskCategory, ProhibitedPractice, QuestionKey,
    TransparencyIndicator, TriState, DEFINITION_INDICATOR_COUNT, HIGH_RISK_CATEGORY_COUNT,
    PROHIBITED_PRACTICE_COUNT, TRANSPARENCY_INDICATOR_COUNT,
};
pub use artifact::{
    ControlImplementation, EvidenceRecord, EvidenceStatus, ImplementationStatus, Task,
    TaskPriority, TaskStatus,
};
pub use classification::{Classification, Confidence, RiskLevel};
pub use digest::{sha256_digest, CanonicalBytes, ContentDigest};
pub use error::{AigrcError, CanonicalizationError};
pub use identity::{ClassifierId, ControlCode, EvidenceId, OrganizationId, SubjectId, TaskId};
pub use snapshot::ComplianceSnapshot;
pub use temporal::Timestamp;
