//! # aigrc-engine — Recompute Facade and Assessment Flow
//!
//! Composes the four read-only components (classification, control
//! resolution, gap detection, readiness scoring) behind one explicit,
//! stateless entry point:
//!
//! ```text
//! recompute(snapshot, catalog) -> ComplianceReport
//! ```
//!
//! There is no caching layer and no background computation — every report
//! is recomputed fresh from the snapshot it is handed. An adapter that
//! wants to memoize keys its cache by `ComplianceSnapshot::fingerprint()`
//! and stays entirely outside the engine.
//!
//! The one stateful operation, committing a classification to the
//! versioned history, goes through [`Engine::assess`], which wraps the
//! `aigrc-ledger` commit and then produces a fresh report.
//!
//! ## Concurrency
//!
//! `recompute` borrows the snapshot immutably and touches no shared
//! state; callers may fan out resolver, gap detection, and scoring over
//! the same snapshot from multiple threads. Only the ledger serializes
//! writers, per subject, at the store boundary.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use aigrc_classify::{classify, ClassificationOutcome};
use aigrc_controls::{Catalog, ControlCatalogEntry};
use aigrc_core::{
    AigrcError, Classification, ClassifierId, ComplianceSnapshot, ContentDigest, SubjectId,
};
use aigrc_gaps::{detect_gaps, GapItem};
use aigrc_ledger::{ClassificationLedger, LedgerError};
use aigrc_score::{score, ReadinessScore};

// ─── Errors ──────────────────────────────────────────────────────────

/// Errors surfaced by the engine facade.
#[derive(Error, Debug)]
pub enum EngineError {
    /// The snapshot failed boundary validation.
    #[error(transparent)]
    Snapshot(#[from] AigrcError),

    /// The history ledger rejected the commit.
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

// ─── Report ──────────────────────────────────────────────────────────

/// Everything the reporting adapter needs for one subject, computed from
/// one snapshot. Derived and ephemeral — never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceReport {
    /// The subject the report describes.
    pub subject_id: SubjectId,
    /// Content fingerprint of the snapshot the report was computed from.
    pub snapshot_fingerprint: ContentDigest,
    /// Fresh classification of the snapshot's answers.
    pub classification: ClassificationOutcome,
    /// The applicable control subset for the fresh classification.
    pub resolved_controls: Vec<ControlCatalogEntry>,
    /// Detected deficiencies, severity-ordered.
    pub gaps: Vec<GapItem>,
    /// The general readiness score with its breakdown.
    pub readiness: ReadinessScore,
}

/// Recompute the full compliance view of one snapshot.
///
/// Validates the snapshot, classifies its answers, resolves the
/// applicable controls for the fresh classification, detects gaps, and
/// scores readiness. Pure: equal snapshots produce equal reports.
///
/// # Errors
///
/// Returns [`EngineError::Snapshot`] when the snapshot fails boundary
/// validation; every component downstream of validation is total.
pub fn recompute(
    snapshot: &ComplianceSnapshot,
    catalog: &Catalog,
) -> Result<ComplianceReport, EngineError> {
    snapshot.validate()?;
    let snapshot_fingerprint = snapshot.fingerprint()?;

    let classification = classify(&snapshot.answers);
    let resolved_controls: Vec<ControlCatalogEntry> = catalog
        .resolve(classification.risk_level, snapshot.vendor_based)
        .into_iter()
        .cloned()
        .collect();
    let gaps = detect_gaps(snapshot, catalog);
    let readiness = score(snapshot);

    Ok(ComplianceReport {
        subject_id: snapshot.subject_id,
        snapshot_fingerprint,
        classification,
        resolved_controls,
        gaps,
        readiness,
    })
}

// ─── Engine ──────────────────────────────────────────────────────────

/// Result of a full assessment: the committed history row plus the fresh
/// report.
#[derive(Debug, Clone)]
pub struct AssessmentResult {
    /// The classification row committed to the history ledger.
    pub committed: Classification,
    /// The report recomputed from the snapshot.
    pub report: ComplianceReport,
}

/// The engine: the ledger for the one stateful operation, plus the
/// catalog every read-only component resolves against.
#[derive(Clone)]
pub struct Engine {
    ledger: ClassificationLedger,
    catalog: Catalog,
}

impl Engine {
    /// Create an engine over an injected ledger and catalog.
    pub fn new(ledger: ClassificationLedger, catalog: Catalog) -> Self {
        Self { ledger, catalog }
    }

    /// Create an engine with an in-memory ledger and the default catalog.
    pub fn in_memory() -> Self {
        Self::new(ClassificationLedger::in_memory(), Catalog::default())
    }

    /// The ledger this engine commits through.
    pub fn ledger(&self) -> &ClassificationLedger {
        &self.ledger
    }

    /// The catalog this engine resolves against.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Recompute the compliance view of a snapshot (read-only).
    pub fn recompute(&self, snapshot: &ComplianceSnapshot) -> Result<ComplianceReport, EngineError> {
        recompute(snapshot, &self.catalog)
    }

    /// Classify the snapshot's answers and commit the outcome as the
    /// subject's next classification version, then report.
    ///
    /// Re-assessment is the same call with a `change_reason` — history is
    /// append-only and never mutated.
    pub fn assess(
        &self,
        snapshot: &ComplianceSnapshot,
        classifier_id: ClassifierId,
        change_reason: Option<String>,
    ) -> Result<AssessmentResult, EngineError> {
        snapshot.validate().map_err(EngineError::Snapshot)?;
        let outcome = classify(&snapshot.answers);
        let committed =
            self.ledger
                .commit(snapshot.subject_id, &outcome, classifier_id, change_reason)?;
        let report = self.recompute(snapshot)?;
        Ok(AssessmentResult { committed, report })
    }
}
