//! # Classification Ledger — Commit and Integrity-Verified Reads
//!
//! `ClassificationLedger` turns a classification outcome into the next
//! immutable history row: read the current max version, append `max + 1`
//! as the new current row, and retry under optimistic concurrency when a
//! concurrent writer wins the race. Re-assessment always goes through
//! `commit` — there is no code path that mutates an existing row.
//!
//! ## Integrity
//!
//! Every read re-verifies the history before trusting it: more than one
//! current row, a missing current row, a version gap, or a version 0 row
//! is a fatal `HistoryIntegrityError`. These states cannot be produced
//! through this ledger; observing one means the store was corrupted out of
//! band, and serving reads from it would poison the audit trail.

use std::sync::Arc;

use thiserror::Error;

use aigrc_classify::ClassificationOutcome;
use aigrc_core::{Classification, ClassifierId, SubjectId, Timestamp};

use crate::store::{ClassificationStore, StoreError};

/// Maximum `commit` attempts before a version conflict is surfaced.
pub const MAX_COMMIT_ATTEMPTS: u32 = 3;

// ─── Errors ──────────────────────────────────────────────────────────

/// Fatal inconsistencies detected in a subject's stored history.
#[derive(Error, Debug)]
pub enum HistoryIntegrityError {
    /// More than one row is marked current.
    #[error("history for {subject} has {count} current rows, expected exactly 1")]
    MultipleCurrent {
        /// The corrupted subject.
        subject: String,
        /// How many rows claim to be current.
        count: usize,
    },

    /// A non-empty history has no current row, or the current row is not
    /// the latest version.
    #[error("history for {subject} has no authoritative current row")]
    NoCurrent {
        /// The corrupted subject.
        subject: String,
    },

    /// Versions do not form the contiguous sequence 1..=n.
    #[error("history for {subject} has a version gap: expected {expected}, found {found}")]
    VersionGap {
        /// The corrupted subject.
        subject: String,
        /// The version that should appear at this position.
        expected: u32,
        /// The version that actually appears.
        found: u32,
    },
}

/// Errors surfaced by ledger operations.
#[derive(Error, Debug)]
pub enum LedgerError {
    /// The stored history is corrupt; no read from it can be trusted.
    #[error("history integrity violation: {0}")]
    HistoryIntegrity(#[from] HistoryIntegrityError),

    /// Concurrent writers exhausted the bounded retries.
    #[error("version conflict for {subject} persisted after {attempts} attempts")]
    VersionConflict {
        /// The contended subject.
        subject: String,
        /// How many attempts were made.
        attempts: u32,
    },

    /// The store failed for a non-conflict reason.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

// ─── Ledger ──────────────────────────────────────────────────────────

/// The classification history ledger for all subjects.
///
/// Cheap to clone; clones share the underlying store.
#[derive(Clone)]
pub struct ClassificationLedger {
    store: Arc<dyn ClassificationStore>,
}

impl ClassificationLedger {
    /// Create a ledger over an injected store.
    pub fn new(store: Arc<dyn ClassificationStore>) -> Self {
        Self { store }
    }

    /// Create a ledger backed by a fresh in-memory store.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(crate::store::InMemoryClassificationStore::new()))
    }

    /// Commit a classification outcome as the subject's next version.
    ///
    /// Reads the current max version, appends `max + 1` as the new current
    /// row, and retries up to [`MAX_COMMIT_ATTEMPTS`] times when a
    /// concurrent writer causes a version conflict. Conflicts inside the
    /// retry budget are logged, not surfaced.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::HistoryIntegrity`] if the stored history is corrupt.
    /// - [`LedgerError::VersionConflict`] if retries are exhausted.
    /// - [`LedgerError::Store`] on backend failure.
    pub fn commit(
        &self,
        subject_id: SubjectId,
        outcome: &ClassificationOutcome,
        classifier_id: ClassifierId,
        change_reason: Option<String>,
    ) -> Result<Classification, LedgerError> {
        for attempt in 1..=MAX_COMMIT_ATTEMPTS {
            let history = self.store.history(&subject_id)?;
            verify_history(&subject_id, &history)?;

            let next_version = history.iter().map(|row| row.version).max().unwrap_or(0) + 1;
            let row = Classification {
                subject_id,
                risk_level: outcome.risk_level,
                confidence: outcome.confidence,
                rationale: outcome.rationale.clone(),
                version: next_version,
                is_current: true,
                created_at: Timestamp::now(),
                classifier_id: classifier_id.clone(),
                change_reason: change_reason.clone(),
                reassessment_required: false,
            };

            match self.store.append_version(row) {
                Ok(committed) => return Ok(committed),
                Err(StoreError::VersionConflict {
                    attempted, current, ..
                }) => {
                    tracing::warn!(
                        subject = %subject_id,
                        attempt,
                        attempted,
                        current,
                        "classification commit lost a version race, retrying"
                    );
                }
                Err(other) => return Err(other.into()),
            }
        }

        Err(LedgerError::VersionConflict {
            subject: subject_id.to_string(),
            attempts: MAX_COMMIT_ATTEMPTS,
        })
    }

    /// The current classification for a subject, if any.
    ///
    /// Verifies history integrity before trusting the read.
    pub fn current(&self, subject_id: &SubjectId) -> Result<Option<Classification>, LedgerError> {
        let history = self.store.history(subject_id)?;
        verify_history(subject_id, &history)?;
        Ok(history.into_iter().find(|row| row.is_current))
    }

    /// The full history for a subject, oldest version first.
    ///
    /// Verifies history integrity before trusting the read.
    pub fn history(&self, subject_id: &SubjectId) -> Result<Vec<Classification>, LedgerError> {
        let history = self.store.history(subject_id)?;
        verify_history(subject_id, &history)?;
        Ok(history)
    }
}

/// Verify the per-subject history invariants.
///
/// Expects `history` sorted by version (the store contract). An empty
/// history is valid — the subject has simply never been classified.
fn verify_history(
    subject_id: &SubjectId,
    history: &[Classification],
) -> Result<(), HistoryIntegrityError> {
    if history.is_empty() {
        return Ok(());
    }

    for (index, row) in history.iter().enumerate() {
        let expected = index as u32 + 1;
        if row.version != expected {
            return Err(HistoryIntegrityError::VersionGap {
                subject: subject_id.to_string(),
                expected,
                found: row.version,
            });
        }
    }

    let current_count = history.iter().filter(|row| row.is_current).count();
    if current_count > 1 {
        return Err(HistoryIntegrityError::MultipleCurrent {
            subject: subject_id.to_string(),
            count: current_count,
        });
    }

    let latest_is_current = history
        .last()
        .map(|row| row.is_current)
        .unwrap_or(false);
    if current_count == 0 || !latest_is_current {
        return Err(HistoryIntegrityError::NoCurrent {
            subject: subject_id.to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryClassificationStore;
    use aigrc_core::{Confidence, RiskLevel};
    use std::collections::HashMap;
    use std::sync::RwLock;

    fn outcome(level: RiskLevel) -> ClassificationOutcome {
        ClassificationOutcome {
            risk_level: level,
            confidence: Some(Confidence::High),
            rationale: format!("test outcome: {level}"),
            escalation: None,
        }
    }

    fn classifier() -> ClassifierId {
        ClassifierId::new("assessor@example.org")
    }

    // ── Commit ───────────────────────────────────────────────────────

    #[test]
    fn test_first_commit_is_version_one() {
        let ledger = ClassificationLedger::in_memory();
        let subject = SubjectId::new();
        let row = ledger
            .commit(subject, &outcome(RiskLevel::MinimalRisk), classifier(), None)
            .unwrap();
        assert_eq!(row.version, 1);
        assert!(row.is_current);
        assert!(row.change_reason.is_none());
    }

    #[test]
    fn test_recommit_appends_and_flips_current() {
        let ledger = ClassificationLedger::in_memory();
        let subject = SubjectId::new();
        ledger
            .commit(subject, &outcome(RiskLevel::MinimalRisk), classifier(), None)
            .unwrap();
        let second = ledger
            .commit(
                subject,
                &outcome(RiskLevel::HighRiskCandidate),
                classifier(),
                Some("vendor model change".to_string()),
            )
            .unwrap();
        assert_eq!(second.version, 2);

        let history = ledger.history(&subject).unwrap();
        assert_eq!(history.len(), 2);
        assert!(!history[0].is_current);
        assert!(history[1].is_current);
        assert_eq!(
            history[1].change_reason.as_deref(),
            Some("vendor model change")
        );
    }

    #[test]
    fn test_current_returns_latest() {
        let ledger = ClassificationLedger::in_memory();
        let subject = SubjectId::new();
        assert!(ledger.current(&subject).unwrap().is_none());
        ledger
            .commit(subject, &outcome(RiskLevel::LimitedRisk), classifier(), None)
            .unwrap();
        let current = ledger.current(&subject).unwrap().unwrap();
        assert_eq!(current.risk_level, RiskLevel::LimitedRisk);
        assert_eq!(current.version, 1);
    }

    // ── Concurrency ──────────────────────────────────────────────────

    #[test]
    fn test_concurrent_commits_keep_single_current() {
        // Three writers: every version conflict implies another writer
        // committed, so each writer succeeds within MAX_COMMIT_ATTEMPTS.
        let ledger = ClassificationLedger::in_memory();
        let subject = SubjectId::new();
        let writers = MAX_COMMIT_ATTEMPTS as usize;

        std::thread::scope(|scope| {
            for _ in 0..writers {
                let ledger = ledger.clone();
                scope.spawn(move || {
                    ledger
                        .commit(subject, &outcome(RiskLevel::MinimalRisk), classifier(), None)
                        .unwrap();
                });
            }
        });

        let history = ledger.history(&subject).unwrap();
        assert_eq!(history.len(), writers);
        assert_eq!(history.iter().filter(|row| row.is_current).count(), 1);
        let versions: Vec<u32> = history.iter().map(|row| row.version).collect();
        assert_eq!(versions, (1..=writers as u32).collect::<Vec<u32>>());
    }

    // ── Integrity ────────────────────────────────────────────────────

    /// A store that returns whatever rows it was seeded with — used to
    /// simulate out-of-band corruption the ledger must reject.
    struct SeededStore {
        rows: RwLock<HashMap<SubjectId, Vec<Classification>>>,
    }

    impl SeededStore {
        fn with_rows(subject: SubjectId, rows: Vec<Classification>) -> Self {
            let mut map = HashMap::new();
            map.insert(subject, rows);
            Self {
                rows: RwLock::new(map),
            }
        }
    }

    impl ClassificationStore for SeededStore {
        fn history(&self, subject: &SubjectId) -> Result<Vec<Classification>, StoreError> {
            Ok(self
                .rows
                .read()
                .map_err(|e| StoreError::Backend(e.to_string()))?
                .get(subject)
                .cloned()
                .unwrap_or_default())
        }

        fn append_version(&self, row: Classification) -> Result<Classification, StoreError> {
            self.rows
                .write()
                .map_err(|e| StoreError::Backend(e.to_string()))?
                .entry(row.subject_id)
                .or_default()
                .push(row.clone());
            Ok(row)
        }
    }

    fn seeded_row(subject_id: SubjectId, version: u32, is_current: bool) -> Classification {
        Classification {
            subject_id,
            risk_level: RiskLevel::MinimalRisk,
            confidence: Some(Confidence::High),
            rationale: "seeded".to_string(),
            version,
            is_current,
            created_at: Timestamp::now(),
            classifier_id: ClassifierId::new("seed"),
            change_reason: None,
            reassessment_required: false,
        }
    }

    #[test]
    fn test_two_current_rows_is_fatal() {
        let subject = SubjectId::new();
        let store = SeededStore::with_rows(
            subject,
            vec![seeded_row(subject, 1, true), seeded_row(subject, 2, true)],
        );
        let ledger = ClassificationLedger::new(Arc::new(store));
        assert!(matches!(
            ledger.current(&subject),
            Err(LedgerError::HistoryIntegrity(
                HistoryIntegrityError::MultipleCurrent { count: 2, .. }
            ))
        ));
    }

    #[test]
    fn test_no_current_row_is_fatal() {
        let subject = SubjectId::new();
        let store = SeededStore::with_rows(subject, vec![seeded_row(subject, 1, false)]);
        let ledger = ClassificationLedger::new(Arc::new(store));
        assert!(matches!(
            ledger.history(&subject),
            Err(LedgerError::HistoryIntegrity(
                HistoryIntegrityError::NoCurrent { .. }
            ))
        ));
    }

    #[test]
    fn test_version_gap_is_fatal() {
        let subject = SubjectId::new();
        let store = SeededStore::with_rows(
            subject,
            vec![seeded_row(subject, 1, false), seeded_row(subject, 3, true)],
        );
        let ledger = ClassificationLedger::new(Arc::new(store));
        assert!(matches!(
            ledger.history(&subject),
            Err(LedgerError::HistoryIntegrity(
                HistoryIntegrityError::VersionGap {
                    expected: 2,
                    found: 3,
                    ..
                }
            ))
        ));
    }

    #[test]
    fn test_stale_current_pointer_is_fatal() {
        // Current row exists but is not the latest version.
        let subject = SubjectId::new();
        let store = SeededStore::with_rows(
            subject,
            vec![seeded_row(subject, 1, true), seeded_row(subject, 2, false)],
        );
        let ledger = ClassificationLedger::new(Arc::new(store));
        assert!(matches!(
            ledger.history(&subject),
            Err(LedgerError::HistoryIntegrity(
                HistoryIntegrityError::NoCurrent { .. }
            ))
        ));
    }

    #[test]
    fn test_corrupt_history_blocks_commit() {
        let subject = SubjectId::new();
        let store = SeededStore::with_rows(
            subject,
            vec![seeded_row(subject, 1, true), seeded_row(subject, 2, true)],
        );
        let ledger = ClassificationLedger::new(Arc::new(store));
        assert!(matches!(
            ledger.commit(subject, &outcome(RiskLevel::MinimalRisk), classifier(), None),
            Err(LedgerError::HistoryIntegrity(_))
        ));
    }
}
