//! # Store Boundary — the Injected Classification Repository
//!
//! The engine never performs its own storage I/O. It commits through
//! `ClassificationStore`, whose `append_version` must be atomic: insert
//! the new row and retire the previous current row in one step, rejecting
//! stale versions with `VersionConflict` so the ledger can retry.
//!
//! `InMemoryClassificationStore` is the reference implementation used by
//! tests and the CLI. A production adapter backs the same trait with a
//! database transaction (upsert on the `(subject_id, version)` natural key
//! plus a current-pointer flip).

use std::collections::HashMap;
use std::sync::RwLock;

use thiserror::Error;

use aigrc_core::{Classification, SubjectId};

/// Errors surfaced by a classification store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The appended version was not `current max + 1` — another writer won.
    #[error("version conflict for {subject}: attempted version {attempted}, current is {current}")]
    VersionConflict {
        /// The subject whose history was contended.
        subject: String,
        /// The version the writer attempted to append.
        attempted: u32,
        /// The version that was current at the store when the write arrived.
        current: u32,
    },

    /// The appended row was malformed (version 0 or not marked current).
    #[error("rejected row for {subject}: {reason}")]
    RejectedRow {
        /// The subject the row was for.
        subject: String,
        /// Why the store refused it.
        reason: String,
    },

    /// Backend failure (I/O, poisoned lock, driver error).
    #[error("store backend error: {0}")]
    Backend(String),
}

/// The injected repository the ledger commits through.
///
/// Implementations must make `append_version` atomic per subject: the new
/// row becomes current and the previous current row is retired in one
/// step, with no interleaving that could leave zero or two current rows.
pub trait ClassificationStore: Send + Sync {
    /// All history rows for a subject, oldest version first.
    fn history(&self, subject: &SubjectId) -> Result<Vec<Classification>, StoreError>;

    /// Atomically append a new current row.
    ///
    /// The row must carry `version == current max + 1` and
    /// `is_current == true`. On success the previous current row (if any)
    /// has been retired. A stale version is rejected with
    /// [`StoreError::VersionConflict`] — the caller re-reads and retries.
    fn append_version(&self, row: Classification) -> Result<Classification, StoreError>;
}

/// In-memory classification store.
///
/// A single `RwLock` over the per-subject history map makes
/// `append_version` atomic: the version check, the current-pointer flip,
/// and the insert all happen under one write guard.
#[derive(Debug, Default)]
pub struct InMemoryClassificationStore {
    rows: RwLock<HashMap<SubjectId, Vec<Classification>>>,
}

impl InMemoryClassificationStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of subjects with at least one classification.
    pub fn subject_count(&self) -> usize {
        match self.rows.read() {
            Ok(rows) => rows.len(),
            Err(_) => 0,
        }
    }
}

impl ClassificationStore for InMemoryClassificationStore {
    fn history(&self, subject: &SubjectId) -> Result<Vec<Classification>, StoreError> {
        let rows = self
            .rows
            .read()
            .map_err(|e| StoreError::Backend(format!("lock poisoned: {e}")))?;
        let mut history = rows.get(subject).cloned().unwrap_or_default();
        history.sort_by_key(|row| row.version);
        Ok(history)
    }

    fn append_version(&self, row: Classification) -> Result<Classification, StoreError> {
        if row.version == 0 {
            return Err(StoreError::RejectedRow {
                subject: row.subject_id.to_string(),
                reason: "version must be >= 1".to_string(),
            });
        }
        if !row.is_current {
            return Err(StoreError::RejectedRow {
                subject: row.subject_id.to_string(),
                reason: "appended row must be marked current".to_string(),
            });
        }

        let mut rows = self
            .rows
            .write()
            .map_err(|e| StoreError::Backend(format!("lock poisoned: {e}")))?;
        let history = rows.entry(row.subject_id).or_default();

        let current_max = history.iter().map(|r| r.version).max().unwrap_or(0);
        if row.version != current_max + 1 {
            return Err(StoreError::VersionConflict {
                subject: row.subject_id.to_string(),
                attempted: row.version,
                current: current_max,
            });
        }

        for prior in history.iter_mut() {
            prior.is_current = false;
        }
        history.push(row.clone());
        Ok(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aigrc_core::{ClassifierId, Confidence, RiskLevel, Timestamp};

    fn row(subject_id: SubjectId, version: u32, is_current: bool) -> Classification {
        Classification {
            subject_id,
            risk_level: RiskLevel::MinimalRisk,
            confidence: Some(Confidence::High),
            rationale: "test".to_string(),
            version,
            is_current,
            created_at: Timestamp::now(),
            classifier_id: ClassifierId::new("tester"),
            change_reason: None,
            reassessment_required: false,
        }
    }

    #[test]
    fn test_first_append_is_version_one() {
        let store = InMemoryClassificationStore::new();
        let subject = SubjectId::new();
        store.append_version(row(subject, 1, true)).unwrap();
        let history = store.history(&subject).unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].version, 1);
        assert!(history[0].is_current);
    }

    #[test]
    fn test_append_retires_previous_current() {
        let store = InMemoryClassificationStore::new();
        let subject = SubjectId::new();
        store.append_version(row(subject, 1, true)).unwrap();
        store.append_version(row(subject, 2, true)).unwrap();
        let history = store.history(&subject).unwrap();
        assert!(!history[0].is_current);
        assert!(history[1].is_current);
    }

    #[test]
    fn test_stale_version_conflicts() {
        let store = InMemoryClassificationStore::new();
        let subject = SubjectId::new();
        store.append_version(row(subject, 1, true)).unwrap();
        let result = store.append_version(row(subject, 1, true));
        assert!(matches!(
            result,
            Err(StoreError::VersionConflict {
                attempted: 1,
                current: 1,
                ..
            })
        ));
    }

    #[test]
    fn test_version_gap_conflicts() {
        let store = InMemoryClassificationStore::new();
        let subject = SubjectId::new();
        store.append_version(row(subject, 1, true)).unwrap();
        assert!(store.append_version(row(subject, 3, true)).is_err());
    }

    #[test]
    fn test_version_zero_rejected() {
        let store = InMemoryClassificationStore::new();
        assert!(matches!(
            store.append_version(row(SubjectId::new(), 0, true)),
            Err(StoreError::RejectedRow { .. })
        ));
    }

    #[test]
    fn test_non_current_row_rejected() {
        let store = InMemoryClassificationStore::new();
        assert!(matches!(
            store.append_version(row(SubjectId::new(), 1, false)),
            Err(StoreError::RejectedRow { .. })
        ));
    }

    #[test]
    fn test_subjects_are_isolated() {
        let store = InMemoryClassificationStore::new();
        let a = SubjectId::new();
        let b = SubjectId::new();
        store.append_version(row(a, 1, true)).unwrap();
        store.append_version(row(b, 1, true)).unwrap();
        store.append_version(row(a, 2, true)).unwrap();
        assert_eq!(store.history(&a).unwrap().len(), 2);
        assert_eq!(store.history(&b).unwrap().len(), 1);
        assert!(store.history(&b).unwrap()[0].is_current);
        assert_eq!(store.subject_count(), 2);
    }
}
