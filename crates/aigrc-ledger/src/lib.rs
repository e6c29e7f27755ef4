//! # aigrc-ledger — Classification History Ledger
//!
//! Owns the one piece of state in the engine: the append-only, versioned
//! classification history per subject.
//!
//! - **Store boundary** (`store.rs`): the `ClassificationStore` trait —
//!   the injected repository the engine commits through — and an in-memory
//!   implementation whose `append_version` is the atomic
//!   "set current version" operation.
//!
//! - **Ledger** (`ledger.rs`): `ClassificationLedger` — commit with bounded
//!   optimistic-concurrency retries, plus integrity-verified reads.
//!
//! ## Invariants
//!
//! Per subject: exactly one row has `is_current = true`; versions start at
//! 1 and increase without gaps; history rows are never updated or deleted.
//! Violations observed on read are fatal `HistoryIntegrityError`s — a
//! corrupt history must be rejected before any read is trusted.

pub mod ledger;
pub mod store;

pub use ledger::{ClassificationLedger, HistoryIntegrityError, LedgerError, MAX_COMMIT_ATTEMPTS};
pub use store::{ClassificationStore, InMemoryClassificationStore, StoreError};
