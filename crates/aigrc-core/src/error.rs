//! # Error Types — Structured Error Hierarchy
//!
//! Defines the error types shared across the aigrc workspace. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Malformed snapshots are rejected at the adapter boundary with the
//!   offending field named; nothing malformed reaches the engine.
//! - Missing screening answers are NOT errors — the classification engine
//!   degrades to its most conservative result instead.
//! - Ledger-specific errors (integrity violations, version conflicts) live
//!   in `aigrc-ledger`; this crate only carries the boundary-level kinds.

use thiserror::Error;

/// Top-level error type for the aigrc engine boundary.
#[derive(Error, Debug)]
pub enum AigrcError {
    /// Snapshot failed adapter-boundary validation.
    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),

    /// A persisted value did not match the closed enum it maps to.
    #[error("schema validation error: {0}")]
    SchemaValidation(String),

    /// Canonicalization failed while computing a snapshot digest.
    #[error("canonicalization error: {0}")]
    Canonicalization(#[from] CanonicalizationError),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Error during canonical serialization.
#[derive(Error, Debug)]
pub enum CanonicalizationError {
    /// Float values are not permitted in canonical representations.
    /// Counts and scores are integers; free text is strings.
    #[error("float values are not permitted in canonical representations: {0}")]
    FloatRejected(f64),

    /// JSON serialization failed.
    #[error("serialization failed: {0}")]
    SerializationFailed(#[from] serde_json::Error),
}
