//! # aigrc-gaps — Gap Detector
//!
//! Inspects a compliance snapshot and emits severity-tagged deficiency
//! items ("gaps"):
//!
//! - **Gap model** (`gap.rs`): `GapItem` with its stable category and
//!   severity enums.
//!
//! - **Detector** (`detector.rs`): `detect_gaps()` — independent rules
//!   over the snapshot, no short-circuiting between rules, deterministic
//!   output order.
//!
//! ## Crate Policy
//!
//! Gaps are ephemeral computation outputs: never persisted, always
//! recomputed from the latest snapshot. The detector is a total function
//! over validated snapshots and reads the clock from `snapshot.taken_at`,
//! never from the system.

pub mod detector;
pub mod gap;

pub use detector::detect_gaps;
pub use gap::{GapCategory, GapItem, GapSeverity};
