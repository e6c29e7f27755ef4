//! # aigrc-controls — Control Catalog and Attachment Resolver
//!
//! - **Catalog** (`catalog.rs`): the static, global obligation catalog —
//!   control codes, categories, and the applicability tags that drive
//!   attachment.
//!
//! - **Resolver** (`resolver.rs`): `Catalog::resolve()` — the pure union
//!   rule mapping a risk level and vendor posture onto the applicable
//!   subset of the catalog.
//!
//! ## Crate Policy
//!
//! Resolution is idempotent and order-independent; it never reads
//! per-subject implementation state. Reconciling implementation records
//! after a re-classification is the caller's job, and the policy there is
//! deliberate: newly-inapplicable implementations are flagged, never
//! deleted, so the audit trail of past obligations survives.

pub mod catalog;
pub mod resolver;

pub use catalog::{
    default_catalog, ApplicabilityTag, Catalog, ControlCatalogEntry, ControlCategory,
};
