//! # Attachment Resolver — Applicable Controls for a Classification
//!
//! `Catalog::resolve()` maps a risk level and vendor posture onto the
//! subset of the catalog that applies. The rule is a pure union:
//!
//! - entries tagged `all` always attach;
//! - entries tagged `high_risk` attach when the level is
//!   `high_risk_candidate`;
//! - entries tagged `limited_risk` attach when the level is `limited_risk`;
//! - entries tagged `vendor_based` attach when the subject is vendor-based.
//!
//! Re-running after a re-classification reflects only the new inputs —
//! resolution never consults prior attachments. The caller reconciles the
//! per-subject implementation records against the resolved set; records
//! for newly-inapplicable controls are flagged, not deleted, so the audit
//! trail of past obligations is preserved.

use aigrc_core::RiskLevel;

use crate::catalog::{ApplicabilityTag, Catalog, ControlCatalogEntry};

impl Catalog {
    /// Resolve the applicable catalog subset for a classification.
    ///
    /// Pure and idempotent. Output is sorted by control code, so equal
    /// inputs produce byte-equal result lists.
    pub fn resolve(&self, risk_level: RiskLevel, vendor_based: bool) -> Vec<&ControlCatalogEntry> {
        let mut resolved: Vec<&ControlCatalogEntry> = self
            .entries
            .iter()
            .filter(|entry| applies(entry, risk_level, vendor_based))
            .collect();
        resolved.sort_by(|a, b| a.code.cmp(&b.code));
        resolved
    }
}

/// Whether a single catalog entry attaches for the given inputs.
fn applies(entry: &ControlCatalogEntry, risk_level: RiskLevel, vendor_based: bool) -> bool {
    entry.applies_to.iter().any(|tag| match tag {
        ApplicabilityTag::All => true,
        ApplicabilityTag::HighRisk => risk_level == RiskLevel::HighRiskCandidate,
        ApplicabilityTag::LimitedRisk => risk_level == RiskLevel::LimitedRisk,
        ApplicabilityTag::VendorBased => vendor_based,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::default_catalog;
    use aigrc_core::ControlCode;
    use proptest::prelude::*;

    fn codes(resolved: &[&ControlCatalogEntry]) -> Vec<String> {
        resolved
            .iter()
            .map(|entry| entry.code.as_str().to_string())
            .collect()
    }

    #[test]
    fn test_minimal_risk_gets_baseline_only() {
        let catalog = default_catalog();
        let resolved = catalog.resolve(RiskLevel::MinimalRisk, false);
        assert!(!resolved.is_empty());
        for entry in &resolved {
            assert!(entry.applies_to.contains(&ApplicabilityTag::All));
        }
    }

    #[test]
    fn test_high_risk_attaches_high_risk_controls() {
        let catalog = default_catalog();
        let resolved = codes(&catalog.resolve(RiskLevel::HighRiskCandidate, false));
        assert!(resolved.contains(&"RSK-01".to_string()));
        assert!(resolved.contains(&"RSK-02".to_string()));
        assert!(resolved.contains(&"HUM-01".to_string()));
        // Limited-risk-only entries do not attach for high-risk subjects.
        assert!(!resolved.contains(&"TRA-02".to_string()));
    }

    #[test]
    fn test_limited_risk_attaches_transparency_controls() {
        let catalog = default_catalog();
        let resolved = codes(&catalog.resolve(RiskLevel::LimitedRisk, false));
        assert!(resolved.contains(&"TRA-01".to_string()));
        assert!(resolved.contains(&"TRA-02".to_string()));
        assert!(!resolved.contains(&"RSK-01".to_string()));
    }

    #[test]
    fn test_vendor_flag_attaches_vendor_controls() {
        let catalog = default_catalog();
        let without = codes(&catalog.resolve(RiskLevel::MinimalRisk, false));
        let with = codes(&catalog.resolve(RiskLevel::MinimalRisk, true));
        assert!(!without.contains(&"GOV-04".to_string()));
        assert!(with.contains(&"GOV-04".to_string()));
        assert!(with.contains(&"TEC-04".to_string()));
    }

    #[test]
    fn test_prohibited_and_unclassified_get_baseline_only() {
        let catalog = default_catalog();
        for level in [
            RiskLevel::Prohibited,
            RiskLevel::NeedsReview,
            RiskLevel::NotClassified,
        ] {
            let resolved = catalog.resolve(level, false);
            for entry in &resolved {
                assert!(
                    entry.applies_to.contains(&ApplicabilityTag::All),
                    "{} attached for {level}",
                    entry.code
                );
            }
        }
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let catalog = default_catalog();
        let first = codes(&catalog.resolve(RiskLevel::HighRiskCandidate, true));
        let second = codes(&catalog.resolve(RiskLevel::HighRiskCandidate, true));
        assert_eq!(first, second);
    }

    #[test]
    fn test_resolve_output_is_sorted_by_code() {
        let catalog = default_catalog();
        let resolved = catalog.resolve(RiskLevel::HighRiskCandidate, true);
        let mut sorted: Vec<&ControlCode> = resolved.iter().map(|entry| &entry.code).collect();
        sorted.sort();
        let actual: Vec<&ControlCode> = resolved.iter().map(|entry| &entry.code).collect();
        assert_eq!(actual, sorted);
    }

    #[test]
    fn test_reclassification_drops_stale_attachments_from_resolution() {
        // Resolution reflects only the new level; it is the caller that
        // keeps (and flags) implementation records for dropped controls.
        let catalog = default_catalog();
        let high = codes(&catalog.resolve(RiskLevel::HighRiskCandidate, false));
        let minimal = codes(&catalog.resolve(RiskLevel::MinimalRisk, false));
        assert!(high.contains(&"RSK-01".to_string()));
        assert!(!minimal.contains(&"RSK-01".to_string()));
    }

    fn risk_level_strategy() -> impl Strategy<Value = RiskLevel> {
        prop_oneof![
            Just(RiskLevel::Prohibited),
            Just(RiskLevel::NeedsReview),
            Just(RiskLevel::HighRiskCandidate),
            Just(RiskLevel::LimitedRisk),
            Just(RiskLevel::MinimalRisk),
            Just(RiskLevel::NotClassified),
        ]
    }

    proptest! {
        /// Vendor-tagged controls only add, never remove:
        /// resolve(level, true) is a superset of resolve(level, false).
        #[test]
        fn property_vendor_flag_is_monotonic(level in risk_level_strategy()) {
            let catalog = default_catalog();
            let without: std::collections::BTreeSet<String> =
                codes(&catalog.resolve(level, false)).into_iter().collect();
            let with: std::collections::BTreeSet<String> =
                codes(&catalog.resolve(level, true)).into_iter().collect();
            prop_assert!(with.is_superset(&without));
        }

        /// Baseline (`all`-tagged) entries attach for every input.
        #[test]
        fn property_baseline_always_attaches(
            level in risk_level_strategy(),
            vendor in any::<bool>(),
        ) {
            let catalog = default_catalog();
            let resolved = codes(&catalog.resolve(level, vendor));
            for entry in &catalog.entries {
                if entry.applies_to.contains(&ApplicabilityTag::All) {
                    prop_assert!(resolved.contains(&entry.code.as_str().to_string()));
                }
            }
        }
    }
}
