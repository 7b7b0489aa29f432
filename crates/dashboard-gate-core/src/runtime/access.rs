// crates/dashboard-gate-core/src/runtime/access.rs
// ============================================================================
// Module: Dashboard Gate Access Checks
// Description: Required-versus-available set checks for each access axis.
// Purpose: Decide allow/deny and report missing items in required order.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! Capability, entitlement, and feature checks share one rule: every required
//! item must appear in the available list. An absent or empty requirement is
//! vacuously satisfied. Missing items keep the order of the required list so
//! that denial details are stable.

use crate::core::HiddenReasonCode;

// ============================================================================
// SECTION: Access Axis
// ============================================================================

/// Access axis a requirement belongs to.
///
/// Variants are listed in evaluation precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessAxis {
    /// Subject capabilities.
    Capability,
    /// Tenant entitlements.
    Entitlement,
    /// Global feature flags.
    Feature,
}

impl AccessAxis {
    /// Axes in the fixed order they are evaluated.
    pub const PRECEDENCE: [Self; 3] = [Self::Capability, Self::Entitlement, Self::Feature];

    /// Reason code recorded when this axis denies access.
    #[must_use]
    pub const fn reason_code(self) -> HiddenReasonCode {
        match self {
            Self::Capability => HiddenReasonCode::MissingCapability,
            Self::Entitlement => HiddenReasonCode::MissingEntitlement,
            Self::Feature => HiddenReasonCode::MissingFeature,
        }
    }

    /// Plural noun used in denial details.
    #[must_use]
    pub const fn plural(self) -> &'static str {
        match self {
            Self::Capability => "capabilities",
            Self::Entitlement => "entitlements",
            Self::Feature => "features",
        }
    }
}

// ============================================================================
// SECTION: Access Check
// ============================================================================

/// Outcome of one access check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessCheck {
    /// Whether every required item was available.
    pub allowed: bool,
    /// Required items not present in the available list, in required order.
    pub missing: Vec<String>,
}

impl AccessCheck {
    /// Returns the missing items joined as `a, b, c`.
    #[must_use]
    pub fn missing_list(&self) -> String {
        self.missing.join(", ")
    }
}

/// Checks that every required item is present in `available`.
#[must_use]
pub fn check_required(required: Option<&[String]>, available: &[String]) -> AccessCheck {
    let missing: Vec<String> = required
        .unwrap_or_default()
        .iter()
        .filter(|item| !available.contains(*item))
        .cloned()
        .collect();
    AccessCheck {
        allowed: missing.is_empty(),
        missing,
    }
}

/// Checks required capabilities against granted capabilities.
#[must_use]
pub fn check_capabilities(required: Option<&[String]>, granted: &[String]) -> AccessCheck {
    check_required(required, granted)
}

/// Checks required entitlements against active entitlements.
#[must_use]
pub fn check_entitlements(required: Option<&[String]>, active: &[String]) -> AccessCheck {
    check_required(required, active)
}

/// Checks required features against enabled features.
#[must_use]
pub fn check_features(required: Option<&[String]>, enabled: &[String]) -> AccessCheck {
    check_required(required, enabled)
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::check_required;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn absent_and_empty_requirements_are_vacuous() {
        let available = strings(&["a"]);
        assert!(check_required(None, &available).allowed);
        assert!(check_required(Some(&[][..]), &[]).allowed);
        assert!(check_required(None, &[]).missing.is_empty());
    }

    #[test]
    fn missing_preserves_required_order() {
        let required = strings(&["z", "a", "m", "b"]);
        let available = strings(&["b", "a"]);
        let check = check_required(Some(required.as_slice()), &available);
        assert!(!check.allowed);
        assert_eq!(check.missing, strings(&["z", "m"]));
        assert_eq!(check.missing_list(), "z, m");
    }

    #[test]
    fn duplicates_in_required_are_reported_each_time() {
        let required = strings(&["x", "x"]);
        let check = check_required(Some(required.as_slice()), &[]);
        assert_eq!(check.missing, strings(&["x", "x"]));
    }
}
