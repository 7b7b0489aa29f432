// crates/dashboard-gate-core/src/core/resolution.rs
// ============================================================================
// Module: Dashboard Gate Resolution Results
// Description: Visible section trees, hidden section IDs, and denial reasons.
// Purpose: Represent policy denials as explainable data.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! A [`ResolvedDashboard`] is the output of a resolution: the pruned tree of
//! visible sections plus a flat list of hidden IDs and one [`HiddenReason`]
//! per hidden entry. Policy denials always travel as data here; isolation
//! faults never produce a resolved dashboard.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::DashboardId;
use crate::core::identifiers::SectionId;

// ============================================================================
// SECTION: Reasons
// ============================================================================

/// Fixed reason codes attached to hidden sections.
///
/// The resolver emits only the three `Missing*` codes. The isolation codes
/// exist so that callers can record isolation outcomes as data if they choose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HiddenReasonCode {
    /// A required capability is not held by the subject.
    MissingCapability,
    /// A required entitlement is not active for the tenant.
    MissingEntitlement,
    /// A required feature is not enabled (also used for expired snapshots).
    MissingFeature,
    /// Tenant is outside the dashboard allow-list.
    TenantNotAllowed,
    /// Partner is outside the dashboard allow-list.
    PartnerNotAllowed,
    /// Subject type is outside the dashboard allow-list.
    SubjectNotAllowed,
}

impl HiddenReasonCode {
    /// Returns the stable wire label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MissingCapability => "missing_capability",
            Self::MissingEntitlement => "missing_entitlement",
            Self::MissingFeature => "missing_feature",
            Self::TenantNotAllowed => "tenant_not_allowed",
            Self::PartnerNotAllowed => "partner_not_allowed",
            Self::SubjectNotAllowed => "subject_not_allowed",
        }
    }
}

impl fmt::Display for HiddenReasonCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Explanation for one hidden section (or for the whole dashboard).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HiddenReason {
    /// Hidden section ID, or the dashboard ID for dashboard-level denials.
    pub section_id: SectionId,
    /// Reason code.
    pub reason: HiddenReasonCode,
    /// Human-readable details, e.g. `Missing capabilities: a, b`.
    pub details: String,
}

// ============================================================================
// SECTION: Resolved Tree
// ============================================================================

/// Visible section as rendered to the caller.
///
/// # Invariants
/// - `children` is `None` rather than an empty list when no child survived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedSection {
    /// Section identifier.
    pub section_id: SectionId,
    /// Display label.
    pub label: String,
    /// Optional icon name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Visible children.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Self>>,
}

/// Result of resolving a dashboard for one request.
///
/// # Invariants
/// - Every ID in `hidden_sections` has at least one matching entry in `reasons`,
///   except for dashboard-level denials, which report a single reason keyed by
///   the dashboard ID.
/// - No visible section appears in `hidden_sections` or as a reason subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedDashboard {
    /// Dashboard identifier.
    pub dashboard_id: DashboardId,
    /// Pruned tree of visible sections in declaration order.
    pub visible_sections: Vec<ResolvedSection>,
    /// Hidden section IDs in traversal order.
    pub hidden_sections: Vec<SectionId>,
    /// Reasons for each hidden entry.
    pub reasons: Vec<HiddenReason>,
}

impl ResolvedDashboard {
    /// Returns true when nothing was hidden.
    #[must_use]
    pub fn is_fully_visible(&self) -> bool {
        self.hidden_sections.is_empty() && self.reasons.is_empty()
    }

    /// Returns the distinct reason codes in first-seen order.
    #[must_use]
    pub fn reason_codes(&self) -> Vec<HiddenReasonCode> {
        let mut codes = Vec::new();
        for reason in &self.reasons {
            if !codes.contains(&reason.reason) {
                codes.push(reason.reason);
            }
        }
        codes
    }
}
