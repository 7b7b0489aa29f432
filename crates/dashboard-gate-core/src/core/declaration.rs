// crates/dashboard-gate-core/src/core/declaration.rs
// ============================================================================
// Module: Dashboard Gate Declarations
// Description: Dashboard declarations, section trees, and request context.
// Purpose: Define the immutable inputs consumed by the resolution engine.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! A [`DashboardDeclaration`] describes which subjects, tenants, and partners
//! may view a dashboard and which capabilities, entitlements, and features
//! each [`Section`] requires. A [`DashboardContext`] identifies the caller of
//! a single resolution request.
//!
//! Declarations are assumed to be structurally valid (non-empty identifiers,
//! unique section IDs) by the time they reach the engine. Deserialization
//! rejects unknown fields but performs no further authoring checks.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::DashboardId;
use crate::core::identifiers::PartnerId;
use crate::core::identifiers::SectionId;
use crate::core::identifiers::SubjectId;
use crate::core::identifiers::TenantId;
use crate::core::time::Timestamp;

// ============================================================================
// SECTION: Subject Types
// ============================================================================

/// Fixed set of principal kinds a dashboard may admit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubjectType {
    /// Platform-wide administrator.
    SuperAdmin,
    /// Administrator of a partner organization.
    PartnerAdmin,
    /// Administrator of a single tenant.
    TenantAdmin,
    /// Tenant staff member.
    Staff,
    /// Regular tenant user.
    User,
}

impl SubjectType {
    /// Returns the stable wire label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SuperAdmin => "super_admin",
            Self::PartnerAdmin => "partner_admin",
            Self::TenantAdmin => "tenant_admin",
            Self::Staff => "staff",
            Self::User => "user",
        }
    }
}

impl fmt::Display for SubjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Declarations
// ============================================================================

/// Node in a dashboard section tree.
///
/// # Invariants
/// - `section_id` is unique within its declaration.
/// - Children are exclusively owned; the tree has no cycles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Section {
    /// Section identifier.
    pub section_id: SectionId,
    /// Display label.
    pub label: String,
    /// Optional icon name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Capabilities the subject must hold.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_capabilities: Option<Vec<String>>,
    /// Entitlements the tenant must have active.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_entitlements: Option<Vec<String>>,
    /// Features that must be globally enabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_features: Option<Vec<String>>,
    /// Ordered child sections.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Self>>,
}

impl Section {
    /// Creates a section with no requirements and no children.
    #[must_use]
    pub fn new(section_id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            section_id: SectionId::new(section_id),
            label: label.into(),
            icon: None,
            required_capabilities: None,
            required_entitlements: None,
            required_features: None,
            children: None,
        }
    }
}

/// Static description of a dashboard and its access rules.
///
/// # Invariants
/// - `allowed_tenants` / `allowed_partners` of `None` or `[]` mean unrestricted.
/// - Owned by the caller; the engine never mutates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DashboardDeclaration {
    /// Dashboard identifier.
    pub dashboard_id: DashboardId,
    /// Display label.
    pub label: String,
    /// Subject types permitted to view the dashboard at all.
    pub allowed_subjects: Vec<SubjectType>,
    /// Optional tenant allow-list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_tenants: Option<Vec<TenantId>>,
    /// Optional partner allow-list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_partners: Option<Vec<PartnerId>>,
    /// Dashboard-level capability requirements.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_capabilities: Option<Vec<String>>,
    /// Dashboard-level entitlement requirements.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_entitlements: Option<Vec<String>>,
    /// Dashboard-level feature requirements.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_features: Option<Vec<String>>,
    /// Ordered top-level sections.
    pub sections: Vec<Section>,
}

// ============================================================================
// SECTION: Request Context
// ============================================================================

/// Request-time identity for one resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DashboardContext {
    /// Requesting subject.
    pub subject_id: SubjectId,
    /// Requesting subject's type.
    pub subject_type: SubjectType,
    /// Tenant the request is scoped to.
    pub tenant_id: TenantId,
    /// Partner the request is scoped to, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partner_id: Option<PartnerId>,
    /// Role labels. Informational only; the engine does not consult them.
    #[serde(default)]
    pub roles: Vec<String>,
    /// Instant the request is evaluated at.
    pub evaluation_time: Timestamp,
}
