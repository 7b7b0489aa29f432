// crates/dashboard-gate-core/src/runtime/resolver.rs
// ============================================================================
// Module: Dashboard Gate Resolver
// Description: Top-level dashboard resolution with isolation gates.
// Purpose: Enforce isolation before any section check and explain denials.
// Dependencies: crate::core, thiserror
// ============================================================================

//! ## Overview
//! Resolution runs a fixed sequence of gates, each a terminal short-circuit:
//!
//! 1. subject type allow-list
//! 2. tenant allow-list
//! 3. partner allow-list (a context without a partner always passes)
//! 4. entitlement snapshot tenant matches the context tenant
//! 5. dashboard-level capabilities
//! 6. dashboard-level entitlements
//! 7. dashboard-level features
//!
//! Gates 1 to 4 are isolation faults and return [`IsolationError`] with no
//! partial result. Gates 5 to 7 are policy denials and return a normal
//! [`ResolvedDashboard`] with nothing visible. When every gate passes the
//! section tree is resolved per node.
//!
//! Dashboard-level denials list only top-level section IDs as hidden, not
//! their descendants.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::DashboardContext;
use crate::core::DashboardDeclaration;
use crate::core::DashboardId;
use crate::core::EntitlementSnapshot;
use crate::core::FeatureSnapshot;
use crate::core::HiddenReason;
use crate::core::PartnerId;
use crate::core::PermissionResult;
use crate::core::ResolvedDashboard;
use crate::core::SectionId;
use crate::core::SubjectType;
use crate::core::TenantId;
use crate::runtime::access::AccessAxis;
use crate::runtime::access::AccessCheck;
use crate::runtime::sections::GrantView;
use crate::runtime::sections::Requirements;
use crate::runtime::sections::ResolutionTrace;
use crate::runtime::sections::resolve_sections;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Coarse isolation fault classes callers branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IsolationFaultKind {
    /// Subject type is not admitted.
    Subject,
    /// Tenant boundary violated (policy or mismatched inputs).
    Tenant,
    /// Partner boundary violated.
    Partner,
}

impl IsolationFaultKind {
    /// Returns a stable label for audit output.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Subject => "subject_access",
            Self::Tenant => "tenant_isolation",
            Self::Partner => "partner_isolation",
        }
    }
}

/// Isolation faults that abort resolution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IsolationError {
    /// Subject type is outside the declaration allow-list.
    #[error("Subject type '{subject_type}' is not allowed for dashboard '{dashboard_id}'")]
    SubjectNotAllowed {
        /// Rejected subject type.
        subject_type: SubjectType,
        /// Dashboard being resolved.
        dashboard_id: DashboardId,
    },
    /// Tenant is outside the declaration allow-list.
    #[error("Tenant '{tenant_id}' is not allowed for dashboard '{dashboard_id}'")]
    TenantNotAllowed {
        /// Rejected tenant.
        tenant_id: TenantId,
        /// Dashboard being resolved.
        dashboard_id: DashboardId,
    },
    /// Partner is outside the declaration allow-list.
    #[error("Partner '{partner_id}' is not allowed for dashboard '{dashboard_id}'")]
    PartnerNotAllowed {
        /// Rejected partner.
        partner_id: PartnerId,
        /// Dashboard being resolved.
        dashboard_id: DashboardId,
    },
    /// Entitlement snapshot belongs to a different tenant than the request.
    #[error(
        "Entitlement snapshot tenant '{snapshot_tenant_id}' does not match context tenant \
         '{context_tenant_id}'"
    )]
    EntitlementTenantMismatch {
        /// Tenant named by the entitlement snapshot.
        snapshot_tenant_id: TenantId,
        /// Tenant named by the request context.
        context_tenant_id: TenantId,
    },
}

impl IsolationError {
    /// Returns the fault class.
    #[must_use]
    pub const fn kind(&self) -> IsolationFaultKind {
        match self {
            Self::SubjectNotAllowed {
                ..
            } => IsolationFaultKind::Subject,
            Self::TenantNotAllowed {
                ..
            }
            | Self::EntitlementTenantMismatch {
                ..
            } => IsolationFaultKind::Tenant,
            Self::PartnerNotAllowed {
                ..
            } => IsolationFaultKind::Partner,
        }
    }
}

// ============================================================================
// SECTION: Resolver
// ============================================================================

/// Resolves which parts of a dashboard are visible for one request.
///
/// # Errors
///
/// Returns [`IsolationError`] when the subject, tenant, or partner gates
/// fail, or when the entitlement snapshot names a different tenant.
pub fn resolve_dashboard(
    declaration: &DashboardDeclaration,
    context: &DashboardContext,
    permissions: &PermissionResult,
    entitlements: &EntitlementSnapshot,
    features: &FeatureSnapshot,
) -> Result<ResolvedDashboard, IsolationError> {
    resolve_dashboard_traced(declaration, context, permissions, entitlements, features)
        .map(|(resolved, _)| resolved)
}

/// Which gate a successful resolution finished at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ResolutionPath {
    /// A dashboard-level gate denied the whole dashboard.
    DashboardDenied,
    /// The section tree was resolved.
    Sections,
}

/// Resolves a dashboard and reports which gate produced the result.
pub(crate) fn resolve_dashboard_traced(
    declaration: &DashboardDeclaration,
    context: &DashboardContext,
    permissions: &PermissionResult,
    entitlements: &EntitlementSnapshot,
    features: &FeatureSnapshot,
) -> Result<(ResolvedDashboard, ResolutionPath), IsolationError> {
    enforce_isolation(declaration, context, entitlements)?;

    let grants = GrantView::new(permissions, entitlements, features);
    let requirements = Requirements {
        capabilities: declaration.required_capabilities.as_deref(),
        entitlements: declaration.required_entitlements.as_deref(),
        features: declaration.required_features.as_deref(),
    };
    if let Some((axis, check)) = grants.first_denial(requirements) {
        return Ok((dashboard_denied(declaration, axis, &check), ResolutionPath::DashboardDenied));
    }

    let mut trace = ResolutionTrace::default();
    let visible_sections = resolve_sections(&declaration.sections, &grants, &mut trace);
    let resolved = ResolvedDashboard {
        dashboard_id: declaration.dashboard_id.clone(),
        visible_sections,
        hidden_sections: trace.hidden_sections,
        reasons: trace.reasons,
    };
    Ok((resolved, ResolutionPath::Sections))
}

/// Runs gates 1 through 4.
fn enforce_isolation(
    declaration: &DashboardDeclaration,
    context: &DashboardContext,
    entitlements: &EntitlementSnapshot,
) -> Result<(), IsolationError> {
    if !declaration.allowed_subjects.contains(&context.subject_type) {
        return Err(IsolationError::SubjectNotAllowed {
            subject_type: context.subject_type,
            dashboard_id: declaration.dashboard_id.clone(),
        });
    }

    if let Some(tenants) = declaration.allowed_tenants.as_deref()
        && !tenants.is_empty()
        && !tenants.contains(&context.tenant_id)
    {
        return Err(IsolationError::TenantNotAllowed {
            tenant_id: context.tenant_id.clone(),
            dashboard_id: declaration.dashboard_id.clone(),
        });
    }

    // A context without a partner is never blocked here, even when the
    // declaration restricts partners. An empty partner ID counts as absent.
    if let Some(partners) = declaration.allowed_partners.as_deref()
        && !partners.is_empty()
        && let Some(partner_id) = &context.partner_id
        && !partner_id.as_str().is_empty()
        && !partners.contains(partner_id)
    {
        return Err(IsolationError::PartnerNotAllowed {
            partner_id: partner_id.clone(),
            dashboard_id: declaration.dashboard_id.clone(),
        });
    }

    if entitlements.tenant_id != context.tenant_id {
        return Err(IsolationError::EntitlementTenantMismatch {
            snapshot_tenant_id: entitlements.tenant_id.clone(),
            context_tenant_id: context.tenant_id.clone(),
        });
    }

    Ok(())
}

/// Builds the whole-dashboard denial returned by gates 5 through 7.
fn dashboard_denied(
    declaration: &DashboardDeclaration,
    axis: AccessAxis,
    check: &AccessCheck,
) -> ResolvedDashboard {
    ResolvedDashboard {
        dashboard_id: declaration.dashboard_id.clone(),
        visible_sections: Vec::new(),
        hidden_sections: declaration
            .sections
            .iter()
            .map(|section| section.section_id.clone())
            .collect(),
        reasons: vec![HiddenReason {
            section_id: SectionId::new(declaration.dashboard_id.as_str()),
            reason: axis.reason_code(),
            details: format!("Dashboard requires {}: {}", axis.plural(), check.missing_list()),
        }],
    }
}
