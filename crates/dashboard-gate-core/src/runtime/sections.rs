// crates/dashboard-gate-core/src/runtime/sections.rs
// ============================================================================
// Module: Dashboard Gate Section Resolver
// Description: Recursive per-section gating over a declaration tree.
// Purpose: Prune denied sections and record one reason per denial.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! The section resolver walks siblings in declaration order. Each node is
//! checked capability, then entitlement, then feature; only the first failing
//! axis is reported. A denied node is recorded once and its subtree is not
//! visited, so descendants of a denied parent get no entries of their own.
//! Permitted nodes keep their shape, and a child list is attached only when at
//! least one child survived.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::EntitlementSnapshot;
use crate::core::FeatureSnapshot;
use crate::core::HiddenReason;
use crate::core::PermissionResult;
use crate::core::ResolvedSection;
use crate::core::Section;
use crate::core::SectionId;
use crate::runtime::access::AccessAxis;
use crate::runtime::access::AccessCheck;
use crate::runtime::access::check_capabilities;
use crate::runtime::access::check_entitlements;
use crate::runtime::access::check_features;

// ============================================================================
// SECTION: Grant View
// ============================================================================

/// Borrowed view of the three grant snapshots used by one resolution.
#[derive(Debug, Clone, Copy)]
pub struct GrantView<'a> {
    /// Capabilities held by the subject.
    pub capabilities: &'a [String],
    /// Entitlements active for the tenant.
    pub entitlements: &'a [String],
    /// Globally enabled features.
    pub features: &'a [String],
}

impl<'a> GrantView<'a> {
    /// Builds a view over the grant snapshots.
    #[must_use]
    pub fn new(
        permissions: &'a PermissionResult,
        entitlements: &'a EntitlementSnapshot,
        features: &'a FeatureSnapshot,
    ) -> Self {
        Self {
            capabilities: &permissions.capabilities,
            entitlements: &entitlements.active_entitlements,
            features: &features.enabled_features,
        }
    }

    /// Returns the first failing axis and its check, in precedence order.
    #[must_use]
    pub fn first_denial(
        &self,
        requirements: Requirements<'_>,
    ) -> Option<(AccessAxis, AccessCheck)> {
        AccessAxis::PRECEDENCE.into_iter().find_map(|axis| {
            let check = match axis {
                AccessAxis::Capability => {
                    check_capabilities(requirements.capabilities, self.capabilities)
                }
                AccessAxis::Entitlement => {
                    check_entitlements(requirements.entitlements, self.entitlements)
                }
                AccessAxis::Feature => check_features(requirements.features, self.features),
            };
            (!check.allowed).then_some((axis, check))
        })
    }
}

/// Borrowed requirement lists of a section or declaration.
#[derive(Debug, Clone, Copy, Default)]
pub struct Requirements<'a> {
    /// Required capabilities.
    pub capabilities: Option<&'a [String]>,
    /// Required entitlements.
    pub entitlements: Option<&'a [String]>,
    /// Required features.
    pub features: Option<&'a [String]>,
}

impl<'a> Requirements<'a> {
    /// Returns the requirement lists of a section.
    #[must_use]
    pub fn of_section(section: &'a Section) -> Self {
        Self {
            capabilities: section.required_capabilities.as_deref(),
            entitlements: section.required_entitlements.as_deref(),
            features: section.required_features.as_deref(),
        }
    }
}

// ============================================================================
// SECTION: Resolution Trace
// ============================================================================

/// Hidden IDs and reasons accumulated across one tree walk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionTrace {
    /// Hidden section IDs in traversal order.
    pub hidden_sections: Vec<SectionId>,
    /// One reason per hidden section.
    pub reasons: Vec<HiddenReason>,
}

impl ResolutionTrace {
    /// Records a denied section.
    fn record_denial(&mut self, section_id: &SectionId, axis: AccessAxis, check: &AccessCheck) {
        self.hidden_sections.push(section_id.clone());
        self.reasons.push(HiddenReason {
            section_id: section_id.clone(),
            reason: axis.reason_code(),
            details: format!("Missing {}: {}", axis.plural(), check.missing_list()),
        });
    }
}

// ============================================================================
// SECTION: Section Resolver
// ============================================================================

/// Resolves an ordered list of sibling sections, appending denials to `trace`.
///
/// Returns the visible siblings in declaration order.
#[must_use]
pub fn resolve_sections(
    sections: &[Section],
    grants: &GrantView<'_>,
    trace: &mut ResolutionTrace,
) -> Vec<ResolvedSection> {
    let mut visible = Vec::with_capacity(sections.len());
    for section in sections {
        if let Some((axis, check)) = grants.first_denial(Requirements::of_section(section)) {
            trace.record_denial(&section.section_id, axis, &check);
            continue;
        }

        let children = match section.children.as_deref() {
            Some(children) if !children.is_empty() => {
                let resolved = resolve_sections(children, grants, trace);
                (!resolved.is_empty()).then_some(resolved)
            }
            _ => None,
        };

        visible.push(ResolvedSection {
            section_id: section.section_id.clone(),
            label: section.label.clone(),
            icon: section.icon.clone(),
            children,
        });
    }
    visible
}
