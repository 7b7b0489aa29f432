// crates/dashboard-gate-core/src/core/mod.rs
// ============================================================================
// Module: Dashboard Gate Core Types
// Description: Canonical declaration, grant, resolution, and snapshot types.
// Purpose: Provide stable, serializable types for dashboard access resolution.
// Dependencies: rand, serde, serde_jcs, sha2, time
// ============================================================================

//! ## Overview
//! Core types define dashboard declarations, request context, grant
//! snapshots, resolution results, and snapshot artifacts. Wire forms use
//! camelCase field names and are the source of truth for the checksum payload.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod declaration;
pub mod grants;
pub mod hashing;
pub mod identifiers;
pub mod resolution;
pub mod snapshot;
pub mod time;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use declaration::DashboardContext;
pub use declaration::DashboardDeclaration;
pub use declaration::Section;
pub use declaration::SubjectType;
pub use grants::EntitlementSnapshot;
pub use grants::FeatureSnapshot;
pub use grants::PermissionResult;
pub use hashing::Checksum;
pub use hashing::HashError;
pub use identifiers::DashboardId;
pub use identifiers::PartnerId;
pub use identifiers::SectionId;
pub use identifiers::SnapshotId;
pub use identifiers::SubjectId;
pub use identifiers::TenantId;
pub use resolution::HiddenReason;
pub use resolution::HiddenReasonCode;
pub use resolution::ResolvedDashboard;
pub use resolution::ResolvedSection;
pub use snapshot::DashboardSnapshot;
pub use snapshot::SnapshotPayload;
pub use time::TimeError;
pub use time::Timestamp;
