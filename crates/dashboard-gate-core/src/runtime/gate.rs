// crates/dashboard-gate-core/src/runtime/gate.rs
// ============================================================================
// Module: Dashboard Gate Facade
// Description: Host-facing entry point wiring clock, audit, and TTL policy.
// Purpose: Apply boundary defaults and audit around the pure resolution core.
// Dependencies: crate::{audit, core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! [`DashboardGate`] is where host concerns meet the deterministic core: it
//! reads "now" from a [`Clock`] only when the caller omits an instant, applies
//! the snapshot TTL policy, and records one audit event per call. The
//! functions it wraps stay pure and remain callable directly.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use crate::audit::AuditSink;
use crate::audit::ResolutionAuditEvent;
use crate::audit::ResolutionOutcome;
use crate::audit::SnapshotAuditEvent;
use crate::audit::SnapshotOutcome;
use crate::core::DashboardContext;
use crate::core::DashboardDeclaration;
use crate::core::DashboardSnapshot;
use crate::core::EntitlementSnapshot;
use crate::core::FeatureSnapshot;
use crate::core::PermissionResult;
use crate::core::ResolvedDashboard;
use crate::core::Timestamp;
use crate::interfaces::Clock;
use crate::runtime::resolver::IsolationError;
use crate::runtime::resolver::ResolutionPath;
use crate::runtime::resolver::resolve_dashboard_traced;
use crate::runtime::snapshot::SnapshotError;
use crate::runtime::snapshot::evaluate_from_snapshot;
use crate::runtime::snapshot::generate_dashboard_snapshot;
use crate::runtime::snapshot::verify_snapshot_integrity;

// ============================================================================
// SECTION: Snapshot Policy
// ============================================================================

/// Snapshot expiry policy applied by the facade.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SnapshotPolicy {
    /// Expiry applied when the caller does not request one.
    pub default_ttl_ms: Option<u64>,
    /// Largest expiry a caller may request.
    pub max_ttl_ms: Option<u64>,
}

impl SnapshotPolicy {
    /// Returns the effective expiry for a request.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::ExpiryExceedsLimit`] when the expiry is above
    /// `max_ttl_ms`.
    pub fn effective_ttl(&self, requested: Option<u64>) -> Result<Option<u64>, SnapshotError> {
        let ttl = requested.or(self.default_ttl_ms).filter(|millis| *millis > 0);
        match (ttl, self.max_ttl_ms) {
            (Some(expires_in_ms), Some(max_ttl_ms)) if expires_in_ms > max_ttl_ms => {
                Err(SnapshotError::ExpiryExceedsLimit {
                    expires_in_ms,
                    max_ttl_ms,
                })
            }
            _ => Ok(ttl),
        }
    }
}

// ============================================================================
// SECTION: Dashboard Gate
// ============================================================================

/// Audited entry point for resolution and snapshot operations.
#[derive(Clone)]
pub struct DashboardGate {
    /// Clock used for boundary defaults and audit timestamps.
    clock: Arc<dyn Clock>,
    /// Audit destination.
    audit: Arc<dyn AuditSink>,
    /// Snapshot expiry policy.
    policy: SnapshotPolicy,
}

impl DashboardGate {
    /// Creates a facade with no snapshot expiry policy.
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, audit: Arc<dyn AuditSink>) -> Self {
        Self {
            clock,
            audit,
            policy: SnapshotPolicy::default(),
        }
    }

    /// Replaces the snapshot expiry policy.
    #[must_use]
    pub const fn with_snapshot_policy(mut self, policy: SnapshotPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns the active snapshot policy.
    #[must_use]
    pub const fn snapshot_policy(&self) -> SnapshotPolicy {
        self.policy
    }

    /// Resolves a dashboard and records the outcome.
    ///
    /// # Errors
    ///
    /// Returns [`IsolationError`] when an isolation gate fails.
    pub fn resolve(
        &self,
        declaration: &DashboardDeclaration,
        context: &DashboardContext,
        permissions: &PermissionResult,
        entitlements: &EntitlementSnapshot,
        features: &FeatureSnapshot,
    ) -> Result<ResolvedDashboard, IsolationError> {
        let result =
            resolve_dashboard_traced(declaration, context, permissions, entitlements, features);
        let mut event = ResolutionAuditEvent {
            event: "dashboard_resolve",
            recorded_at: self.recorded_at(),
            dashboard_id: declaration.dashboard_id.clone(),
            subject_id: context.subject_id.clone(),
            subject_type: context.subject_type,
            tenant_id: context.tenant_id.clone(),
            evaluation_time: context.evaluation_time,
            outcome: ResolutionOutcome::Resolved,
            fault_kind: None,
            visible_count: 0,
            hidden_count: 0,
            reason_codes: Vec::new(),
        };
        match &result {
            Ok((resolved, path)) => {
                if *path == ResolutionPath::DashboardDenied {
                    event.outcome = ResolutionOutcome::PolicyDenied;
                }
                event.visible_count = resolved.visible_sections.len();
                event.hidden_count = resolved.hidden_sections.len();
                event.reason_codes = resolved.reason_codes();
            }
            Err(err) => {
                event.outcome = ResolutionOutcome::IsolationFault;
                event.fault_kind = Some(err.kind().label());
            }
        }
        self.audit.record_resolution(&event);
        result.map(|(resolved, _)| resolved)
    }

    /// Generates a snapshot, applying the expiry policy.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError`] when the expiry is rejected or hashing fails.
    pub fn generate_snapshot(
        &self,
        declaration: &DashboardDeclaration,
        resolved: &ResolvedDashboard,
        context: &DashboardContext,
        expires_in_ms: Option<u64>,
    ) -> Result<DashboardSnapshot, SnapshotError> {
        let result = self
            .policy
            .effective_ttl(expires_in_ms)
            .and_then(|ttl| generate_dashboard_snapshot(declaration, resolved, context, ttl));
        let (snapshot_id, expires_at, outcome) = match &result {
            Ok(snapshot) => (
                Some(snapshot.snapshot_id.clone()),
                snapshot.expires_at,
                SnapshotOutcome::Generated,
            ),
            Err(_) => (None, None, SnapshotOutcome::Failed),
        };
        self.audit.record_snapshot(&SnapshotAuditEvent {
            event: "snapshot_generate",
            recorded_at: self.recorded_at(),
            snapshot_id,
            dashboard_id: declaration.dashboard_id.clone(),
            tenant_id: context.tenant_id.clone(),
            outcome,
            expires_at,
        });
        result
    }

    /// Verifies a snapshot checksum as of `at`, or its stored instant.
    #[must_use]
    pub fn verify_snapshot(&self, snapshot: &DashboardSnapshot, at: Option<Timestamp>) -> bool {
        let valid = verify_snapshot_integrity(snapshot, at.unwrap_or(snapshot.evaluation_time));
        let outcome = if valid { SnapshotOutcome::Valid } else { SnapshotOutcome::Tampered };
        self.record_snapshot_event("snapshot_verify", snapshot, outcome);
        valid
    }

    /// Reproduces a resolution from a snapshot as of `at`, or now.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::Clock`] when `at` is omitted and the clock
    /// cannot supply an instant.
    pub fn evaluate_snapshot(
        &self,
        snapshot: &DashboardSnapshot,
        at: Option<Timestamp>,
    ) -> Result<ResolvedDashboard, SnapshotError> {
        let at = match at {
            Some(at) => at,
            None => self.clock.now()?,
        };
        let outcome = if snapshot.is_expired_at(at) {
            SnapshotOutcome::Expired
        } else {
            SnapshotOutcome::Reproduced
        };
        self.record_snapshot_event("snapshot_evaluate", snapshot, outcome);
        Ok(evaluate_from_snapshot(snapshot, at))
    }

    /// Records a snapshot event for an existing snapshot.
    fn record_snapshot_event(
        &self,
        event: &'static str,
        snapshot: &DashboardSnapshot,
        outcome: SnapshotOutcome,
    ) {
        self.audit.record_snapshot(&SnapshotAuditEvent {
            event,
            recorded_at: self.recorded_at(),
            snapshot_id: Some(snapshot.snapshot_id.clone()),
            dashboard_id: snapshot.dashboard_id.clone(),
            tenant_id: snapshot.tenant_id.clone(),
            outcome,
            expires_at: snapshot.expires_at,
        });
    }

    /// Audit timestamp, or `None` when the clock cannot supply one.
    fn recorded_at(&self) -> Option<Timestamp> {
        self.clock.now().ok()
    }
}
