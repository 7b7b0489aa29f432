// crates/dashboard-gate-core/src/audit.rs
// ============================================================================
// Module: Dashboard Gate Audit Logging
// Description: Structured audit events for resolution and snapshot calls.
// Purpose: Emit JSON-line audit records without a logging framework dependency.
// Dependencies: crate::core, serde, serde_json
// ============================================================================

//! ## Overview
//! Every call through [`crate::DashboardGate`] produces one audit event.
//! Events carry identifiers, outcome labels, counts, and reason codes; they
//! never carry section labels or grant lists. Sinks serialize events as JSON
//! lines so deployments can route them to any log pipeline.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use serde::Serialize;

use crate::core::DashboardId;
use crate::core::HiddenReasonCode;
use crate::core::SnapshotId;
use crate::core::SubjectId;
use crate::core::SubjectType;
use crate::core::TenantId;
use crate::core::Timestamp;

// ============================================================================
// SECTION: Outcomes
// ============================================================================

/// Outcome label for a resolution call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionOutcome {
    /// Section-level resolution completed (possibly with hidden sections).
    Resolved,
    /// A dashboard-level capability, entitlement, or feature gate denied access.
    PolicyDenied,
    /// An isolation gate aborted the call.
    IsolationFault,
}

/// Outcome label for a snapshot call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SnapshotOutcome {
    /// Snapshot generated.
    Generated,
    /// Snapshot generation failed.
    Failed,
    /// Checksum matched.
    Valid,
    /// Checksum did not match.
    Tampered,
    /// Stored result reproduced.
    Reproduced,
    /// Snapshot expired; empty result returned.
    Expired,
}

// ============================================================================
// SECTION: Events
// ============================================================================

/// Audit event for one dashboard resolution.
#[derive(Debug, Clone, Serialize)]
pub struct ResolutionAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Instant the event was recorded; null when the clock was unavailable.
    pub recorded_at: Option<Timestamp>,
    /// Dashboard identifier.
    pub dashboard_id: DashboardId,
    /// Requesting subject.
    pub subject_id: SubjectId,
    /// Requesting subject type.
    pub subject_type: SubjectType,
    /// Request tenant.
    pub tenant_id: TenantId,
    /// Request evaluation instant.
    pub evaluation_time: Timestamp,
    /// Outcome label.
    pub outcome: ResolutionOutcome,
    /// Isolation fault label when the outcome is a fault.
    pub fault_kind: Option<&'static str>,
    /// Number of visible top-level sections.
    pub visible_count: usize,
    /// Number of hidden section IDs.
    pub hidden_count: usize,
    /// Distinct reason codes in first-seen order.
    pub reason_codes: Vec<HiddenReasonCode>,
}

/// Audit event for one snapshot operation.
#[derive(Debug, Clone, Serialize)]
pub struct SnapshotAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Instant the event was recorded; null when the clock was unavailable.
    pub recorded_at: Option<Timestamp>,
    /// Snapshot identifier when one exists.
    pub snapshot_id: Option<SnapshotId>,
    /// Dashboard identifier.
    pub dashboard_id: DashboardId,
    /// Tenant identifier.
    pub tenant_id: TenantId,
    /// Outcome label.
    pub outcome: SnapshotOutcome,
    /// Expiry instant when the snapshot is time-bounded.
    pub expires_at: Option<Timestamp>,
}

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Destination for audit events.
pub trait AuditSink: Send + Sync {
    /// Records a resolution event.
    fn record_resolution(&self, event: &ResolutionAuditEvent);

    /// Records a snapshot event.
    fn record_snapshot(&self, _event: &SnapshotAuditEvent) {}
}

/// Audit sink that logs JSON lines to stderr.
pub struct StderrAuditSink;

impl AuditSink for StderrAuditSink {
    fn record_resolution(&self, event: &ResolutionAuditEvent) {
        write_json_line(&mut io::stderr(), event);
    }

    fn record_snapshot(&self, event: &SnapshotAuditEvent) {
        write_json_line(&mut io::stderr(), event);
    }
}

/// Audit sink that appends JSON lines to a file.
pub struct FileAuditSink {
    /// File handle used for append-only logging.
    file: Mutex<std::fs::File>,
}

impl FileAuditSink {
    /// Opens the audit log file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl AuditSink for FileAuditSink {
    fn record_resolution(&self, event: &ResolutionAuditEvent) {
        if let Ok(mut file) = self.file.lock() {
            write_json_line(&mut *file, event);
        }
    }

    fn record_snapshot(&self, event: &SnapshotAuditEvent) {
        if let Ok(mut file) = self.file.lock() {
            write_json_line(&mut *file, event);
        }
    }
}

/// No-op audit sink.
pub struct NoopAuditSink;

impl AuditSink for NoopAuditSink {
    fn record_resolution(&self, _event: &ResolutionAuditEvent) {}

    fn record_snapshot(&self, _event: &SnapshotAuditEvent) {}
}

/// Serializes `event` as one JSON line; write failures are dropped.
fn write_json_line<W: Write, E: Serialize>(writer: &mut W, event: &E) {
    if let Ok(payload) = serde_json::to_string(event) {
        let _ = writeln!(writer, "{payload}");
        let _ = writer.flush();
    }
}
