// crates/dashboard-gate-core/src/interfaces/mod.rs
// ============================================================================
// Module: Dashboard Gate Interfaces
// Description: Host-supplied seams for time and audit output.
// Purpose: Keep wall-clock reads and logging out of the deterministic core.
// Dependencies: crate::{audit, core}, time
// ============================================================================

//! ## Overview
//! Resolution and verification are pure functions over explicit inputs. The
//! only ambient inputs a host supplies are "now" (through [`Clock`]) and an
//! audit destination (through [`AuditSink`]). Both are consumed by the
//! [`crate::DashboardGate`] facade, never by the resolver itself.

// ============================================================================
// SECTION: Imports
// ============================================================================

use time::OffsetDateTime;

pub use crate::audit::AuditSink;
use crate::core::TimeError;
use crate::core::Timestamp;

// ============================================================================
// SECTION: Clock
// ============================================================================

/// Source of the current instant for boundary defaults.
pub trait Clock: Send + Sync {
    /// Returns the current instant.
    ///
    /// # Errors
    ///
    /// Returns [`TimeError`] when the instant cannot be represented.
    fn now(&self) -> Result<Timestamp, TimeError>;
}

/// Clock backed by the host wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Result<Timestamp, TimeError> {
        Timestamp::from_offset_datetime(OffsetDateTime::now_utc())
    }
}

/// Clock pinned to a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    /// Instant returned by every call.
    instant: Timestamp,
}

impl FixedClock {
    /// Creates a clock that always returns `instant`.
    #[must_use]
    pub const fn new(instant: Timestamp) -> Self {
        Self {
            instant,
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Result<Timestamp, TimeError> {
        Ok(self.instant)
    }
}
