// crates/dashboard-gate-core/src/core/time.rs
// ============================================================================
// Module: Dashboard Gate Time Model
// Description: Canonical UTC timestamps for evaluation and expiry instants.
// Purpose: Provide millisecond-precision instants with a fixed wire format.
// Dependencies: serde, thiserror, time
// ============================================================================

//! ## Overview
//! Dashboard Gate carries evaluation and expiry instants as explicit values.
//! The resolution and verification core never reads wall-clock time; hosts
//! supply instants through the request context or a [`crate::Clock`].
//!
//! Every [`Timestamp`] renders as `YYYY-MM-DDTHH:MM:SS.mmmZ`. That string is
//! part of the snapshot checksum payload, so its format is fixed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use thiserror::Error;
use time::Duration;
use time::OffsetDateTime;
use time::UtcOffset;
use time::format_description::well_known::Rfc3339;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Nanoseconds per millisecond.
const NANOS_PER_MILLI: i128 = 1_000_000;
/// Largest calendar year representable in the four-digit wire format.
const MAX_YEAR: i32 = 9999;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised when constructing or parsing timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeError {
    /// Input string is not a valid RFC 3339 timestamp.
    #[error("invalid timestamp '{0}': expected RFC 3339")]
    Parse(String),
    /// Instant falls outside years 0000 through 9999.
    #[error("timestamp out of range")]
    OutOfRange,
}

// ============================================================================
// SECTION: Timestamp
// ============================================================================

/// UTC instant with millisecond precision.
///
/// # Invariants
/// - Offset is always UTC.
/// - Sub-millisecond components are always zero.
/// - Year is within 0000 through 9999.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(OffsetDateTime);

impl Timestamp {
    /// Creates a timestamp from unix epoch milliseconds.
    ///
    /// # Errors
    ///
    /// Returns [`TimeError::OutOfRange`] when the instant cannot be represented.
    pub fn from_unix_millis(millis: i64) -> Result<Self, TimeError> {
        let nanos = i128::from(millis) * NANOS_PER_MILLI;
        let value =
            OffsetDateTime::from_unix_timestamp_nanos(nanos).map_err(|_| TimeError::OutOfRange)?;
        Self::checked(value)
    }

    /// Creates a timestamp from any offset date-time, truncating to milliseconds.
    ///
    /// # Errors
    ///
    /// Returns [`TimeError::OutOfRange`] when the instant cannot be represented.
    pub fn from_offset_datetime(value: OffsetDateTime) -> Result<Self, TimeError> {
        let utc = value.to_offset(UtcOffset::UTC);
        let truncated =
            utc.replace_millisecond(utc.millisecond()).map_err(|_| TimeError::OutOfRange)?;
        Self::checked(truncated)
    }

    /// Parses an RFC 3339 timestamp, normalizing to UTC milliseconds.
    ///
    /// # Errors
    ///
    /// Returns [`TimeError`] when the input is malformed or out of range.
    pub fn parse(input: &str) -> Result<Self, TimeError> {
        let parsed = OffsetDateTime::parse(input, &Rfc3339)
            .map_err(|_| TimeError::Parse(input.to_string()))?;
        Self::from_offset_datetime(parsed)
    }

    /// Returns the instant as unix epoch milliseconds.
    #[must_use]
    pub fn unix_millis(&self) -> i64 {
        self.0.unix_timestamp() * 1_000 + i64::from(self.0.millisecond())
    }

    /// Returns the instant shifted forward by `millis`, or `None` on overflow.
    #[must_use]
    pub fn checked_add_millis(&self, millis: u64) -> Option<Self> {
        let millis = i64::try_from(millis).ok()?;
        let shifted = self.0.checked_add(Duration::milliseconds(millis))?;
        Self::checked(shifted).ok()
    }

    /// Renders the canonical `YYYY-MM-DDTHH:MM:SS.mmmZ` form.
    #[must_use]
    pub fn to_iso_string(&self) -> String {
        let value = self.0;
        format!(
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}.{:03}Z",
            value.year(),
            u8::from(value.month()),
            value.day(),
            value.hour(),
            value.minute(),
            value.second(),
            value.millisecond()
        )
    }

    /// Enforces the four-digit year range.
    fn checked(value: OffsetDateTime) -> Result<Self, TimeError> {
        if (0 ..= MAX_YEAR).contains(&value.year()) {
            Ok(Self(value))
        } else {
            Err(TimeError::OutOfRange)
        }
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_iso_string())
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_iso_string())
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
