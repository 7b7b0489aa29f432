// crates/dashboard-gate-config/src/lib.rs
// ============================================================================
// Module: Dashboard Gate Config Library
// Description: Canonical config model and validation.
// Purpose: Single source of truth for dashboard-gate.toml semantics.
// Dependencies: dashboard-gate-core, serde, toml
// ============================================================================

//! ## Overview
//! `dashboard-gate-config` defines the configuration model for the Dashboard
//! Gate CLI: snapshot expiry policy, audit destination, and input limits. It
//! provides strict, fail-closed validation and converts validated settings
//! into the runtime types of `dashboard-gate-core`.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
