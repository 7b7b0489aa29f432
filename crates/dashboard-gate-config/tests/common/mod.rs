// crates/dashboard-gate-config/tests/common/mod.rs
// =============================================================================
// Module: Config Test Helpers
// Description: Shared helpers for config validation tests.
// Purpose: Reduce duplication across integration tests for dashboard-gate-config.
// =============================================================================

#![allow(dead_code, reason = "Test helpers are selectively used across suites.")]

use std::fs;
use std::path::PathBuf;

use dashboard_gate_config::ConfigError;
use dashboard_gate_config::DashboardGateConfig;
use tempfile::TempDir;

/// Parses and validates a TOML string.
pub fn config_from_toml(toml_str: &str) -> Result<DashboardGateConfig, ConfigError> {
    DashboardGateConfig::from_bytes(toml_str.as_bytes())
}

/// Writes `contents` to `dashboard-gate.toml` inside a fresh temp directory.
pub fn write_config(contents: &str) -> Result<(TempDir, PathBuf), String> {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    let path = dir.path().join("dashboard-gate.toml");
    fs::write(&path, contents).map_err(|err| err.to_string())?;
    Ok((dir, path))
}

/// Asserts that `result` failed with a message containing `needle`.
pub fn assert_invalid<T>(result: Result<T, ConfigError>, needle: &str) -> Result<(), String> {
    match result {
        Err(error) => {
            let message = error.to_string();
            if message.contains(needle) {
                Ok(())
            } else {
                Err(format!("error {message} did not contain {needle}"))
            }
        }
        Ok(_) => Err("expected invalid config".to_string()),
    }
}
