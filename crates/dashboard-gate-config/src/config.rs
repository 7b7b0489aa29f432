// crates/dashboard-gate-config/src/config.rs
// ============================================================================
// Module: Dashboard Gate Configuration
// Description: Configuration loading and validation for Dashboard Gate.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: dashboard-gate-core, serde, thiserror, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path limits.
//! The path comes from the CLI flag, then [`CONFIG_ENV_VAR`], then
//! `dashboard-gate.toml` in the working directory. Only the implicit default
//! file may be absent, in which case built-in defaults apply. Every other
//! problem fails closed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

use dashboard_gate_core::AuditSink;
use dashboard_gate_core::FileAuditSink;
use dashboard_gate_core::NoopAuditSink;
use dashboard_gate_core::SnapshotPolicy;
use dashboard_gate_core::StderrAuditSink;
use serde::Deserialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "dashboard-gate.toml";
/// Environment variable used to override the config path.
pub const CONFIG_ENV_VAR: &str = "DASHBOARD_GATE_CONFIG";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 256 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Default per-file input limit for CLI inputs.
pub(crate) const DEFAULT_MAX_INPUT_BYTES: usize = 1024 * 1024;
/// Hard ceiling for the per-file input limit.
pub(crate) const MAX_INPUT_BYTES_CEILING: usize = 64 * 1024 * 1024;

// ============================================================================
// SECTION: Root Config
// ============================================================================

/// Root configuration for the Dashboard Gate CLI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DashboardGateConfig {
    /// Snapshot expiry policy.
    #[serde(default)]
    pub snapshot: SnapshotConfig,
    /// Audit destination.
    #[serde(default)]
    pub audit: AuditConfig,
    /// Input limits.
    #[serde(default)]
    pub limits: LimitsConfig,
}

impl DashboardGateConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (resolved, source) = resolve_path(path, env::var(CONFIG_ENV_VAR).ok())?;
        validate_path(&resolved)?;
        if source == ConfigSource::Default && !resolved.exists() {
            return Ok(Self::default());
        }
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        Self::from_bytes(&bytes)
    }

    /// Parses and validates configuration from raw TOML bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the bytes are oversized, not UTF-8, not
    /// valid TOML, or fail validation.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ConfigError> {
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.snapshot.validate()?;
        self.audit.validate()?;
        self.limits.validate()?;
        Ok(())
    }

    /// Returns the snapshot policy applied by the gate facade.
    #[must_use]
    pub const fn snapshot_policy(&self) -> SnapshotPolicy {
        SnapshotPolicy {
            default_ttl_ms: self.snapshot.default_ttl_ms,
            max_ttl_ms: self.snapshot.max_ttl_ms,
        }
    }
}

// ============================================================================
// SECTION: Snapshot Config
// ============================================================================

/// Snapshot expiry settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SnapshotConfig {
    /// Expiry applied when a request does not specify one.
    #[serde(default)]
    pub default_ttl_ms: Option<u64>,
    /// Largest expiry a request may specify.
    #[serde(default)]
    pub max_ttl_ms: Option<u64>,
}

impl SnapshotConfig {
    /// Validates expiry settings.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.default_ttl_ms == Some(0) {
            return Err(ConfigError::Invalid(
                "snapshot.default_ttl_ms must be greater than zero; omit it for no expiry"
                    .to_string(),
            ));
        }
        if self.max_ttl_ms == Some(0) {
            return Err(ConfigError::Invalid(
                "snapshot.max_ttl_ms must be greater than zero".to_string(),
            ));
        }
        if let (Some(default_ttl), Some(max_ttl)) = (self.default_ttl_ms, self.max_ttl_ms)
            && default_ttl > max_ttl
        {
            return Err(ConfigError::Invalid(
                "snapshot.default_ttl_ms exceeds snapshot.max_ttl_ms".to_string(),
            ));
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Audit Config
// ============================================================================

/// Audit destination kinds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditSinkKind {
    /// JSON lines on stderr.
    #[default]
    Stderr,
    /// JSON lines appended to `audit.path`.
    File,
    /// Audit disabled.
    None,
}

/// Audit destination settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuditConfig {
    /// Destination kind.
    #[serde(default)]
    pub sink: AuditSinkKind,
    /// Log file path, required for the `file` sink.
    #[serde(default)]
    pub path: Option<String>,
}

impl AuditConfig {
    /// Validates the audit destination.
    fn validate(&self) -> Result<(), ConfigError> {
        match (self.sink, self.path.as_deref()) {
            (AuditSinkKind::File, Some(path)) => validate_path_string("audit.path", path),
            (AuditSinkKind::File, None) => {
                Err(ConfigError::Invalid("audit.sink=file requires audit.path".to_string()))
            }
            (_, Some(_)) => Err(ConfigError::Invalid(
                "audit.path is only valid with audit.sink=file".to_string(),
            )),
            (_, None) => Ok(()),
        }
    }

    /// Opens the configured audit sink.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] when the audit file cannot be opened.
    pub fn open_sink(&self) -> Result<Arc<dyn AuditSink>, ConfigError> {
        match (self.sink, self.path.as_deref()) {
            (AuditSinkKind::Stderr, _) => Ok(Arc::new(StderrAuditSink)),
            (AuditSinkKind::None, _) => Ok(Arc::new(NoopAuditSink)),
            (AuditSinkKind::File, Some(path)) => {
                let sink = FileAuditSink::new(Path::new(path.trim()))
                    .map_err(|err| ConfigError::Io(err.to_string()))?;
                Ok(Arc::new(sink))
            }
            (AuditSinkKind::File, None) => {
                Err(ConfigError::Invalid("audit.sink=file requires audit.path".to_string()))
            }
        }
    }
}

// ============================================================================
// SECTION: Limits Config
// ============================================================================

/// Input size limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LimitsConfig {
    /// Maximum size of any single input file in bytes.
    #[serde(default = "default_max_input_bytes")]
    pub max_input_bytes: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_input_bytes: default_max_input_bytes(),
        }
    }
}

impl LimitsConfig {
    /// Validates input limits.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_input_bytes == 0 {
            return Err(ConfigError::Invalid(
                "limits.max_input_bytes must be greater than zero".to_string(),
            ));
        }
        if self.max_input_bytes > MAX_INPUT_BYTES_CEILING {
            return Err(ConfigError::Invalid(format!(
                "limits.max_input_bytes exceeds {MAX_INPUT_BYTES_CEILING}"
            )));
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading or validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Where the config path came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigSource {
    /// Explicit CLI flag.
    Flag,
    /// [`CONFIG_ENV_VAR`].
    Environment,
    /// Implicit default filename.
    Default,
}

/// Resolves the config path from CLI or environment defaults.
fn resolve_path(
    path: Option<&Path>,
    env_path: Option<String>,
) -> Result<(PathBuf, ConfigSource), ConfigError> {
    if let Some(path) = path {
        return Ok((path.to_path_buf(), ConfigSource::Flag));
    }
    if let Some(env_path) = env_path {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok((PathBuf::from(env_path), ConfigSource::Environment));
    }
    Ok((PathBuf::from(DEFAULT_CONFIG_NAME), ConfigSource::Default))
}

/// Validates the resolved path against security limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Validates a path string against length constraints.
fn validate_path_string(field: &str, value: &str) -> Result<(), ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    if trimmed.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds max length")));
    }
    for component in Path::new(trimmed).components() {
        if component.as_os_str().len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid(format!("{field} component too long")));
        }
    }
    Ok(())
}

/// Default input limit.
pub(crate) const fn default_max_input_bytes() -> usize {
    DEFAULT_MAX_INPUT_BYTES
}

// ============================================================================
// SECTION: Tests
// ============================================================================
