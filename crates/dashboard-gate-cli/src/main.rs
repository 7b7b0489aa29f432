// crates/dashboard-gate-cli/src/main.rs
// ============================================================================
// Module: Dashboard Gate CLI Entry Point
// Description: Command dispatcher for resolution and snapshot workflows.
// Purpose: Resolve dashboards and check snapshots from JSON files on disk.
// Dependencies: clap, dashboard-gate-config, dashboard-gate-core, serde, thiserror
// ============================================================================

//! ## Overview
//! The Dashboard Gate CLI reads declaration, context, and grant documents
//! from disk, resolves visibility through the audited
//! [`DashboardGate`] facade, and writes canonical JSON to stdout. Snapshot
//! subcommands verify and replay previously written snapshots.
//!
//! Inputs are untrusted: every file read is bounded by
//! `limits.max_input_bytes`, and every failure exits non-zero.

// ============================================================================
// SECTION: Modules
// ============================================================================


// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::fs::File;
use std::io::Read;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Args;
use clap::Parser;
use clap::Subcommand;
use dashboard_gate_config::DashboardGateConfig;
use dashboard_gate_core::DashboardContext;
use dashboard_gate_core::DashboardDeclaration;
use dashboard_gate_core::DashboardGate;
use dashboard_gate_core::DashboardSnapshot;
use dashboard_gate_core::EntitlementSnapshot;
use dashboard_gate_core::FeatureSnapshot;
use dashboard_gate_core::PermissionResult;
use dashboard_gate_core::SystemClock;
use dashboard_gate_core::Timestamp;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "dashboard-gate", version, disable_help_subcommand = true)]
struct Cli {
    /// Optional config file path (defaults to dashboard-gate.toml or env override).
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Commands,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Resolve dashboard visibility for one request.
    Resolve(ResolveCommand),
    /// Snapshot verification and replay utilities.
    Snapshot {
        /// Selected snapshot subcommand.
        #[command(subcommand)]
        command: SnapshotCommand,
    },
    /// Configuration utilities.
    Config {
        /// Selected config subcommand.
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Arguments for the `resolve` command.
#[derive(Args, Debug)]
struct ResolveCommand {
    /// Dashboard declaration JSON.
    #[arg(long, value_name = "PATH")]
    declaration: PathBuf,
    /// Request context JSON.
    #[arg(long, value_name = "PATH")]
    context: PathBuf,
    /// Permission result JSON.
    #[arg(long, value_name = "PATH")]
    permissions: PathBuf,
    /// Entitlement snapshot JSON.
    #[arg(long, value_name = "PATH")]
    entitlements: PathBuf,
    /// Feature snapshot JSON.
    #[arg(long, value_name = "PATH")]
    features: PathBuf,
    /// Writes a snapshot of the result to this path.
    #[arg(long, value_name = "PATH")]
    snapshot_out: Option<PathBuf>,
    /// Snapshot expiry in milliseconds (0 disables expiry).
    #[arg(long, value_name = "MS", requires = "snapshot_out")]
    expires_in_ms: Option<u64>,
}

/// Snapshot subcommands.
#[derive(Subcommand, Debug)]
enum SnapshotCommand {
    /// Verify a snapshot checksum.
    Verify(SnapshotVerifyCommand),
    /// Reproduce a resolution from a snapshot.
    Evaluate(SnapshotEvaluateCommand),
}

/// Arguments for `snapshot verify`.
#[derive(Args, Debug)]
struct SnapshotVerifyCommand {
    /// Snapshot JSON.
    #[arg(long, value_name = "PATH")]
    snapshot: PathBuf,
    /// Evaluation instant to verify against (defaults to the stored instant).
    #[arg(long, value_name = "RFC3339", value_parser = parse_timestamp)]
    at: Option<Timestamp>,
}

/// Arguments for `snapshot evaluate`.
#[derive(Args, Debug)]
struct SnapshotEvaluateCommand {
    /// Snapshot JSON.
    #[arg(long, value_name = "PATH")]
    snapshot: PathBuf,
    /// Instant to evaluate expiry at (defaults to now).
    #[arg(long, value_name = "RFC3339", value_parser = parse_timestamp)]
    at: Option<Timestamp>,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Validate a Dashboard Gate configuration file.
    Validate,
}

/// Output of `snapshot verify`.
#[derive(Debug, Serialize)]
struct VerifyReport {
    /// Whether the checksum matched.
    valid: bool,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for user-facing error messages.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`] from a message.
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    let config = DashboardGateConfig::load(cli.config.as_deref())
        .map_err(|err| CliError::new(format!("failed to load config: {err}")))?;

    match cli.command {
        Commands::Resolve(command) => command_resolve(&command, &config),
        Commands::Snapshot {
            command,
        } => match command {
            SnapshotCommand::Verify(command) => command_snapshot_verify(&command, &config),
            SnapshotCommand::Evaluate(command) => command_snapshot_evaluate(&command, &config),
        },
        Commands::Config {
            command: ConfigCommand::Validate,
        } => command_config_validate(),
    }
}

/// Builds the audited gate from validated configuration.
fn build_gate(config: &DashboardGateConfig) -> CliResult<DashboardGate> {
    let audit = config
        .audit
        .open_sink()
        .map_err(|err| CliError::new(format!("failed to open audit sink: {err}")))?;
    Ok(DashboardGate::new(Arc::new(SystemClock), audit)
        .with_snapshot_policy(config.snapshot_policy()))
}

// ============================================================================
// SECTION: Resolve Command
// ============================================================================

/// Executes the `resolve` command.
fn command_resolve(command: &ResolveCommand, config: &DashboardGateConfig) -> CliResult<ExitCode> {
    let limit = config.limits.max_input_bytes;
    let declaration: DashboardDeclaration =
        read_json(&command.declaration, "declaration", limit)?;
    let context: DashboardContext = read_json(&command.context, "context", limit)?;
    let permissions: PermissionResult = read_json(&command.permissions, "permissions", limit)?;
    let entitlements: EntitlementSnapshot =
        read_json(&command.entitlements, "entitlements", limit)?;
    let features: FeatureSnapshot = read_json(&command.features, "features", limit)?;

    let gate = build_gate(config)?;
    let resolved = gate
        .resolve(&declaration, &context, &permissions, &entitlements, &features)
        .map_err(|err| CliError::new(format!("isolation fault ({}): {err}", err.kind().label())))?;

    if let Some(path) = &command.snapshot_out {
        let snapshot = gate
            .generate_snapshot(&declaration, &resolved, &context, command.expires_in_ms)
            .map_err(|err| CliError::new(format!("failed to generate snapshot: {err}")))?;
        write_json_file(path, &snapshot)?;
    }

    write_canonical_json(&resolved)?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Snapshot Commands
// ============================================================================

/// Executes `snapshot verify`.
fn command_snapshot_verify(
    command: &SnapshotVerifyCommand,
    config: &DashboardGateConfig,
) -> CliResult<ExitCode> {
    let snapshot: DashboardSnapshot =
        read_json(&command.snapshot, "snapshot", config.limits.max_input_bytes)?;
    let gate = build_gate(config)?;
    let valid = gate.verify_snapshot(&snapshot, command.at);
    write_canonical_json(&VerifyReport {
        valid,
    })?;
    Ok(if valid { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

/// Executes `snapshot evaluate`.
fn command_snapshot_evaluate(
    command: &SnapshotEvaluateCommand,
    config: &DashboardGateConfig,
) -> CliResult<ExitCode> {
    let snapshot: DashboardSnapshot =
        read_json(&command.snapshot, "snapshot", config.limits.max_input_bytes)?;
    let gate = build_gate(config)?;
    let resolved = gate
        .evaluate_snapshot(&snapshot, command.at)
        .map_err(|err| CliError::new(format!("failed to evaluate snapshot: {err}")))?;
    write_canonical_json(&resolved)?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Config Commands
// ============================================================================

/// Executes `config validate`; loading already validated the file.
fn command_config_validate() -> CliResult<ExitCode> {
    write_stdout_line("config ok").map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Input Helpers
// ============================================================================

/// Errors returned by bounded file reads.
#[derive(Debug)]
enum ReadLimitError {
    /// File I/O failure.
    Io(std::io::Error),
    /// File size exceeds the configured limit.
    TooLarge {
        /// Actual size in bytes.
        size: u64,
        /// Allowed limit in bytes.
        limit: usize,
    },
}

/// Reads a file from disk while enforcing a hard size limit.
fn read_bytes_with_limit(path: &Path, max_bytes: usize) -> Result<Vec<u8>, ReadLimitError> {
    let file = File::open(path).map_err(ReadLimitError::Io)?;
    let metadata = file.metadata().map_err(ReadLimitError::Io)?;
    let size = metadata.len();
    let limit = u64::try_from(max_bytes).map_err(|_| ReadLimitError::TooLarge {
        size,
        limit: max_bytes,
    })?;
    if size > limit {
        return Err(ReadLimitError::TooLarge {
            size,
            limit: max_bytes,
        });
    }

    let read_limit = limit.saturating_add(1);
    let mut limited = file.take(read_limit);
    let mut bytes = Vec::new();
    limited.read_to_end(&mut bytes).map_err(ReadLimitError::Io)?;
    if bytes.len() > max_bytes {
        let actual = u64::try_from(bytes.len()).unwrap_or(u64::MAX);
        return Err(ReadLimitError::TooLarge {
            size: actual,
            limit: max_bytes,
        });
    }
    Ok(bytes)
}

/// Reads and decodes a bounded JSON input.
fn read_json<T: DeserializeOwned>(path: &Path, kind: &str, max_bytes: usize) -> CliResult<T> {
    let bytes = read_bytes_with_limit(path, max_bytes).map_err(|err| match err {
        ReadLimitError::Io(err) => {
            CliError::new(format!("failed to read {kind} {}: {err}", path.display()))
        }
        ReadLimitError::TooLarge {
            size,
            limit,
        } => CliError::new(format!(
            "{kind} {} exceeds size limit ({size} > {limit} bytes)",
            path.display()
        )),
    })?;
    serde_json::from_slice(&bytes)
        .map_err(|err| CliError::new(format!("invalid {kind} {}: {err}", path.display())))
}

/// Parses an RFC 3339 instant for `--at`.
fn parse_timestamp(value: &str) -> Result<Timestamp, String> {
    Timestamp::parse(value).map_err(|err| err.to_string())
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a value as pretty JSON to a file.
fn write_json_file<T: Serialize>(path: &Path, value: &T) -> CliResult<()> {
    let mut bytes = serde_json::to_vec_pretty(value)
        .map_err(|err| CliError::new(format!("failed to serialize output: {err}")))?;
    bytes.push(b'\n');
    fs::write(path, bytes)
        .map_err(|err| CliError::new(format!("failed to write {}: {err}", path.display())))
}

/// Writes canonical JSON to stdout.
fn write_canonical_json<T: Serialize>(value: &T) -> CliResult<()> {
    let mut bytes = serde_jcs::to_vec(value)
        .map_err(|err| CliError::new(format!("failed to serialize output: {err}")))?;
    bytes.push(b'\n');
    write_stdout_bytes(&bytes).map_err(|err| CliError::new(output_error("stdout", &err)))
}

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes raw bytes to stdout without adding a newline.
fn write_stdout_bytes(bytes: &[u8]) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    stdout.write_all(bytes)
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats an output error message.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    format!("failed to write to {stream}: {error}")
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
