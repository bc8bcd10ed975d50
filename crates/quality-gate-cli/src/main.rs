// crates/quality-gate-cli/src/main.rs
// ============================================================================
// Module: QualityGate CLI Entry Point
// Description: `scan` and `persist` subcommands for the quality-gate binary.
// Purpose: Run detectors, compute a baseline-aware verdict, and persist
// scan reports, with the exact exit codes spec.md §6 names.
// Dependencies: clap, quality-gate-core, platform-core, serde_json
// ============================================================================

//! ## Overview
//! `scan` never fails by itself: a broken detector degrades to a finding
//! (see [`detectors`]), and the only way to exit `2` is an unreadable or
//! malformed `--baseline` file. `persist` reads a serialized [`Scan`] and
//! appends it to the configured report store.

// ============================================================================
// SECTION: Modules
// ============================================================================

mod baseline;
mod detectors;
mod process_runner;
mod report_store;

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Read as _;
use std::io::Write as _;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use clap::Subcommand;
use platform_core::Clock;
use platform_core::Severity;
use platform_core::SystemClock;
use quality_gate_core::Detector;
use quality_gate_core::ReportStore;
use quality_gate_core::Scan;
use quality_gate_core::ScanUseCase;
use quality_gate_core::VerdictOutcome;
use quality_gate_core::VerdictUseCase;

use crate::baseline::load_baseline;
use crate::detectors::FormatDetector;
use crate::detectors::LintDetector;
use crate::detectors::SecretsDetector;
use crate::report_store::JsonLinesReportStore;

/// Default JSON-lines file `persist` writes to when no document store is
/// configured.
const DEFAULT_REPORT_STORE_PATH: &str = "quality-gate-reports.jsonl";

/// Exit code for a passing verdict.
const EXIT_PASS: u8 = 0;
/// Exit code for a failing verdict.
const EXIT_FAIL: u8 = 1;
/// Exit code for a configuration error (for example an unreadable baseline).
const EXIT_CONFIG_ERROR: u8 = 2;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Quality and security gate CLI.
#[derive(Parser, Debug)]
#[command(name = "quality-gate")]
struct Cli {
    /// Selected subcommand.
    #[command(subcommand)]
    command: Commands,
}

/// Supported subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Runs a scan and emits a JSON report.
    Scan(ScanArgs),
    /// Persists a JSON scan report to the configured report store.
    Persist(PersistArgs),
}

/// Arguments for `scan`.
#[derive(clap::Args, Debug)]
struct ScanArgs {
    /// Repository path to scan.
    #[arg(long, default_value = ".")]
    repo: String,
    /// Commit or ref being scanned.
    #[arg(long, default_value = "HEAD")]
    commit: String,
    /// Output file, or `-` for stdout.
    #[arg(long, default_value = "-")]
    output: String,
    /// Fail if any considered finding is at or above this severity.
    #[arg(long = "fail-on", default_value = "HIGH")]
    fail_on: Severity,
    /// Path to a baseline JSON file containing accepted fingerprints.
    #[arg(long)]
    baseline: Option<PathBuf>,
    /// Detector(s) to run; repeatable. Defaults to every built-in detector.
    #[arg(long = "detector")]
    detector: Vec<String>,
}

/// Arguments for `persist`.
#[derive(clap::Args, Debug)]
struct PersistArgs {
    /// Input JSON scan report file, or `-` for stdin.
    #[arg(long, default_value = "-")]
    input: String,
    /// Document-store URI; validated as a URL but not connected to (see
    /// `DESIGN.md`'s Open Question note). Falls back to a local file store.
    #[arg(long = "mongo-uri")]
    mongo_uri: Option<String>,
}

// ============================================================================
// SECTION: Entry Point
// ============================================================================

fn write_stderr_line(message: &str) {
    let mut stderr = std::io::stderr();
    let _ = writeln!(stderr, "{message}");
}

fn write_stdout_line(message: &str) {
    let mut stdout = std::io::stdout();
    let _ = writeln!(stdout, "{message}");
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match cli.command {
        Commands::Scan(args) => run_scan(&args),
        Commands::Persist(args) => run_persist(&args),
    }
}

/// Selects the built-in detectors named in `requested`, or every built-in
/// detector when `requested` is empty.
fn select_detectors(requested: &[String]) -> Vec<Arc<dyn Detector>> {
    let all: Vec<Arc<dyn Detector>> = vec![Arc::new(LintDetector), Arc::new(FormatDetector), Arc::new(SecretsDetector)];
    if requested.is_empty() {
        return all;
    }
    all.into_iter().filter(|detector| requested.iter().any(|name| name == detector.name())).collect()
}

fn write_report(scan: &Scan, output: &str) -> std::io::Result<()> {
    let text = serde_json::to_string_pretty(scan).unwrap_or_else(|_| "{}".to_string());
    if output == "-" {
        write_stdout_line(&text);
        Ok(())
    } else {
        std::fs::write(output, text)
    }
}

fn run_scan(args: &ScanArgs) -> ExitCode {
    let detectors = select_detectors(&args.detector);
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let scan_use_case = ScanUseCase::new(detectors, clock);
    let scan = scan_use_case.scan(&args.repo, &args.commit, &args.repo);

    if let Err(err) = write_report(&scan, &args.output) {
        write_stderr_line(&format!("unable to write report: {err}"));
        return ExitCode::from(EXIT_CONFIG_ERROR);
    }

    let baseline = match &args.baseline {
        Some(path) => match load_baseline(path) {
            Ok(baseline) => Some(baseline),
            Err(err) => {
                write_stderr_line(&format!("{err}"));
                return ExitCode::from(EXIT_CONFIG_ERROR);
            }
        },
        None => None,
    };

    let verdict = VerdictUseCase::new().evaluate(&scan.findings, baseline.as_ref(), args.fail_on);
    match verdict.outcome {
        VerdictOutcome::Pass => ExitCode::from(EXIT_PASS),
        VerdictOutcome::Fail => ExitCode::from(EXIT_FAIL),
    }
}

fn run_persist(args: &PersistArgs) -> ExitCode {
    let text = if args.input == "-" {
        let mut buffer = String::new();
        if let Err(err) = std::io::stdin().read_to_string(&mut buffer) {
            write_stderr_line(&format!("unable to read stdin: {err}"));
            return ExitCode::from(EXIT_CONFIG_ERROR);
        }
        buffer
    } else {
        match std::fs::read_to_string(&args.input) {
            Ok(text) => text,
            Err(err) => {
                write_stderr_line(&format!("unable to read {}: {err}", args.input));
                return ExitCode::from(EXIT_CONFIG_ERROR);
            }
        }
    };

    let scan: Scan = match serde_json::from_str(&text) {
        Ok(scan) => scan,
        Err(err) => {
            write_stderr_line(&format!("unable to parse scan report: {err}"));
            return ExitCode::from(EXIT_CONFIG_ERROR);
        }
    };

    if let Some(uri) = &args.mongo_uri {
        if url::Url::parse(uri).is_err() {
            write_stderr_line(&format!("invalid --mongo-uri: {uri}"));
            return ExitCode::from(EXIT_CONFIG_ERROR);
        }
        write_stderr_line("mongo-uri given but no document-store adapter is shipped; falling back to the local file report store");
    }

    let store = JsonLinesReportStore::new(PathBuf::from(DEFAULT_REPORT_STORE_PATH));
    match store.persist(&scan) {
        Ok(id) => {
            write_stdout_line(&id);
            ExitCode::from(EXIT_PASS)
        }
        Err(err) => {
            write_stderr_line(&format!("unable to persist scan: {err}"));
            ExitCode::from(EXIT_CONFIG_ERROR)
        }
    }
}
