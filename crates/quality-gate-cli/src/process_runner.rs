// crates/quality-gate-cli/src/process_runner.rs
// ============================================================================
// Module: QualityGate Process Runner
// Description: Spawns a detector subprocess under a wall-clock deadline.
// Purpose: Give every subprocess-backed detector the same ~60s timeout
// bound and not-found/failure classification.
// Dependencies: std::process
// ============================================================================

//! ## Overview
//! `std::process::Command` has no built-in timeout, so this module polls
//! `try_wait` against a deadline and kills the child if it is exceeded.
//! Stdout/stderr are drained on background threads while the child runs so
//! a chatty detector cannot deadlock by filling its pipe buffer before the
//! poll loop notices it has exited.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Read;
use std::process::Command;
use std::process::Output;
use std::process::Stdio;
use std::time::Duration;
use std::time::Instant;

/// Upper bound on a single detector subprocess's wall-clock runtime.
pub const DETECTOR_TIMEOUT: Duration = Duration::from_secs(60);

/// How `run_with_timeout` failed to produce output.
#[derive(Debug)]
pub enum DetectorRunError {
    /// The subprocess exceeded its deadline and was killed.
    TimedOut,
    /// The configured binary is not present on `PATH`.
    NotFound,
    /// Spawning or waiting on the subprocess failed for another reason.
    Failed(String),
}

/// Runs `command` to completion or until `timeout` elapses, whichever
/// comes first.
pub fn run_with_timeout(mut command: Command, timeout: Duration) -> Result<Output, DetectorRunError> {
    command.stdout(Stdio::piped()).stderr(Stdio::piped());

    let mut child = match command.spawn() {
        Ok(child) => child,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Err(DetectorRunError::NotFound),
        Err(err) => return Err(DetectorRunError::Failed(err.to_string())),
    };

    let stdout_handle = child.stdout.take();
    let stderr_handle = child.stderr.take();

    let stdout_reader = std::thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut handle) = stdout_handle {
            let _ = handle.read_to_end(&mut buf);
        }
        buf
    });
    let stderr_reader = std::thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut handle) = stderr_handle {
            let _ = handle.read_to_end(&mut buf);
        }
        buf
    });

    let deadline = Instant::now() + timeout;
    let status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) => {
                if Instant::now() >= deadline {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(DetectorRunError::TimedOut);
                }
                std::thread::sleep(Duration::from_millis(25));
            }
            Err(err) => return Err(DetectorRunError::Failed(err.to_string())),
        }
    };

    let stdout = stdout_reader.join().unwrap_or_default();
    let stderr = stderr_reader.join().unwrap_or_default();
    Ok(Output { status, stdout, stderr })
}

#[cfg(test)]
mod tests {
    use std::process::Command;

    use super::DETECTOR_TIMEOUT;
    use super::DetectorRunError;
    use super::run_with_timeout;

    #[test]
    fn missing_binary_is_classified_as_not_found() {
        let command = Command::new("quality-gate-cli-nonexistent-binary");
        let result = run_with_timeout(command, DETECTOR_TIMEOUT);
        assert!(matches!(result, Err(DetectorRunError::NotFound)));
    }

    #[test]
    fn captures_stdout_of_a_successful_process() {
        let mut command = Command::new("echo");
        command.arg("hello");
        let output = run_with_timeout(command, DETECTOR_TIMEOUT).expect("echo should run");
        assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "hello");
    }
}
