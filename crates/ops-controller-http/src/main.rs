// crates/ops-controller-http/src/main.rs
// ============================================================================
// Module: OpsController Binary
// Description: Process entry point: load config, wire state, serve HTTP.
// Purpose: Explicit constructor wiring at process start, in place of
// decorator-based DI.
// Dependencies: ops_controller_http, tokio
// ============================================================================

use std::io::Write as _;
use std::process::ExitCode;
use std::sync::Arc;

use ops_controller_http::AppState;
use ops_controller_http::Config;
use ops_controller_http::build_router;

fn write_stderr_line(message: &str) {
    let mut stderr = std::io::stderr();
    let _ = writeln!(stderr, "{message}");
}

fn main() -> ExitCode {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            write_stderr_line(&format!("ops-controller: configuration error: {err}"));
            return ExitCode::FAILURE;
        }
    };

    let state = match AppState::new(&config) {
        Ok(state) => Arc::new(state),
        Err(err) => {
            write_stderr_line(&format!("ops-controller: failed to build server state: {err}"));
            return ExitCode::FAILURE;
        }
    };

    let runtime = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(err) => {
            write_stderr_line(&format!("ops-controller: failed to start async runtime: {err}"));
            return ExitCode::FAILURE;
        }
    };

    runtime.block_on(async move {
        let bind = config.bind;
        let app = build_router(state);

        let listener = match tokio::net::TcpListener::bind(bind).await {
            Ok(listener) => listener,
            Err(err) => {
                write_stderr_line(&format!("ops-controller: failed to bind {bind}: {err}"));
                return ExitCode::FAILURE;
            }
        };

        match axum::serve(listener, app).await {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                write_stderr_line(&format!("ops-controller: server error: {err}"));
                ExitCode::FAILURE
            }
        }
    })
}
