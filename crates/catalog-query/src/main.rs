// crates/catalog-query/src/main.rs
// ============================================================================
// Module: CatalogQuery Binary
// Description: Process entry point: load config, wire state, serve HTTP.
// Purpose: Explicit constructor wiring at process start.
// Dependencies: catalog_query, tokio
// ============================================================================

use std::io::Write as _;
use std::process::ExitCode;
use std::sync::Arc;

use catalog_query::AppState;
use catalog_query::Config;
use catalog_query::build_router;

fn write_stderr_line(message: &str) {
    let mut stderr = std::io::stderr();
    let _ = writeln!(stderr, "{message}");
}

fn main() -> ExitCode {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            write_stderr_line(&format!("catalog-query: configuration error: {err}"));
            return ExitCode::FAILURE;
        }
    };

    let runtime = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(err) => {
            write_stderr_line(&format!("catalog-query: failed to start async runtime: {err}"));
            return ExitCode::FAILURE;
        }
    };

    runtime.block_on(async move {
        let bind = config.bind;
        let state = Arc::new(AppState::new());
        let app = build_router(state);

        let listener = match tokio::net::TcpListener::bind(bind).await {
            Ok(listener) => listener,
            Err(err) => {
                write_stderr_line(&format!("catalog-query: failed to bind {bind}: {err}"));
                return ExitCode::FAILURE;
            }
        };

        match axum::serve(listener, app).await {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                write_stderr_line(&format!("catalog-query: server error: {err}"));
                ExitCode::FAILURE
            }
        }
    })
}
