// crates/knowledge-store-http/src/main.rs
// ============================================================================
// Module: KnowledgeStore Binary
// Description: Process entry point: load config, wire state, serve HTTP.
// Purpose: Explicit constructor wiring at process start, in place of
// decorator-based DI.
// Dependencies: knowledge_store_http, tokio
// ============================================================================

use std::io::Write as _;
use std::process::ExitCode;
use std::sync::Arc;

use knowledge_store_http::AppState;
use knowledge_store_http::Config;
use knowledge_store_http::build_router;

fn write_stderr_line(message: &str) {
    let mut stderr = std::io::stderr();
    let _ = writeln!(stderr, "{message}");
}

fn main() -> ExitCode {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            write_stderr_line(&format!("knowledge-store: configuration error: {err}"));
            return ExitCode::FAILURE;
        }
    };

    let runtime = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(err) => {
            write_stderr_line(&format!("knowledge-store: failed to start async runtime: {err}"));
            return ExitCode::FAILURE;
        }
    };

    runtime.block_on(async move {
        let bind = config.bind;
        let state = Arc::new(AppState::new(&config));
        let app = build_router(state);

        let listener = match tokio::net::TcpListener::bind(bind).await {
            Ok(listener) => listener,
            Err(err) => {
                write_stderr_line(&format!("knowledge-store: failed to bind {bind}: {err}"));
                return ExitCode::FAILURE;
            }
        };

        match axum::serve(listener, app).await {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                write_stderr_line(&format!("knowledge-store: server error: {err}"));
                ExitCode::FAILURE
            }
        }
    })
}
