use std::fs::create_dir_all;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Installs the global `tracing` subscriber.
///
/// Events always go to a daily rolling file under `log_dir`. When `to_stdout` is set they are
/// mirrored to stdout with ANSI colours. `filter` is an `EnvFilter` directive string, the
/// caller resolves it (config already folds in `LOG_LEVEL` and CLI overrides).
///
/// Keep the returned guard alive for the lifetime of the process, dropping it flushes and
/// stops the background writer.
pub fn init_logging(
    log_dir: &str,
    log_file: &str,
    filter: &str,
    to_stdout: bool,
) -> WorkerGuard {
    if !Path::new(log_dir).exists() {
        create_dir_all(log_dir).ok();
    }

    let file_appender = rolling::daily(log_dir, log_file);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true);

    let env_filter = build_filter(filter);

    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer);

    if to_stdout {
        let stdout_layer = fmt::layer()
            .with_writer(std::io::stdout)
            .with_ansi(true)
            .with_target(true);
        registry.with(stdout_layer).init();
    } else {
        registry.init();
    }

    guard
}

/// Parses `filter` as `EnvFilter` directives, falling back to `info` when it does not parse.
fn build_filter(filter: &str) -> EnvFilter {
    EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"))
}
