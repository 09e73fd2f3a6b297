use std::env;

use tracing::Level;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, prelude::*};

/// Installs the global tracing subscriber.
///
/// Logs go to stderr so they never interleave with the report on stdout.
pub fn initialize_tracing() {
    let (level, env_filter) = parse_rust_log();
    let format = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true);

    tracing_subscriber::registry()
        .with(format.with_filter(LevelFilter::from(level)))
        .with(env_filter)
        .init();
}

/// Resolves the log level and filter from `RUST_LOG`.
pub fn parse_rust_log() -> (Level, EnvFilter) {
    filter_from(env::var(EnvFilter::DEFAULT_ENV).ok())
}

fn filter_from(rust_log: Option<String>) -> (Level, EnvFilter) {
    // Try to parse RUST_LOG as a simple level filter and apply default levels internally.
    // Otherwise, use it literally if the user knows which overrides they want to run.
    let level = match rust_log {
        Some(value) => match value.parse::<Level>() {
            Ok(level) => level,
            Err(_) => return (Level::TRACE, EnvFilter::new(value)),
        },
        None => Level::WARN,
    };

    // This is the maximum verbosity that will be logged, we filter this down to `level`.
    let env_filter = EnvFilter::new(
        "INFO,\
        reqwest=WARN,\
        hyper_util=WARN,\
        s3bench=TRACE,\
        ",
    );

    (level, env_filter)
}
