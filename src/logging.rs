//! Logging utilities for aeolus.
//!
//! This module provides structured logging functionality to make logs more
//! searchable, analyzable, and useful for production deployments.

use std::time::Instant;
use tracing::{debug, info};
use uuid::Uuid;

/// Initialize the tracing subscriber with the given log level
pub fn init_tracing(log_level: &str) {
    let filter = match std::env::var("RUST_LOG") {
        Ok(val) => val,
        Err(_) => log_level.to_string(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .init();
}

/// Log an operation with timing and result in a single statement
pub fn log_timed_operation<F, R>(operation: &str, f: F) -> R
where
    F: FnOnce() -> R,
{
    let start = Instant::now();
    let request_id = Uuid::new_v4();

    debug!(
        operation = operation,
        request_id = %request_id,
        "Starting operation"
    );

    let result = f();

    let duration = start.elapsed();

    info!(
        operation = operation,
        request_id = %request_id,
        duration_ms = duration.as_secs_f64() * 1000.0,
        "Operation completed"
    );

    result
}

/// Log detailed information about a loaded layer pack
pub fn log_pack_load_stats(
    file_path: &str,
    layer_count: usize,
    layer_names: &[&str],
    width: usize,
    height: usize,
    memory_usage: usize,
) {
    info!(
        operation = "pack_load",
        file_path = file_path,
        layer_count = layer_count,
        layers = %layer_names.join(", "),
        width = width,
        height = height,
        memory_kb = memory_usage / 1024,
        "Layer pack loaded successfully"
    );
}
