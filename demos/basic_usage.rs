//! Basic usage example
//!
//! Builds a two-sink pipeline: colored text on stdout for everything, and
//! JSON on stderr for warnings and above.
//!
//! Run with: cargo run --example basic_usage

use rust_tee_logger::prelude::*;
use rust_tee_logger::{info, log, warn};
use std::sync::Arc;

fn main() {
    println!("=== Rust Tee Logger - Basic Usage Example ===\n");

    let router = Router::builder()
        .sink(
            Sink::new(
                "console",
                DecoratingEncoder::new(TextRenderer::new()).with_level_colors(),
                SyncWriter::stdout(),
            )
            .with_threshold(LogLevel::Debug),
        )
        .sink(
            Sink::new("alerts", JsonRenderer::new(), SyncWriter::stderr())
                .with_threshold(LogLevel::Warn),
        )
        .build();
    let logger = Logger::new(Arc::new(router));

    println!("1. Plain level methods:");
    logger.debug("Debug message - only on stdout");
    logger.info("Info message - only on stdout");
    logger.warn("Warning message - stdout and stderr");
    logger.error("Error message - stdout and stderr");

    println!("\n2. Structured fields:");
    logger.info_with(
        "User logged in",
        LogContext::new()
            .with_field("user_id", 42)
            .with_field("admin", false),
    );

    println!("\n3. Persistent fields:");
    let request_logger = logger.with("request_id", "a1b2c3");
    request_logger.info("Handling request");
    request_logger.warn_with("Slow query", LogContext::new().with_field("ms", 812));

    println!("\n4. Macros with caller location:");
    let port = 8080;
    info!(logger, "Server listening on port {}", port);
    warn!(logger, "Retry attempt {} of {}", 2, 5);
    log!(logger, LogLevel::Panic, "Invariant broken in {}", "scheduler");

    let metrics = logger.router().metrics();
    println!(
        "\nDelivered: {}, filtered: {}, failed: {}",
        metrics.delivered(),
        metrics.filtered(),
        metrics.failures()
    );
    println!("\n=== Example completed successfully! ===");
}
