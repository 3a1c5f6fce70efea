//! File logging example
//!
//! Double-writes every line: text on stdout, plus an identical copy in a
//! plain append-mode file.
//!
//! Run with: cargo run --example file_logging

use rust_tee_logger::prelude::*;
use std::sync::Arc;

fn main() -> Result<()> {
    println!("=== Rust Tee Logger - File Logging Example ===\n");

    let copy = Arc::new(SyncWriter::file("application.log")?);

    let router = Router::builder()
        .sink(Sink::new(
            "console",
            DecoratingEncoder::new(TextRenderer::new().with_custom_timestamp("%H:%M:%S%.3f"))
                .with_prefix("[demo] ")
                .with_duplicate(DuplicateTo::all(copy)),
            SyncWriter::stdout(),
        ))
        .build();
    let logger = Logger::new(Arc::new(router));

    println!("1. Logging to both console and file:");
    logger.info("Application started");
    logger.debug("Loading configuration...");
    logger.warn("Using default settings for some options");
    logger.error("Failed to load optional plugin");

    println!("\n2. Performing some operations:");
    for i in 1..=5 {
        logger.info(format!("Processing item {}/5", i));
    }

    logger.flush()?;

    println!("\n=== Example completed successfully! ===");
    println!("Check 'application.log' for the same lines");

    Ok(())
}
