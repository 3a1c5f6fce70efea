//! Daily split example
//!
//! Writes `logs/YYYY-MM-DD/out.log` for every event and `err.log` for errors,
//! while still printing to the console. A second sink uses the flat layout
//! with a custom classification: `logs/flat/audit-YYYY-MM-DD.log`.
//!
//! Run with: cargo run --example daily_split

use rust_tee_logger::prelude::*;
use std::sync::Arc;

fn main() -> Result<()> {
    println!("=== Rust Tee Logger - Daily Split Example ===\n");

    let resolver = Arc::new(RotatingFileResolver::new("logs"));
    let flat = Arc::new(
        RotatingFileResolver::new("logs/flat")
            .with_layout(PartitionLayout::Flat)
            .with_day_boundary(DayBoundary::Utc),
    );

    let router = Router::builder()
        .sink(Sink::new(
            "console",
            DecoratingEncoder::new(TextRenderer::new()).with_daily_files(Arc::clone(&resolver)),
            SyncWriter::stdout(),
        ))
        .sink(
            Sink::new(
                "audit",
                JsonRenderer::new(),
                DailyFileSink::new(Arc::clone(&flat), Classification::Named("audit".into())),
            )
            .with_threshold(LogLevel::Warn),
        )
        .build();
    let logger = Logger::new(Arc::new(router)).with("service", "billing");

    logger.info("Invoice batch started");
    logger.warn("Customer record missing tax id");
    logger.error_with(
        "Payment gateway timeout",
        LogContext::new().with_field("gateway", "acme").with_field("retry", true),
    );
    logger.info("Invoice batch finished");

    logger.flush()?;

    for classification in [Classification::All, Classification::ErrorOnly] {
        if let Some(path) = resolver.current_path(&classification) {
            println!("{} -> {}", classification, path.display());
        }
    }
    if let Some(path) = flat.current_path(&Classification::Named("audit".into())) {
        println!("audit -> {}", path.display());
    }

    println!("\n=== Example completed successfully! ===");
    Ok(())
}
