//! # Rust Tee Logger
//!
//! A structured log pipeline that fans each event out to independently
//! configured sinks.
//!
//! ## Features
//!
//! - **Tee routing**: every sink has its own renderer, writer and level threshold
//! - **Decorating encoders**: prefixes, level colors and line rewrites on top of
//!   any inner layout, plus duplicate writes to side channels
//! - **Daily partitioned files**: `root/YYYY-MM-DD/out.log` and `err.log`,
//!   rotated lazily on the first write after midnight
//! - **Failure isolation**: one broken sink never silences the others
//!
//! ## Example
//!
//! ```no_run
//! use rust_tee_logger::prelude::*;
//! use std::sync::Arc;
//!
//! let resolver = Arc::new(RotatingFileResolver::new("logs"));
//! let router = Router::builder()
//!     .sink(Sink::new(
//!         "console",
//!         DecoratingEncoder::new(TextRenderer::new())
//!             .with_level_colors()
//!             .with_daily_files(resolver),
//!         SyncWriter::stdout(),
//!     ))
//!     .build();
//!
//! let logger = Logger::new(Arc::new(router)).with("service", "checkout");
//! rust_tee_logger::info!(logger, "listening on {}", 8080);
//! ```

pub mod config;
pub mod core;
pub mod encoders;
pub mod global;
pub mod macros;
pub mod renderers;
pub mod writers;

pub mod prelude {
    pub use crate::config::{PipelineConfig, SinkConfig, SinkTarget};
    pub use crate::core::{
        ErrorCallback, FieldValue, LogContext, LogEvent, LogLevel, LogWriter, Logger, LoggerError,
        Renderer, Result, Router, RouterBuilder, RouterMetrics, Sink, TimestampFormat,
    };
    pub use crate::encoders::{DecoratingEncoder, DuplicateTo, LineTransform};
    pub use crate::renderers::{JsonRenderer, LogfmtRenderer, OutputFormat, TextRenderer};
    pub use crate::writers::{
        Classification, DailyFileSink, DayBoundary, PartitionLayout, RotatingFileResolver,
        SyncWriter,
    };
}

pub use crate::core::{
    FieldValue, LogContext, LogEvent, LogLevel, LogWriter, Logger, LoggerError, Renderer, Result,
    Router, RouterMetrics, Sink, TimestampFormat,
};
pub use config::PipelineConfig;
pub use encoders::DecoratingEncoder;
pub use writers::{RotatingFileResolver, SyncWriter};
