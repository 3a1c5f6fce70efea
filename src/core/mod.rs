//! Core pipeline types and traits

pub mod error;
pub mod log_context;
pub mod log_event;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod renderer;
pub mod router;
pub mod timestamp;
pub mod writer;

pub use error::{LoggerError, Result};
pub use log_context::{FieldValue, LogContext};
pub use log_event::LogEvent;
pub use log_level::LogLevel;
pub use logger::Logger;
pub use metrics::RouterMetrics;
pub use renderer::Renderer;
pub use router::{ErrorCallback, Router, RouterBuilder, Sink};
pub use timestamp::TimestampFormat;
pub use writer::LogWriter;
