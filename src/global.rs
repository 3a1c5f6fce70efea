//! Process-wide logger handle
//!
//! Set once at startup with [`init`]; afterwards [`logger`] returns the same
//! instance everywhere. There is no way to replace it. If [`logger`] is
//! called before [`init`], a discarding logger is installed and later `init`
//! calls fail with [`LoggerError::AlreadyInitialized`].

use crate::core::{Logger, LoggerError, Result};
use std::sync::OnceLock;

static GLOBAL: OnceLock<Logger> = OnceLock::new();

/// Install the process-wide logger
///
/// # Example
///
/// ```
/// use rust_tee_logger::config::PipelineConfig;
/// use rust_tee_logger::global;
///
/// let logger = PipelineConfig::development().build_logger()?;
/// global::init(logger)?;
/// rust_tee_logger::info!(global::logger(), "ready");
/// # Ok::<(), rust_tee_logger::LoggerError>(())
/// ```
pub fn init(logger: Logger) -> Result<()> {
    GLOBAL
        .set(logger)
        .map_err(|_| LoggerError::AlreadyInitialized)
}

/// The installed logger, or a discarding one if none was installed
pub fn logger() -> &'static Logger {
    GLOBAL.get_or_init(Logger::discard)
}

pub fn is_initialized() -> bool {
    GLOBAL.get().is_some()
}
