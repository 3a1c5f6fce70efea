//! Logging macros for ergonomic log message formatting.
//!
//! These macros format like `format!`, skip the formatting entirely when no
//! sink wants the level, and record the call site as the event's caller.
//!
//! # Examples
//!
//! ```
//! use rust_tee_logger::prelude::*;
//! use rust_tee_logger::info;
//!
//! let logger = Logger::discard();
//!
//! info!(logger, "Server started");
//!
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//! ```

/// Log a message at an explicit level.
///
/// # Examples
///
/// ```
/// # use rust_tee_logger::prelude::*;
/// # let logger = Logger::discard();
/// use rust_tee_logger::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Panic, "Invariant broken: {}", "queue drained twice");
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {{
        let logger = &$logger;
        let level = $level;
        if logger.enabled(level) {
            logger.emit(
                $crate::core::LogEvent::new(level, format!($($arg)+))
                    .with_caller(concat!(file!(), ":", line!())),
            );
        }
    }};
}

/// Log a debug-level message.
///
/// ```
/// # use rust_tee_logger::prelude::*;
/// # let logger = Logger::discard();
/// use rust_tee_logger::debug;
/// debug!(logger, "Counter value: {}", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
///
/// ```
/// # use rust_tee_logger::prelude::*;
/// # let logger = Logger::discard();
/// use rust_tee_logger::info;
/// info!(logger, "Processing {} items", 100);
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
///
/// ```
/// # use rust_tee_logger::prelude::*;
/// # let logger = Logger::discard();
/// use rust_tee_logger::warn;
/// warn!(logger, "Retry attempt {} of {}", 3, 5);
/// ```
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warn, $($arg)+)
    };
}

/// Log an error-level message.
///
/// ```
/// # use rust_tee_logger::prelude::*;
/// # let logger = Logger::discard();
/// use rust_tee_logger::error;
/// error!(logger, "Error code: {}, message: {}", 500, "Internal error");
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a fatal-level message. The process keeps running.
///
/// ```
/// # use rust_tee_logger::prelude::*;
/// # let logger = Logger::discard();
/// use rust_tee_logger::fatal;
/// fatal!(logger, "Unable to recover from error: {}", "disk full");
/// ```
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Fatal, $($arg)+)
    };
}
