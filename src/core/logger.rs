//! Logging front-end
//!
//! Builds [`LogEvent`]s and hands them to a shared [`Router`]. Cloning a
//! `Logger` is cheap; every clone and every child created with
//! [`Logger::with`] feeds the same router.

use super::{
    log_context::{FieldValue, LogContext},
    log_event::LogEvent,
    log_level::LogLevel,
    router::Router,
};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct Logger {
    router: Arc<Router>,
    fields: LogContext,
}

impl Logger {
    pub fn new(router: Arc<Router>) -> Self {
        Self {
            router,
            fields: LogContext::new(),
        }
    }

    /// Logger with no sinks; every call is a cheap no-op
    pub fn discard() -> Self {
        Self::new(Arc::new(Router::new()))
    }

    pub fn router(&self) -> &Arc<Router> {
        &self.router
    }

    /// Persistent fields attached to every event from this logger
    pub fn fields(&self) -> &LogContext {
        &self.fields
    }

    /// Child logger carrying one more persistent field
    ///
    /// # Example
    ///
    /// ```
    /// use rust_tee_logger::core::Logger;
    ///
    /// let logger = Logger::discard();
    /// let request_logger = logger.with("request_id", "abc-123").with("attempt", 2);
    /// assert_eq!(request_logger.fields().len(), 2);
    /// assert!(logger.fields().is_empty());
    /// ```
    #[must_use]
    pub fn with<K, V>(&self, key: K, value: V) -> Logger
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        Logger {
            router: Arc::clone(&self.router),
            fields: self.fields.clone().with_field(key, value),
        }
    }

    #[inline]
    pub fn enabled(&self, level: LogLevel) -> bool {
        self.router.enabled(level)
    }

    /// Route a prepared event, merging in persistent fields
    ///
    /// Fields already on the event win over persistent ones with the same key.
    pub fn emit(&self, mut event: LogEvent) {
        if !self.fields.is_empty() {
            event.fields = event.fields.merged_over(&self.fields);
        }
        self.router.emit(&event);
    }

    pub fn log(&self, level: LogLevel, message: impl Into<String>) {
        if !self.enabled(level) {
            return;
        }
        self.emit(LogEvent::new(level, message));
    }

    pub fn log_with(&self, level: LogLevel, message: impl Into<String>, fields: LogContext) {
        if !self.enabled(level) {
            return;
        }
        self.emit(LogEvent::new(level, message).with_fields(fields));
    }

    pub fn debug(&self, message: impl Into<String>) {
        self.log(LogLevel::Debug, message);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.log(LogLevel::Info, message);
    }

    pub fn warn(&self, message: impl Into<String>) {
        self.log(LogLevel::Warn, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.log(LogLevel::Error, message);
    }

    /// Logs at Panic level. Only records the event; does not unwind.
    pub fn panic(&self, message: impl Into<String>) {
        self.log(LogLevel::Panic, message);
    }

    /// Logs at Fatal level. Only records the event; does not exit.
    pub fn fatal(&self, message: impl Into<String>) {
        self.log(LogLevel::Fatal, message);
    }

    pub fn debug_with(&self, message: impl Into<String>, fields: LogContext) {
        self.log_with(LogLevel::Debug, message, fields);
    }

    pub fn info_with(&self, message: impl Into<String>, fields: LogContext) {
        self.log_with(LogLevel::Info, message, fields);
    }

    pub fn warn_with(&self, message: impl Into<String>, fields: LogContext) {
        self.log_with(LogLevel::Warn, message, fields);
    }

    pub fn error_with(&self, message: impl Into<String>, fields: LogContext) {
        self.log_with(LogLevel::Error, message, fields);
    }

    pub fn panic_with(&self, message: impl Into<String>, fields: LogContext) {
        self.log_with(LogLevel::Panic, message, fields);
    }

    pub fn fatal_with(&self, message: impl Into<String>, fields: LogContext) {
        self.log_with(LogLevel::Fatal, message, fields);
    }

    /// Flush the router's sinks
    pub fn flush(&self) -> super::error::Result<()> {
        self.router.flush()
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::discard()
    }
}
