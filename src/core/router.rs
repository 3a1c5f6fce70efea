//! Fan-out router ("tee")
//!
//! Delivers each event to every registered sink whose threshold admits it.
//! Sinks are independent: a render error, write error or panic in one sink
//! is reported and counted, and delivery carries on with the next one.

use super::{
    error::{LoggerError, Result},
    log_event::LogEvent,
    log_level::LogLevel,
    metrics::RouterMetrics,
    renderer::Renderer,
    writer::LogWriter,
};
use parking_lot::RwLock;
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

/// Callback invoked for every failed sink delivery, with the sink name
pub type ErrorCallback = Arc<dyn Fn(&str, &LoggerError) + Send + Sync>;

/// One (encoder, writer, threshold) registration
pub struct Sink {
    name: String,
    encoder: Box<dyn Renderer>,
    writer: Box<dyn LogWriter>,
    threshold: LogLevel,
}

impl Sink {
    /// Sink admitting every level
    pub fn new(
        name: impl Into<String>,
        encoder: impl Renderer + 'static,
        writer: impl LogWriter + 'static,
    ) -> Self {
        Self::from_boxed(name, Box::new(encoder), Box::new(writer))
    }

    pub fn from_boxed(
        name: impl Into<String>,
        encoder: Box<dyn Renderer>,
        writer: Box<dyn LogWriter>,
    ) -> Self {
        Self {
            name: name.into(),
            encoder,
            writer,
            threshold: LogLevel::Debug,
        }
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_threshold(mut self, threshold: LogLevel) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn threshold(&self) -> LogLevel {
        self.threshold
    }

    #[inline]
    pub fn admits(&self, level: LogLevel) -> bool {
        level >= self.threshold
    }

    fn deliver(&self, event: &LogEvent) -> Result<()> {
        let line = self.encoder.render(event)?;
        self.writer.write(line.as_bytes())?;
        Ok(())
    }
}

impl fmt::Debug for Sink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sink")
            .field("name", &self.name)
            .field("encoder", &self.encoder.name())
            .field("writer", &self.writer.name())
            .field("threshold", &self.threshold)
            .finish()
    }
}

/// Ordered list of sinks sharing one emit path
///
/// The sink list is copy-on-write: `emit` clones an `Arc` under a brief read
/// lock and delivers without holding any router lock, so a slow sink never
/// blocks `add_sink` and sinks may log through the router themselves.
///
/// # Example
///
/// ```
/// use rust_tee_logger::core::{LogEvent, LogLevel, Router, Sink};
/// use rust_tee_logger::renderers::TextRenderer;
/// use rust_tee_logger::writers::SyncWriter;
///
/// let router = Router::builder()
///     .sink(Sink::new("console", TextRenderer::new(), SyncWriter::stdout()))
///     .sink(
///         Sink::new("errors", TextRenderer::new(), SyncWriter::stderr())
///             .with_threshold(LogLevel::Error),
///     )
///     .build();
///
/// router.emit(&LogEvent::new(LogLevel::Info, "only on stdout"));
/// assert_eq!(router.metrics().delivered(), 1);
/// assert_eq!(router.metrics().filtered(), 1);
/// ```
pub struct Router {
    sinks: RwLock<Arc<Vec<Arc<Sink>>>>,
    metrics: Arc<RouterMetrics>,
    on_error: Option<ErrorCallback>,
}

impl Router {
    #[must_use]
    pub fn new() -> Self {
        Self {
            sinks: RwLock::new(Arc::new(Vec::new())),
            metrics: Arc::new(RouterMetrics::new()),
            on_error: None,
        }
    }

    #[must_use]
    pub fn builder() -> RouterBuilder {
        RouterBuilder::new()
    }

    /// Register a sink after the router is shared
    ///
    /// Events already being delivered keep the previous sink list.
    pub fn add_sink(&self, sink: Sink) {
        let mut sinks = self.sinks.write();
        let mut next: Vec<Arc<Sink>> = sinks.as_ref().clone();
        next.push(Arc::new(sink));
        *sinks = Arc::new(next);
    }

    fn snapshot(&self) -> Arc<Vec<Arc<Sink>>> {
        Arc::clone(&self.sinks.read())
    }

    pub fn sink_count(&self) -> usize {
        self.sinks.read().len()
    }

    pub fn sink_names(&self) -> Vec<String> {
        self.snapshot().iter().map(|s| s.name.clone()).collect()
    }

    /// Whether any sink would accept an event at `level`
    ///
    /// Front-ends use this to skip building events nobody wants.
    pub fn enabled(&self, level: LogLevel) -> bool {
        self.snapshot().iter().any(|sink| sink.admits(level))
    }

    /// Deliver `event` to every admitting sink, in registration order
    ///
    /// Never fails: per-sink failures are reported to stderr, to the error
    /// callback if one is set, and to the metrics.
    pub fn emit(&self, event: &LogEvent) {
        let sinks = self.snapshot();

        for sink in sinks.iter() {
            if !sink.admits(event.level) {
                self.metrics.record_filtered();
                continue;
            }

            let outcome = catch_unwind(AssertUnwindSafe(|| sink.deliver(event)));

            match outcome {
                Ok(Ok(())) => {
                    self.metrics.record_delivered();
                }
                Ok(Err(e)) => {
                    if e.is_render_error() {
                        self.metrics.record_render_failure();
                    } else {
                        self.metrics.record_write_failure();
                    }
                    eprintln!("[LOGGER ERROR] Sink '{}' failed: {}", sink.name, e);
                    self.notify(&sink.name, &e);
                }
                Err(panic_info) => {
                    let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                        s.to_string()
                    } else if let Some(s) = panic_info.downcast_ref::<String>() {
                        s.clone()
                    } else {
                        "Unknown panic".to_string()
                    };
                    self.metrics.record_panic();
                    eprintln!(
                        "[LOGGER CRITICAL] Sink '{}' panicked: {}. \
                         Other sinks continue to function.",
                        sink.name, panic_msg
                    );
                    self.notify(&sink.name, &LoggerError::sink_panicked(&sink.name, panic_msg));
                }
            }
        }
    }

    fn notify(&self, sink: &str, error: &LoggerError) {
        if let Some(ref callback) = self.on_error {
            callback(sink, error);
        }
    }

    /// Flush every sink writer, returning the first failure
    pub fn flush(&self) -> Result<()> {
        let mut first_error = None;
        for sink in self.snapshot().iter() {
            if let Err(e) = sink.writer.flush() {
                eprintln!("[LOGGER ERROR] Sink '{}' flush failed: {}", sink.name, e);
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    pub fn metrics(&self) -> &RouterMetrics {
        &self.metrics
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("sinks", &self.snapshot())
            .field("metrics", &self.metrics)
            .finish()
    }
}

impl Drop for Router {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            eprintln!("[LOGGER ERROR] Failed to flush during shutdown: {}", e);
        }
    }
}

/// Builder for constructing a Router with a fluent API
///
/// # Example
///
/// ```
/// use rust_tee_logger::core::{Router, Sink};
/// use rust_tee_logger::renderers::JsonRenderer;
/// use rust_tee_logger::writers::SyncWriter;
/// use std::sync::Arc;
///
/// let router = Router::builder()
///     .sink(Sink::new("json", JsonRenderer::new(), SyncWriter::stdout()))
///     .on_error(Arc::new(|sink, err| {
///         eprintln!("ALERT: sink {} lost an event: {}", sink, err);
///     }))
///     .build();
/// assert_eq!(router.sink_count(), 1);
/// ```
#[derive(Default)]
pub struct RouterBuilder {
    sinks: Vec<Sink>,
    on_error: Option<ErrorCallback>,
}

impl RouterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use = "builder methods return a new value"]
    pub fn sink(mut self, sink: Sink) -> Self {
        self.sinks.push(sink);
        self
    }

    /// Set a callback for failed deliveries
    #[must_use = "builder methods return a new value"]
    pub fn on_error(mut self, callback: ErrorCallback) -> Self {
        self.on_error = Some(callback);
        self
    }

    pub fn build(self) -> Router {
        Router {
            sinks: RwLock::new(Arc::new(self.sinks.into_iter().map(Arc::new).collect())),
            metrics: Arc::new(RouterMetrics::new()),
            on_error: self.on_error,
        }
    }
}
