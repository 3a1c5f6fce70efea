//! Router metrics for observability
//!
//! Counters for per-sink delivery outcomes. A single event fanned out to
//! three sinks counts three times.

use std::sync::atomic::{AtomicU64, Ordering};

/// Delivery counters for a [`Router`](crate::core::Router)
///
/// # Example
///
/// ```
/// use rust_tee_logger::RouterMetrics;
///
/// let metrics = RouterMetrics::new();
/// metrics.record_delivered();
/// metrics.record_write_failure();
///
/// assert_eq!(metrics.delivered(), 1);
/// assert_eq!(metrics.failures(), 1);
/// ```
#[derive(Debug)]
pub struct RouterMetrics {
    /// Sink deliveries that rendered and wrote successfully
    delivered: AtomicU64,

    /// Sink deliveries skipped because the event was below the sink threshold
    filtered: AtomicU64,

    /// Inner renderer failures
    render_failures: AtomicU64,

    /// Writer failures, including directory/open failures on file sinks
    write_failures: AtomicU64,

    /// Sinks that panicked while rendering or writing
    panics: AtomicU64,
}

impl RouterMetrics {
    pub const fn new() -> Self {
        Self {
            delivered: AtomicU64::new(0),
            filtered: AtomicU64::new(0),
            render_failures: AtomicU64::new(0),
            write_failures: AtomicU64::new(0),
            panics: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn delivered(&self) -> u64 {
        self.delivered.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn filtered(&self) -> u64 {
        self.filtered.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn render_failures(&self) -> u64 {
        self.render_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn write_failures(&self) -> u64 {
        self.write_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn panics(&self) -> u64 {
        self.panics.load(Ordering::Relaxed)
    }

    /// All failed deliveries, whatever the cause
    #[inline]
    pub fn failures(&self) -> u64 {
        self.render_failures() + self.write_failures() + self.panics()
    }

    #[inline]
    pub fn record_delivered(&self) -> u64 {
        self.delivered.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_filtered(&self) -> u64 {
        self.filtered.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_render_failure(&self) -> u64 {
        self.render_failures.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_write_failure(&self) -> u64 {
        self.write_failures.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_panic(&self) -> u64 {
        self.panics.fetch_add(1, Ordering::Relaxed)
    }

    /// Failed deliveries as a percentage (0.0 - 100.0) of attempted ones
    ///
    /// Filtered events are not attempts. Returns 0.0 if nothing was attempted.
    pub fn failure_rate(&self) -> f64 {
        let failed = self.failures() as f64;
        let total = self.delivered() as f64 + failed;
        if total == 0.0 {
            0.0
        } else {
            (failed / total) * 100.0
        }
    }

    pub fn reset(&self) {
        self.delivered.store(0, Ordering::Relaxed);
        self.filtered.store(0, Ordering::Relaxed);
        self.render_failures.store(0, Ordering::Relaxed);
        self.write_failures.store(0, Ordering::Relaxed);
        self.panics.store(0, Ordering::Relaxed);
    }
}

impl Default for RouterMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for RouterMetrics {
    /// Create a snapshot of the current metrics values
    fn clone(&self) -> Self {
        Self {
            delivered: AtomicU64::new(self.delivered()),
            filtered: AtomicU64::new(self.filtered()),
            render_failures: AtomicU64::new(self.render_failures()),
            write_failures: AtomicU64::new(self.write_failures()),
            panics: AtomicU64::new(self.panics()),
        }
    }
}
