//! Writer that appends to a day-partitioned file

use super::rotating::{Classification, RotatingFileResolver};
use crate::core::{LogWriter, Result};
use std::sync::Arc;

/// A [`LogWriter`] bound to one classification of a resolver
///
/// Each write resolves the current day's handle first, so the sink follows
/// midnight rollover without any timer.
///
/// # Examples
///
/// ```no_run
/// use rust_tee_logger::writers::{
///     Classification, DailyFileSink, LogWriter, PartitionLayout, RotatingFileResolver,
/// };
/// use std::sync::Arc;
///
/// let resolver = Arc::new(RotatingFileResolver::new("logs").with_layout(PartitionLayout::Flat));
/// let sink = DailyFileSink::new(resolver, Classification::Named("app".into()));
/// sink.write(b"written to logs/app-YYYY-MM-DD.log\n")?;
/// # Ok::<(), rust_tee_logger::LoggerError>(())
/// ```
#[derive(Debug, Clone)]
pub struct DailyFileSink {
    name: String,
    resolver: Arc<RotatingFileResolver>,
    classification: Classification,
}

impl DailyFileSink {
    pub fn new(resolver: Arc<RotatingFileResolver>, classification: Classification) -> Self {
        let name = format!("daily:{}", classification);
        Self {
            name,
            resolver,
            classification,
        }
    }

    /// Sink for every event (`out`)
    pub fn all(resolver: Arc<RotatingFileResolver>) -> Self {
        Self::new(resolver, Classification::All)
    }

    /// Sink for error-and-above events (`err`)
    pub fn errors(resolver: Arc<RotatingFileResolver>) -> Self {
        Self::new(resolver, Classification::ErrorOnly)
    }

    pub fn classification(&self) -> &Classification {
        &self.classification
    }

    pub fn resolver(&self) -> &Arc<RotatingFileResolver> {
        &self.resolver
    }
}

impl LogWriter for DailyFileSink {
    fn write(&self, bytes: &[u8]) -> Result<usize> {
        self.resolver.resolve(&self.classification)?.write(bytes)
    }

    fn flush(&self) -> Result<()> {
        self.resolver.flush_partition(&self.classification)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
