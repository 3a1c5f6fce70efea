//! Writer trait for log output destinations

use super::error::Result;
use std::sync::Arc;

/// A byte sink that accepts fully rendered log lines
///
/// Implementations take `&self` and must be safe to call from many threads
/// at once; each `write` lands as one contiguous unit.
pub trait LogWriter: Send + Sync {
    /// Append `bytes`, returning how many were written
    fn write(&self, bytes: &[u8]) -> Result<usize>;
    fn flush(&self) -> Result<()>;
    fn name(&self) -> &str;
}

impl<W: LogWriter + ?Sized> LogWriter for Arc<W> {
    fn write(&self, bytes: &[u8]) -> Result<usize> {
        (**self).write(bytes)
    }

    fn flush(&self) -> Result<()> {
        (**self).flush()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<W: LogWriter + ?Sized> LogWriter for Box<W> {
    fn write(&self, bytes: &[u8]) -> Result<usize> {
        (**self).write(bytes)
    }

    fn flush(&self) -> Result<()> {
        (**self).flush()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
