//! Thread-safe append-only writer

use crate::core::{LogWriter, LoggerError, Result};
use parking_lot::Mutex;
use std::fs::{self, File, OpenOptions};
use std::io::{Stderr, Stdout, Write};
use std::path::Path;

/// Serializes writes to one underlying stream or file
///
/// Every `write` call holds the lock for its whole `write_all`, so the bytes
/// of one call are never split or interleaved with another call's bytes.
/// Ordering between concurrent callers is whatever order they win the lock.
///
/// # Examples
///
/// ```
/// use rust_tee_logger::writers::{LogWriter, SyncWriter};
///
/// let writer = SyncWriter::memory("buffer");
/// writer.write(b"first line\n").unwrap();
/// assert_eq!(writer.contents(), "first line\n");
/// ```
pub struct SyncWriter<W: Write + Send> {
    name: String,
    inner: Mutex<Option<W>>,
}

impl<W: Write + Send> std::fmt::Debug for SyncWriter<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncWriter")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl<W: Write + Send> SyncWriter<W> {
    pub fn new(name: impl Into<String>, inner: W) -> Self {
        Self {
            name: name.into(),
            inner: Mutex::new(Some(inner)),
        }
    }

    /// Flush and release the underlying handle
    ///
    /// Later writes fail with [`LoggerError::WriterClosed`]. Closing twice is
    /// a no-op.
    pub fn close(&self) -> Result<()> {
        let taken = self.inner.lock().take();
        if let Some(mut writer) = taken {
            writer.flush().map_err(|e| {
                LoggerError::io_operation(
                    "closing log writer",
                    format!("final flush of '{}' failed", self.name),
                    e,
                )
            })?;
        }
        Ok(())
    }

    pub fn is_closed(&self) -> bool {
        self.inner.lock().is_none()
    }
}

impl SyncWriter<Stdout> {
    pub fn stdout() -> Self {
        Self::new("stdout", std::io::stdout())
    }
}

impl SyncWriter<Stderr> {
    pub fn stderr() -> Self {
        Self::new("stderr", std::io::stderr())
    }
}

impl SyncWriter<File> {
    /// Open `path` for appending, creating it and its parent directories
    pub fn file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|e| LoggerError::directory(parent.display().to_string(), e))?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| LoggerError::file_open(path.display().to_string(), e))?;

        Ok(Self::new(path.display().to_string(), file))
    }
}

impl SyncWriter<Vec<u8>> {
    /// In-memory writer, handy for tests and capture
    pub fn memory(name: impl Into<String>) -> Self {
        Self::new(name, Vec::new())
    }

    /// Everything written so far, lossily decoded as UTF-8
    pub fn contents(&self) -> String {
        self.inner
            .lock()
            .as_ref()
            .map(|buf| String::from_utf8_lossy(buf).into_owned())
            .unwrap_or_default()
    }
}

impl<W: Write + Send> LogWriter for SyncWriter<W> {
    fn write(&self, bytes: &[u8]) -> Result<usize> {
        let mut guard = self.inner.lock();
        let writer = guard
            .as_mut()
            .ok_or_else(|| LoggerError::writer_closed(self.name.clone()))?;
        writer
            .write_all(bytes)
            .map_err(|e| LoggerError::write(self.name.clone(), e))?;
        Ok(bytes.len())
    }

    fn flush(&self) -> Result<()> {
        if let Some(writer) = self.inner.lock().as_mut() {
            writer
                .flush()
                .map_err(|e| LoggerError::write(self.name.clone(), e))?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl<W: Write + Send> Drop for SyncWriter<W> {
    fn drop(&mut self) {
        if let Some(writer) = self.inner.get_mut().as_mut() {
            // Best effort flush - ignore errors during drop
            let _ = writer.flush();
        }
    }
}
