//! Day-partitioned file resolution
//!
//! Maps a classification (`out`, `err`, or any named stream) plus the current
//! calendar day onto one open, append-mode file handle. Handles are cached per
//! classification and swapped lazily on the first write after the day changes.

use super::clock::{Clock, DayBoundary};
use super::fs::{FileSystem, StdFileSystem};
use super::sync_writer::SyncWriter;
use crate::core::error::{LoggerError, Result};
use crate::core::{LogLevel, LogWriter};
use chrono::NaiveDate;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Handle type handed out by the resolver
pub type FileHandle = SyncWriter<Box<dyn Write + Send>>;

/// Which events a partitioned file collects
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Classification {
    /// Every event, written to `out.log`
    All,
    /// Error and more severe, written to `err.log`
    ErrorOnly,
    /// A caller-chosen stream name
    Named(String),
}

impl Classification {
    /// Base file name without the `.log` extension
    pub fn file_stem(&self) -> &str {
        match self {
            Classification::All => "out",
            Classification::ErrorOnly => "err",
            Classification::Named(name) => name,
        }
    }

    /// Whether an event of `level` belongs in this classification
    pub fn admits(&self, level: LogLevel) -> bool {
        match self {
            Classification::ErrorOnly => level.is_error(),
            Classification::All | Classification::Named(_) => true,
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_stem())
    }
}

/// The (day, classification) pair that picks one physical file
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PartitionKey {
    pub day: NaiveDate,
    pub classification: Classification,
}

/// How partitioned files are laid out under the root
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartitionLayout {
    /// `root/2024-01-02/out.log`
    #[default]
    DailyDirectory,
    /// `root/out-2024-01-02.log`
    Flat,
}

struct OpenPartition {
    key: PartitionKey,
    path: PathBuf,
    handle: Arc<FileHandle>,
}

/// Resolves classifications to day-partitioned file handles
///
/// At most one handle per classification is open at a time. Lookups for the
/// current day only take a shared lock; opening a new day's file takes the
/// exclusive lock and re-checks before touching the filesystem, so concurrent
/// callers racing over midnight open the new file exactly once.
///
/// # Examples
///
/// ```no_run
/// use rust_tee_logger::writers::{Classification, LogWriter, RotatingFileResolver};
///
/// let resolver = RotatingFileResolver::new("logs");
/// let out = resolver.resolve(&Classification::All)?;
/// out.write(b"service started\n")?;
/// # Ok::<(), rust_tee_logger::LoggerError>(())
/// ```
pub struct RotatingFileResolver {
    root: PathBuf,
    layout: PartitionLayout,
    clock: Arc<dyn Clock>,
    fs: Arc<dyn FileSystem>,
    partitions: RwLock<HashMap<Classification, OpenPartition>>,
    rotations: AtomicU64,
}

impl RotatingFileResolver {
    /// Resolver over the real filesystem, local-time days, one directory per day
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            layout: PartitionLayout::default(),
            clock: Arc::new(DayBoundary::Local),
            fs: Arc::new(StdFileSystem),
            partitions: RwLock::new(HashMap::new()),
            rotations: AtomicU64::new(0),
        }
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_layout(mut self, layout: PartitionLayout) -> Self {
        self.layout = layout;
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_day_boundary(mut self, boundary: DayBoundary) -> Self {
        self.clock = Arc::new(boundary);
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_file_system(mut self, fs: Arc<dyn FileSystem>) -> Self {
        self.fs = fs;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn layout(&self) -> PartitionLayout {
        self.layout
    }

    /// Directory that holds the files for `day`
    pub fn partition_dir(&self, day: NaiveDate) -> PathBuf {
        match self.layout {
            PartitionLayout::DailyDirectory => self.root.join(day.format("%Y-%m-%d").to_string()),
            PartitionLayout::Flat => self.root.clone(),
        }
    }

    /// Full path of the file for (`day`, `classification`)
    pub fn partition_path(&self, day: NaiveDate, classification: &Classification) -> PathBuf {
        let file_name = match self.layout {
            PartitionLayout::DailyDirectory => format!("{}.log", classification.file_stem()),
            PartitionLayout::Flat => format!(
                "{}-{}.log",
                classification.file_stem(),
                day.format("%Y-%m-%d")
            ),
        };
        self.partition_dir(day).join(file_name)
    }

    /// Handle for `classification` on the clock's current day
    ///
    /// # Errors
    ///
    /// Returns a directory or file-open error when the day's file cannot be
    /// prepared. Nothing is cached in that case, so the next call retries.
    pub fn resolve(&self, classification: &Classification) -> Result<Arc<FileHandle>> {
        let today = self.clock.today();

        {
            let partitions = self.partitions.read();
            if let Some(open) = partitions.get(classification) {
                if open.key.day == today {
                    return Ok(Arc::clone(&open.handle));
                }
            }
        }

        let mut partitions = self.partitions.write();

        // Another caller may have rotated while we waited for the lock
        let today = self.clock.today();
        if let Some(open) = partitions.get(classification) {
            if open.key.day == today {
                return Ok(Arc::clone(&open.handle));
            }
        }

        let dir = self.partition_dir(today);
        self.fs
            .create_dir_all(&dir)
            .map_err(|e| LoggerError::directory(dir.display().to_string(), e))?;

        let path = self.partition_path(today, classification);
        let file = self
            .fs
            .open_append(&path)
            .map_err(|e| LoggerError::file_open(path.display().to_string(), e))?;

        let handle = Arc::new(SyncWriter::new(path.display().to_string(), file));
        let opened = OpenPartition {
            key: PartitionKey {
                day: today,
                classification: classification.clone(),
            },
            path,
            handle: Arc::clone(&handle),
        };

        if let Some(previous) = partitions.insert(classification.clone(), opened) {
            self.rotations.fetch_add(1, Ordering::Relaxed);
            Self::retire(previous);
        }

        Ok(handle)
    }

    /// Release a superseded handle; failures are reported, never returned
    ///
    /// Writers that resolved the old day just before rotation may still hold
    /// the handle, so it is flushed and released rather than closed. The file
    /// closes when the last holder drops it.
    fn retire(previous: OpenPartition) {
        if let Err(e) = previous.handle.flush() {
            eprintln!(
                "[LOGGER WARNING] Failed to flush rotated log file '{}': {}",
                previous.path.display(),
                e
            );
        }
    }

    /// Close a handle on shutdown; failures are reported, never returned
    fn close_partition(open: OpenPartition) {
        if let Err(e) = open.handle.close() {
            eprintln!(
                "[LOGGER WARNING] Failed to close log file '{}': {}",
                open.path.display(),
                e
            );
        }
    }

    /// Partition key currently cached for `classification`
    pub fn current_key(&self, classification: &Classification) -> Option<PartitionKey> {
        self.partitions
            .read()
            .get(classification)
            .map(|open| open.key.clone())
    }

    /// Path of the file currently open for `classification`
    pub fn current_path(&self, classification: &Classification) -> Option<PathBuf> {
        self.partitions
            .read()
            .get(classification)
            .map(|open| open.path.clone())
    }

    pub fn open_handles(&self) -> usize {
        self.partitions.read().len()
    }

    /// Number of times a cached handle was replaced by a newer day's file
    pub fn rotations(&self) -> u64 {
        self.rotations.load(Ordering::Relaxed)
    }

    /// Flush the open handle for one classification, if any
    pub fn flush_partition(&self, classification: &Classification) -> Result<()> {
        let handle = self
            .partitions
            .read()
            .get(classification)
            .map(|open| Arc::clone(&open.handle));
        match handle {
            Some(handle) => handle.flush(),
            None => Ok(()),
        }
    }

    /// Flush every open handle, returning the first failure
    pub fn flush(&self) -> Result<()> {
        let handles: Vec<Arc<FileHandle>> = self
            .partitions
            .read()
            .values()
            .map(|open| Arc::clone(&open.handle))
            .collect();

        let mut first_error = None;
        for handle in handles {
            if let Err(e) = handle.flush() {
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    /// Close and forget every open handle
    pub fn close_all(&self) {
        let drained: Vec<OpenPartition> = self.partitions.write().drain().map(|(_, v)| v).collect();
        for open in drained {
            Self::close_partition(open);
        }
    }
}

impl fmt::Debug for RotatingFileResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RotatingFileResolver")
            .field("root", &self.root)
            .field("layout", &self.layout)
            .field("open_handles", &self.open_handles())
            .field("rotations", &self.rotations())
            .finish()
    }
}

impl Drop for RotatingFileResolver {
    fn drop(&mut self) {
        self.close_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writers::ManualClock;
    use std::io;
    use std::sync::atomic::{AtomicBool, AtomicUsize};
    use std::thread;
    use tempfile::tempdir;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[derive(Default)]
    struct CountingFs {
        dirs: AtomicUsize,
        opens: AtomicUsize,
    }

    impl FileSystem for CountingFs {
        fn create_dir_all(&self, path: &Path) -> io::Result<()> {
            self.dirs.fetch_add(1, Ordering::SeqCst);
            StdFileSystem.create_dir_all(path)
        }

        fn open_append(&self, path: &Path) -> io::Result<Box<dyn Write + Send>> {
            self.opens.fetch_add(1, Ordering::SeqCst);
            StdFileSystem.open_append(path)
        }
    }

    struct DeniedFs;

    impl FileSystem for DeniedFs {
        fn create_dir_all(&self, _path: &Path) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only volume"))
        }

        fn open_append(&self, _path: &Path) -> io::Result<Box<dyn Write + Send>> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only volume"))
        }
    }

    /// Writer that records when it has been dropped
    struct TrackedWriter {
        closed: Arc<AtomicBool>,
    }

    impl Write for TrackedWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Drop for TrackedWriter {
        fn drop(&mut self) {
            self.closed.store(true, Ordering::SeqCst);
        }
    }

    #[derive(Default)]
    struct TrackingFs {
        handles: parking_lot::Mutex<Vec<Arc<AtomicBool>>>,
    }

    impl FileSystem for TrackingFs {
        fn create_dir_all(&self, _path: &Path) -> io::Result<()> {
            Ok(())
        }

        fn open_append(&self, _path: &Path) -> io::Result<Box<dyn Write + Send>> {
            let closed = Arc::new(AtomicBool::new(false));
            self.handles.lock().push(Arc::clone(&closed));
            Ok(Box::new(TrackedWriter { closed }))
        }
    }

    #[test]
    fn test_partition_paths() {
        let resolver = RotatingFileResolver::new("/var/log/app");
        assert_eq!(
            resolver.partition_path(day(2024, 1, 2), &Classification::All),
            PathBuf::from("/var/log/app/2024-01-02/out.log")
        );

        let flat = RotatingFileResolver::new("/var/log/app").with_layout(PartitionLayout::Flat);
        assert_eq!(
            flat.partition_path(day(2024, 1, 2), &Classification::Named("app".into())),
            PathBuf::from("/var/log/app/app-2024-01-02.log")
        );
    }

    #[test]
    fn test_classification_admits() {
        assert!(Classification::All.admits(LogLevel::Debug));
        assert!(!Classification::ErrorOnly.admits(LogLevel::Warn));
        assert!(Classification::ErrorOnly.admits(LogLevel::Error));
        assert!(Classification::ErrorOnly.admits(LogLevel::Fatal));
    }

    #[test]
    fn test_resolve_is_idempotent_within_a_day() {
        let dir = tempdir().unwrap();
        let fs = Arc::new(CountingFs::default());
        let resolver = RotatingFileResolver::new(dir.path())
            .with_clock(Arc::new(ManualClock::new(day(2024, 1, 1))))
            .with_file_system(fs.clone());

        let first = resolver.resolve(&Classification::All).unwrap();
        for _ in 0..100 {
            let again = resolver.resolve(&Classification::All).unwrap();
            assert!(Arc::ptr_eq(&first, &again));
        }

        assert_eq!(fs.dirs.load(Ordering::SeqCst), 1);
        assert_eq!(fs.opens.load(Ordering::SeqCst), 1);
        assert_eq!(
            resolver.current_path(&Classification::All).unwrap(),
            dir.path().join("2024-01-01/out.log")
        );
    }

    #[test]
    fn test_concurrent_resolve_opens_once() {
        let dir = tempdir().unwrap();
        let fs = Arc::new(CountingFs::default());
        let resolver = Arc::new(
            RotatingFileResolver::new(dir.path())
                .with_clock(Arc::new(ManualClock::new(day(2024, 1, 1))))
                .with_file_system(fs.clone()),
        );

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let resolver = Arc::clone(&resolver);
                thread::spawn(move || {
                    for _ in 0..50 {
                        resolver.resolve(&Classification::All).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(fs.dirs.load(Ordering::SeqCst), 1);
        assert_eq!(fs.opens.load(Ordering::SeqCst), 1);
        assert_eq!(resolver.rotations(), 0);
    }

    #[test]
    fn test_day_change_releases_previous_handle() {
        let clock = Arc::new(ManualClock::new(day(2024, 1, 1)));
        let fs = Arc::new(TrackingFs::default());
        let resolver = RotatingFileResolver::new("/unused")
            .with_clock(clock.clone())
            .with_file_system(fs.clone());

        let old = resolver.resolve(&Classification::All).unwrap();
        clock.advance_days(1);
        let new = resolver.resolve(&Classification::All).unwrap();

        assert!(!Arc::ptr_eq(&old, &new));
        assert_eq!(resolver.rotations(), 1);

        // a writer that resolved before midnight can still finish its write
        assert!(!old.is_closed());
        assert_eq!(Arc::strong_count(&old), 1);
        old.write(b"late line\n").unwrap();
        assert!(!fs.handles.lock()[0].load(Ordering::SeqCst));

        drop(old);
        assert!(fs.handles.lock()[0].load(Ordering::SeqCst));
        assert!(!new.is_closed());
        assert_eq!(resolver.open_handles(), 1);
        assert_eq!(
            resolver.current_key(&Classification::All).unwrap().day,
            day(2024, 1, 2)
        );
    }

    #[test]
    fn test_classifications_are_independent() {
        let dir = tempdir().unwrap();
        let resolver = RotatingFileResolver::new(dir.path())
            .with_clock(Arc::new(ManualClock::new(day(2024, 3, 5))));

        resolver.resolve(&Classification::All).unwrap().write(b"a\n").unwrap();
        resolver.resolve(&Classification::ErrorOnly).unwrap().write(b"b\n").unwrap();
        resolver.flush().unwrap();

        assert_eq!(resolver.open_handles(), 2);
        let out = std::fs::read_to_string(dir.path().join("2024-03-05/out.log")).unwrap();
        let err = std::fs::read_to_string(dir.path().join("2024-03-05/err.log")).unwrap();
        assert_eq!(out, "a\n");
        assert_eq!(err, "b\n");
    }

    #[test]
    fn test_directory_failure_is_returned_and_not_cached() {
        let resolver = RotatingFileResolver::new("/denied")
            .with_clock(Arc::new(ManualClock::new(day(2024, 1, 1))))
            .with_file_system(Arc::new(DeniedFs));

        let err = resolver.resolve(&Classification::All).unwrap_err();
        assert!(matches!(err, LoggerError::DirectoryError { .. }));
        assert_eq!(resolver.open_handles(), 0);
    }

    #[test]
    fn test_close_all() {
        let resolver = RotatingFileResolver::new("/unused")
            .with_clock(Arc::new(ManualClock::new(day(2024, 1, 1))))
            .with_file_system(Arc::new(TrackingFs::default()));

        let handle = resolver.resolve(&Classification::ErrorOnly).unwrap();
        resolver.close_all();
        assert!(handle.is_closed());
        assert_eq!(resolver.open_handles(), 0);
    }
}
