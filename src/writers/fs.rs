//! Filesystem seam used by the rotating resolver

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

/// The two filesystem operations rotation needs
///
/// Swapping the implementation lets tests count or fail directory and file
/// creation without touching the real disk.
pub trait FileSystem: Send + Sync {
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Open `path` for appending, creating it if absent
    fn open_append(&self, path: &Path) -> io::Result<Box<dyn Write + Send>>;
}

/// The real filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct StdFileSystem;

impl FileSystem for StdFileSystem {
    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path)
    }

    fn open_append(&self, path: &Path) -> io::Result<Box<dyn Write + Send>> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Box::new(file))
    }
}
