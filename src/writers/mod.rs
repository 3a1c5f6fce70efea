//! Writer implementations
//!
//! - `SyncWriter`: mutex-guarded append sink over a stream or file
//! - `RotatingFileResolver`: day/classification partitioned file handles
//! - `DailyFileSink`: a `LogWriter` that writes through the resolver

pub mod clock;
pub mod daily;
pub mod fs;
pub mod rotating;
pub mod sync_writer;

pub use clock::{Clock, DayBoundary, ManualClock};
pub use daily::DailyFileSink;
pub use fs::{FileSystem, StdFileSystem};
pub use rotating::{Classification, FileHandle, PartitionKey, PartitionLayout, RotatingFileResolver};
pub use sync_writer::SyncWriter;

// Re-export the trait alongside its implementations
pub use crate::core::LogWriter;
