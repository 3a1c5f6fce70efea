//! Stress tests for concurrent emission
//!
//! These tests verify:
//! - N threads x M events produce exactly N*M intact lines
//! - Concurrent callers racing over a day boundary rotate exactly once
//! - Writes in flight while the day changes are never lost
//! - Every sink receives every event under contention

use chrono::NaiveDate;
use rust_tee_logger::core::{LogContext, LogEvent, LogLevel, LogWriter, Logger, Router, Sink};
use rust_tee_logger::encoders::DecoratingEncoder;
use rust_tee_logger::renderers::{JsonRenderer, TextRenderer};
use rust_tee_logger::writers::{
    Classification, DailyFileSink, FileSystem, ManualClock, RotatingFileResolver, StdFileSystem,
    SyncWriter,
};
use std::collections::HashSet;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;
use tempfile::TempDir;

const THREADS: usize = 8;
const EVENTS_PER_THREAD: usize = 500;

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

/// Every line must parse as JSON and every (thread, seq) pair appear once
fn assert_complete_lines(contents: &str) {
    let mut seen = HashSet::new();
    for line in contents.lines() {
        let json: serde_json::Value =
            serde_json::from_str(line).unwrap_or_else(|e| panic!("corrupt line {:?}: {}", line, e));
        let thread = json["thread"].as_i64().expect("thread field");
        let seq = json["seq"].as_i64().expect("seq field");
        assert!(seen.insert((thread, seq)), "duplicate line {}:{}", thread, seq);
    }
    assert_eq!(seen.len(), THREADS * EVENTS_PER_THREAD);
}

fn emit_from_threads(logger: Logger) {
    let barrier = Arc::new(Barrier::new(THREADS));
    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let logger = logger.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for seq in 0..EVENTS_PER_THREAD {
                    logger.info_with(
                        "x".repeat(256),
                        LogContext::new().with_field("thread", t).with_field("seq", seq),
                    );
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("Thread panicked");
    }
}

#[test]
fn test_concurrent_lines_into_memory_writer() {
    let buffer = Arc::new(SyncWriter::memory("buffer"));
    let router = Router::builder()
        .sink(Sink::new("buffer", JsonRenderer::new(), Arc::clone(&buffer)))
        .build();

    emit_from_threads(Logger::new(Arc::new(router)));

    assert_complete_lines(&buffer.contents());
}

#[test]
fn test_concurrent_lines_into_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("stress.log");
    let writer = SyncWriter::file(&path).expect("open file");

    let router = Router::builder()
        .sink(Sink::new("file", JsonRenderer::new(), writer))
        .build();
    let router = Arc::new(router);

    emit_from_threads(Logger::new(Arc::clone(&router)));
    router.flush().expect("flush");

    let contents = fs::read_to_string(&path).expect("read log");
    assert_complete_lines(&contents);
    assert_eq!(router.metrics().failures(), 0);
}

#[test]
fn test_concurrent_daily_files_open_once() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let fs_counter = Arc::new(CountingFs::default());
    let resolver = Arc::new(
        RotatingFileResolver::new(temp_dir.path())
            .with_clock(Arc::new(ManualClock::new(
                NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date"),
            )))
            .with_file_system(fs_counter.clone()),
    );

    let router = Router::builder()
        .sink(Sink::new(
            "console",
            DecoratingEncoder::new(JsonRenderer::new()).with_daily_files(Arc::clone(&resolver)),
            SyncWriter::memory("console"),
        ))
        .build();

    emit_from_threads(Logger::new(Arc::new(router)));

    // out.log only: nothing reached Error level
    assert_eq!(fs_counter.opens.load(Ordering::SeqCst), 1);
    assert_eq!(fs_counter.dirs.load(Ordering::SeqCst), 1);

    let contents =
        fs::read_to_string(temp_dir.path().join("2024-01-01/out.log")).expect("read out.log");
    assert_complete_lines(&contents);
}

#[test]
fn test_racing_day_rollover_rotates_once() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let clock = Arc::new(ManualClock::new(
        NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date"),
    ));
    let fs_counter = Arc::new(CountingFs::default());
    let resolver = Arc::new(
        RotatingFileResolver::new(temp_dir.path())
            .with_clock(clock.clone())
            .with_file_system(fs_counter.clone()),
    );

    resolver.resolve(&Classification::All).expect("first day");
    clock.advance_days(1);

    let barrier = Arc::new(Barrier::new(THREADS));
    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let sink = DailyFileSink::all(Arc::clone(&resolver));
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for _ in 0..100 {
                    sink.write(b"after midnight\n").expect("write");
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("Thread panicked");
    }

    assert_eq!(resolver.rotations(), 1);
    assert_eq!(fs_counter.opens.load(Ordering::SeqCst), 2);

    let contents =
        fs::read_to_string(temp_dir.path().join("2024-01-02/out.log")).expect("read new day");
    assert_eq!(contents.lines().count(), THREADS * 100);
}

#[test]
fn test_writes_survive_rollover_while_running() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let clock = Arc::new(ManualClock::new(
        NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date"),
    ));
    let resolver = Arc::new(RotatingFileResolver::new(temp_dir.path()).with_clock(clock.clone()));
    let running = Arc::new(AtomicBool::new(true));
    let written = Arc::new(AtomicUsize::new(0));
    let failed = Arc::new(AtomicUsize::new(0));

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let sink = DailyFileSink::all(Arc::clone(&resolver));
            let running = Arc::clone(&running);
            let written = Arc::clone(&written);
            let failed = Arc::clone(&failed);
            thread::spawn(move || {
                while running.load(Ordering::SeqCst) {
                    match sink.write(b"line\n") {
                        Ok(_) => written.fetch_add(1, Ordering::SeqCst),
                        Err(e) => {
                            eprintln!("write failed during rollover: {}", e);
                            failed.fetch_add(1, Ordering::SeqCst)
                        }
                    };
                }
            })
        })
        .collect();

    for _ in 0..200 {
        clock.advance_days(1);
        thread::sleep(Duration::from_micros(50));
    }
    running.store(false, Ordering::SeqCst);
    for handle in handles {
        handle.join().expect("Thread panicked");
    }
    resolver.flush().expect("flush");

    assert_eq!(failed.load(Ordering::SeqCst), 0);

    let mut lines = 0;
    for entry in fs::read_dir(temp_dir.path()).expect("read root") {
        let out = entry.expect("dir entry").path().join("out.log");
        if out.exists() {
            lines += fs::read_to_string(&out).expect("read out.log").lines().count();
        }
    }
    assert_eq!(lines, written.load(Ordering::SeqCst));
}

#[test]
fn test_every_sink_gets_every_event() {
    let sinks: Vec<Arc<SyncWriter<Vec<u8>>>> =
        (0..4).map(|i| Arc::new(SyncWriter::memory(format!("sink-{}", i)))).collect();

    let mut builder = Router::builder();
    for (i, buffer) in sinks.iter().enumerate() {
        builder = builder.sink(Sink::new(
            format!("sink-{}", i),
            TextRenderer::new(),
            Arc::clone(buffer),
        ));
    }
    let router = Arc::new(builder.build());

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let router = Arc::clone(&router);
            thread::spawn(move || {
                for i in 0..EVENTS_PER_THREAD {
                    router.emit(&LogEvent::new(LogLevel::Warn, format!("t{} e{}", t, i)));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("Thread panicked");
    }

    for buffer in &sinks {
        assert_eq!(buffer.contents().lines().count(), THREADS * EVENTS_PER_THREAD);
    }
    assert_eq!(
        router.metrics().delivered() as usize,
        sinks.len() * THREADS * EVENTS_PER_THREAD
    );
}
