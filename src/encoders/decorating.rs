//! Decorating encoder
//!
//! Wraps an inner renderer and post-processes its output instead of
//! reimplementing any layout. Decorations run in a fixed order:
//!
//! 1. level token coloring
//! 2. custom line transforms, in registration order
//! 3. prefix
//! 4. side effects: duplicate the final line to extra writers
//!
//! If the inner renderer fails nothing else runs and its error is returned
//! unchanged.

use crate::core::{LogEvent, LogLevel, LogWriter, Renderer, Result};
use crate::writers::{DailyFileSink, RotatingFileResolver};
use colored::Color;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// A text-to-text rewrite applied to every rendered line
pub trait LineTransform: Send + Sync {
    fn apply(&self, event: &LogEvent, line: String) -> String;

    fn name(&self) -> &str {
        "custom"
    }
}

impl<F> LineTransform for F
where
    F: Fn(&LogEvent, String) -> String + Send + Sync,
{
    fn apply(&self, event: &LogEvent, line: String) -> String {
        self(event, line)
    }
}

/// Side-channel copy of every admitted line to another writer
#[derive(Clone)]
pub struct DuplicateTo {
    writer: Arc<dyn LogWriter>,
    min_level: LogLevel,
}

impl DuplicateTo {
    pub fn new(writer: Arc<dyn LogWriter>, min_level: LogLevel) -> Self {
        Self { writer, min_level }
    }

    /// Copy every event regardless of level
    pub fn all(writer: Arc<dyn LogWriter>) -> Self {
        Self::new(writer, LogLevel::Debug)
    }

    pub fn min_level(&self) -> LogLevel {
        self.min_level
    }

    pub fn writer_name(&self) -> &str {
        self.writer.name()
    }
}

impl fmt::Debug for DuplicateTo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DuplicateTo")
            .field("writer", &self.writer.name())
            .field("min_level", &self.min_level)
            .finish()
    }
}

/// Renderer decorator adding colors, prefixes, rewrites and duplicate writes
///
/// # Examples
///
/// ```
/// use rust_tee_logger::core::{LogEvent, LogLevel, Renderer};
/// use rust_tee_logger::encoders::DecoratingEncoder;
/// use rust_tee_logger::renderers::TextRenderer;
///
/// let encoder = DecoratingEncoder::new(TextRenderer::new()).with_prefix("[billing] ");
/// let line = encoder.render(&LogEvent::new(LogLevel::Info, "invoice sent")).unwrap();
/// assert!(line.starts_with("[billing] ["));
/// ```
pub struct DecoratingEncoder {
    inner: Box<dyn Renderer>,
    level_colors: Option<HashMap<LogLevel, Color>>,
    transforms: Vec<Box<dyn LineTransform>>,
    prefix: Option<String>,
    duplicates: Vec<DuplicateTo>,
    side_effect_failures: AtomicU64,
}

impl DecoratingEncoder {
    pub fn new(inner: impl Renderer + 'static) -> Self {
        Self::from_boxed(Box::new(inner))
    }

    pub fn from_boxed(inner: Box<dyn Renderer>) -> Self {
        Self {
            inner,
            level_colors: None,
            transforms: Vec::new(),
            prefix: None,
            duplicates: Vec::new(),
            side_effect_failures: AtomicU64::new(0),
        }
    }

    /// Color the level token using the default palette
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_level_colors(mut self) -> Self {
        self.level_colors = Some(
            LogLevel::ALL
                .iter()
                .map(|level| (*level, level.color_code()))
                .collect(),
        );
        self
    }

    /// Override the color of one level; enables coloring if it was off
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_level_color(mut self, level: LogLevel, color: Color) -> Self {
        if self.level_colors.is_none() {
            self = self.with_level_colors();
        }
        if let Some(colors) = self.level_colors.as_mut() {
            colors.insert(level, color);
        }
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_transform(mut self, transform: impl LineTransform + 'static) -> Self {
        self.transforms.push(Box::new(transform));
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_duplicate(mut self, duplicate: DuplicateTo) -> Self {
        self.duplicates.push(duplicate);
        self
    }

    /// Duplicate into the resolver's day-partitioned files
    ///
    /// Every line goes to `out`; lines at Error or more severe also go to
    /// `err`.
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_daily_files(self, resolver: Arc<RotatingFileResolver>) -> Self {
        let out = DailyFileSink::all(Arc::clone(&resolver));
        let err = DailyFileSink::errors(resolver);
        self.with_duplicate(DuplicateTo::all(Arc::new(out)))
            .with_duplicate(DuplicateTo::new(Arc::new(err), LogLevel::Error))
    }

    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    pub fn duplicates(&self) -> &[DuplicateTo] {
        &self.duplicates
    }

    /// Side-effect writes that failed since construction
    pub fn side_effect_failures(&self) -> u64 {
        self.side_effect_failures.load(Ordering::Relaxed)
    }

    /// Flush every duplicate target
    pub fn flush_duplicates(&self) -> Result<()> {
        let mut first_error = None;
        for duplicate in &self.duplicates {
            if let Err(e) = duplicate.writer.flush() {
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    fn colorize(&self, level: LogLevel, line: String) -> String {
        let Some(color) = self.level_colors.as_ref().and_then(|c| c.get(&level)) else {
            return line;
        };
        // only the first occurrence; the message may repeat the word
        line.replacen(level.to_str(), &level.paint(*color), 1)
    }

    fn run_side_effects(&self, event: &LogEvent, line: &str) {
        for duplicate in &self.duplicates {
            if event.level < duplicate.min_level {
                continue;
            }
            if let Err(e) = duplicate.writer.write(line.as_bytes()) {
                self.side_effect_failures.fetch_add(1, Ordering::Relaxed);
                eprintln!(
                    "[LOGGER ERROR] Duplicate write to '{}' failed: {}",
                    duplicate.writer.name(),
                    e
                );
            }
        }
    }
}

impl Renderer for DecoratingEncoder {
    fn render(&self, event: &LogEvent) -> Result<String> {
        let mut line = self.inner.render(event)?;

        line = self.colorize(event.level, line);

        for transform in &self.transforms {
            line = transform.apply(event, line);
        }

        if let Some(ref prefix) = self.prefix {
            line.insert_str(0, prefix);
        }

        self.run_side_effects(event, &line);
        Ok(line)
    }

    fn name(&self) -> &str {
        "decorating"
    }
}

impl fmt::Debug for DecoratingEncoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecoratingEncoder")
            .field("inner", &self.inner.name())
            .field("colored", &self.level_colors.is_some())
            .field(
                "transforms",
                &self.transforms.iter().map(|t| t.name()).collect::<Vec<_>>(),
            )
            .field("prefix", &self.prefix)
            .field("duplicates", &self.duplicates)
            .finish()
    }
}
