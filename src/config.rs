//! Declarative pipeline configuration
//!
//! A [`PipelineConfig`] describes sinks as plain data (loadable from JSON)
//! and builds the matching [`Router`]. Everything it can express is also
//! reachable through the builders directly.

use crate::core::{LogLevel, LogWriter, Logger, LoggerError, Result, Router, Sink, TimestampFormat};
use crate::encoders::DecoratingEncoder;
use crate::renderers::OutputFormat;
use crate::writers::{
    Classification, DailyFileSink, DayBoundary, PartitionLayout, RotatingFileResolver, SyncWriter,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Where a sink's primary output goes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SinkTarget {
    #[default]
    Stdout,
    Stderr,
    /// One plain append-mode file
    File { path: PathBuf },
    /// A day-partitioned file under `log_dir`; `out`, `err` or any other name
    Daily { classification: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SinkConfig {
    pub name: String,
    #[serde(default)]
    pub target: SinkTarget,
    #[serde(default)]
    pub threshold: LogLevel,
    #[serde(default)]
    pub format: OutputFormat,
    #[serde(default)]
    pub timestamp: TimestampFormat,
    /// Color the level token
    #[serde(default)]
    pub colors: bool,
    #[serde(default)]
    pub prefix: Option<String>,
    /// Also copy every line into `log_dir`'s `out` file and error lines into `err`
    #[serde(default)]
    pub daily_split: bool,
}

impl SinkConfig {
    pub fn new(name: impl Into<String>, target: SinkTarget) -> Self {
        Self {
            name: name.into(),
            target,
            threshold: LogLevel::default(),
            format: OutputFormat::default(),
            timestamp: TimestampFormat::default(),
            colors: false,
            prefix: None,
            daily_split: false,
        }
    }

    fn needs_log_dir(&self) -> bool {
        self.daily_split || matches!(self.target, SinkTarget::Daily { .. })
    }
}

/// Whole-pipeline configuration
///
/// # Example
///
/// ```
/// use rust_tee_logger::config::PipelineConfig;
///
/// let config = PipelineConfig::from_json(r#"{
///     "sinks": [
///         { "name": "console", "threshold": "debug", "colors": true },
///         { "name": "audit", "target": { "type": "stderr" }, "format": "json", "threshold": "warn" }
///     ]
/// }"#)?;
/// let router = config.build()?;
/// assert_eq!(router.sink_count(), 2);
/// # Ok::<(), rust_tee_logger::LoggerError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub sinks: Vec<SinkConfig>,
    /// Root directory for day-partitioned files
    pub log_dir: Option<PathBuf>,
    pub layout: PartitionLayout,
    pub day_boundary: DayBoundary,
}

impl PipelineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Colored text on stdout, everything from Debug up
    pub fn development() -> Self {
        let mut console = SinkConfig::new("console", SinkTarget::Stdout);
        console.threshold = LogLevel::Debug;
        console.colors = true;

        Self {
            sinks: vec![console],
            ..Self::default()
        }
    }

    /// JSON on stdout from Info up, copied into daily `out`/`err` files under `logs/`
    pub fn production() -> Self {
        let mut console = SinkConfig::new("console", SinkTarget::Stdout);
        console.format = OutputFormat::Json;
        console.daily_split = true;

        Self {
            sinks: vec![console],
            log_dir: Some(PathBuf::from("logs")),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_sink(mut self, sink: SinkConfig) -> Self {
        self.sinks.push(sink);
        self
    }

    #[must_use]
    pub fn with_log_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.log_dir = Some(dir.into());
        self
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            LoggerError::io_operation("reading configuration", path.display().to_string(), e)
        })?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check names and directory requirements without opening anything
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for sink in &self.sinks {
            if sink.name.trim().is_empty() {
                return Err(LoggerError::config("sink", "name must not be empty"));
            }
            if !seen.insert(sink.name.as_str()) {
                return Err(LoggerError::config(
                    "sink",
                    format!("duplicate sink name '{}'", sink.name),
                ));
            }
            if sink.needs_log_dir() && self.log_dir.is_none() {
                return Err(LoggerError::config(
                    "sink",
                    format!("'{}' writes daily files but no log_dir is set", sink.name),
                ));
            }
        }
        Ok(())
    }

    /// Build a router, opening plain files eagerly
    ///
    /// Daily files are opened lazily on first write. All sinks share one
    /// resolver, so at most one handle per classification is open.
    pub fn build(&self) -> Result<Router> {
        self.validate()?;

        let resolver = self.log_dir.as_ref().map(|dir| {
            Arc::new(
                RotatingFileResolver::new(dir.clone())
                    .with_layout(self.layout)
                    .with_day_boundary(self.day_boundary),
            )
        });

        let mut builder = Router::builder();
        for sink in &self.sinks {
            builder = builder.sink(Self::build_sink(sink, resolver.as_ref())?);
        }
        Ok(builder.build())
    }

    pub fn build_logger(&self) -> Result<Logger> {
        Ok(Logger::new(Arc::new(self.build()?)))
    }

    fn build_sink(config: &SinkConfig, resolver: Option<&Arc<RotatingFileResolver>>) -> Result<Sink> {
        let mut encoder =
            DecoratingEncoder::from_boxed(config.format.renderer(config.timestamp.clone()));
        if config.colors {
            encoder = encoder.with_level_colors();
        }
        if let Some(ref prefix) = config.prefix {
            encoder = encoder.with_prefix(prefix.clone());
        }
        if config.daily_split {
            let resolver = Self::require_resolver(resolver, &config.name)?;
            encoder = encoder.with_daily_files(Arc::clone(resolver));
        }

        let writer: Box<dyn LogWriter> = match &config.target {
            SinkTarget::Stdout => Box::new(SyncWriter::stdout()),
            SinkTarget::Stderr => Box::new(SyncWriter::stderr()),
            SinkTarget::File { path } => Box::new(SyncWriter::file(path)?),
            SinkTarget::Daily { classification } => {
                let resolver = Self::require_resolver(resolver, &config.name)?;
                Box::new(DailyFileSink::new(
                    Arc::clone(resolver),
                    classification_from_stem(classification),
                ))
            }
        };

        Ok(Sink::from_boxed(config.name.clone(), Box::new(encoder), writer)
            .with_threshold(config.threshold))
    }

    fn require_resolver<'a>(
        resolver: Option<&'a Arc<RotatingFileResolver>>,
        sink: &str,
    ) -> Result<&'a Arc<RotatingFileResolver>> {
        resolver.ok_or_else(|| {
            LoggerError::config("sink", format!("'{}' writes daily files but no log_dir is set", sink))
        })
    }
}

fn classification_from_stem(stem: &str) -> Classification {
    match stem {
        "out" => Classification::All,
        "err" => Classification::ErrorOnly,
        other => Classification::Named(other.to_string()),
    }
}
