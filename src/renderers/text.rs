//! Human-readable text layout

use crate::core::{LogEvent, Renderer, Result, TimestampFormat};

/// Console-style text renderer
///
/// Layout: `[timestamp] [LEVEL] caller - message key=value ...`, where the
/// caller part is omitted when the event has none.
#[derive(Debug, Clone)]
pub struct TextRenderer {
    timestamp_format: TimestampFormat,
    include_caller: bool,
}

impl TextRenderer {
    pub fn new() -> Self {
        Self {
            timestamp_format: TimestampFormat::default(),
            include_caller: true,
        }
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    /// Set a custom timestamp format using a strftime-compatible format string
    #[must_use]
    pub fn with_custom_timestamp(mut self, format_str: &str) -> Self {
        self.timestamp_format = TimestampFormat::Custom(format_str.to_string());
        self
    }

    #[must_use]
    pub fn with_caller(mut self, include: bool) -> Self {
        self.include_caller = include;
        self
    }
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for TextRenderer {
    fn render(&self, event: &LogEvent) -> Result<String> {
        let timestamp_str = self.timestamp_format.format(&event.timestamp)?;

        let mut line = format!("[{}] [{:5}] ", timestamp_str, event.level.to_str());
        if self.include_caller {
            if let Some(ref caller) = event.caller {
                line.push_str(caller);
                line.push_str(" - ");
            }
        }
        line.push_str(&event.message);

        if !event.fields.is_empty() {
            line.push(' ');
            line.push_str(&event.fields.format_fields());
        }

        line.push('\n');
        Ok(line)
    }

    fn name(&self) -> &str {
        "text"
    }
}
