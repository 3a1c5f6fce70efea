//! Logfmt layout (key=value pairs)

use crate::core::log_context::escape_line_breaks;
use crate::core::{FieldValue, LogEvent, Renderer, Result, TimestampFormat};

#[derive(Debug, Clone, Default)]
pub struct LogfmtRenderer {
    timestamp_format: TimestampFormat,
}

impl LogfmtRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    /// Escape a logfmt key (remove spaces and special chars)
    fn escape_key(key: &str) -> String {
        key.chars()
            .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-')
            .collect()
    }

    /// Escape a logfmt value (quote if contains spaces)
    fn escape_value(value: &str) -> String {
        let needs_quotes = value.is_empty()
            || value
                .chars()
                .any(|c| matches!(c, ' ' | '"' | '=' | '\n' | '\r' | '\t'));
        if needs_quotes {
            Self::quote_value(value)
        } else {
            value.to_string()
        }
    }

    fn quote_value(value: &str) -> String {
        let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
        format!("\"{}\"", escape_line_breaks(&escaped))
    }
}

impl Renderer for LogfmtRenderer {
    fn render(&self, event: &LogEvent) -> Result<String> {
        let mut parts = Vec::with_capacity(4 + event.fields.len());

        parts.push(format!(
            "timestamp={}",
            Self::escape_value(&self.timestamp_format.format(&event.timestamp)?)
        ));
        parts.push(format!("level={}", event.level.to_str()));
        if let Some(ref caller) = event.caller {
            parts.push(format!("caller={}", Self::escape_value(caller)));
        }
        // message is always quoted
        parts.push(format!("message={}", Self::quote_value(&event.message)));

        for (key, value) in event.fields.fields() {
            let formatted = match value {
                FieldValue::String(s) => Self::quote_value(s),
                other => other.to_string(),
            };
            parts.push(format!("{}={}", Self::escape_key(key), formatted));
        }

        let mut line = parts.join(" ");
        line.push('\n');
        Ok(line)
    }

    fn name(&self) -> &str {
        "logfmt"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LogLevel;

    #[test]
    fn test_logfmt_layout() {
        let event = LogEvent::new(LogLevel::Warn, "Warning message")
            .with_field("user", "alice")
            .with_field("count", 5);
        let line = LogfmtRenderer::new().render(&event).unwrap();

        assert!(line.contains("level=WARN"));
        assert!(line.contains("message=\"Warning message\""));
        assert!(line.contains("user=\"alice\""));
        assert!(line.contains("count=5"));
        assert!(line.contains("timestamp=\""));
    }

    #[test]
    fn test_logfmt_values_stay_on_one_line() {
        let event = LogEvent::new(LogLevel::Info, "ok")
            .with_field("note", "first\nsecond\tthird");
        let line = LogfmtRenderer::new().render(&event).unwrap();

        assert_eq!(line.matches('\n').count(), 1);
        assert!(line.contains("note=\"first\\nsecond\\tthird\""));
    }

    #[test]
    fn test_logfmt_escape_special_chars() {
        let event = LogEvent::new(LogLevel::Debug, "Query executed")
            .with_field("bad key!", "SELECT * FROM users WHERE id=1");
        let line = LogfmtRenderer::new().render(&event).unwrap();

        assert!(line.contains("badkey=\"SELECT * FROM users WHERE id=1\""));
    }
}
