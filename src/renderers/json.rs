//! JSON layout for structured logging
//!
//! Writes each event as a single-line JSON object (JSONL), compatible with
//! log aggregation tools like ELK, Loki, etc.

use crate::core::{LogEvent, LoggerError, Renderer, Result, TimestampFormat};

#[derive(Debug, Clone, Default)]
pub struct JsonRenderer {
    timestamp_format: TimestampFormat,
}

impl JsonRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    fn timestamp_value(&self, event: &LogEvent) -> Result<serde_json::Value> {
        Ok(match self.timestamp_format {
            TimestampFormat::Unix => serde_json::Value::Number(event.timestamp.timestamp().into()),
            TimestampFormat::UnixMillis => {
                serde_json::Value::Number(event.timestamp.timestamp_millis().into())
            }
            _ => serde_json::Value::String(self.timestamp_format.format(&event.timestamp)?),
        })
    }
}

impl Renderer for JsonRenderer {
    fn render(&self, event: &LogEvent) -> Result<String> {
        let mut json_obj = serde_json::Map::new();

        json_obj.insert("timestamp".to_string(), self.timestamp_value(event)?);
        json_obj.insert(
            "level".to_string(),
            serde_json::Value::String(event.level.to_str().to_string()),
        );
        if let Some(ref caller) = event.caller {
            json_obj.insert("caller".to_string(), serde_json::Value::String(caller.clone()));
        }
        json_obj.insert(
            "message".to_string(),
            serde_json::Value::String(event.message.clone()),
        );

        for (key, value) in event.fields.fields() {
            if json_obj.contains_key(key) {
                return Err(LoggerError::render(
                    "json",
                    format!("field '{}' collides with a reserved key", key),
                ));
            }
            json_obj.insert(key.clone(), value.to_json_value());
        }

        let mut line = serde_json::to_string(&serde_json::Value::Object(json_obj))?;
        line.push('\n');
        Ok(line)
    }

    fn name(&self) -> &str {
        "json"
    }
}
