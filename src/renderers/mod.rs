//! Inner renderers: event to text line
//!
//! - Text: human-readable console layout (default)
//! - Json: one JSON object per line
//! - Logfmt: key=value pairs compatible with log aggregation tools

pub mod json;
pub mod logfmt;
pub mod text;

pub use json::JsonRenderer;
pub use logfmt::LogfmtRenderer;
pub use text::TextRenderer;

use crate::core::{Renderer, TimestampFormat};
use serde::{Deserialize, Serialize};

/// Output format selector, used by configuration to pick a renderer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Example: `[2025-01-08 10:30:45] [INFO ] main.rs:12 - Request processed`
    #[default]
    Text,

    /// Example: `{"timestamp":"2025-01-08 10:30:45","level":"INFO","message":"Request processed"}`
    Json,

    /// Example: `timestamp="2025-01-08 10:30:45" level=INFO message="Request processed"`
    Logfmt,
}

impl OutputFormat {
    /// Build the renderer for this format
    pub fn renderer(&self, timestamp_format: TimestampFormat) -> Box<dyn Renderer> {
        match self {
            OutputFormat::Text => {
                Box::new(TextRenderer::new().with_timestamp_format(timestamp_format))
            }
            OutputFormat::Json => {
                Box::new(JsonRenderer::new().with_timestamp_format(timestamp_format))
            }
            OutputFormat::Logfmt => {
                Box::new(LogfmtRenderer::new().with_timestamp_format(timestamp_format))
            }
        }
    }
}
