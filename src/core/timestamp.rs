//! Timestamp formatting utilities
//!
//! Provides configurable timestamp formats for rendered log lines.
//! Event timestamps are local time; numeric formats are zone-independent.

use super::error::{LoggerError, Result};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Timestamp format options for renderers
///
/// # Examples
///
/// ```
/// use rust_tee_logger::core::TimestampFormat;
/// use chrono::Local;
///
/// let format = TimestampFormat::DateTime;
/// let stamp = format.format(&Local::now()).unwrap();
/// assert_eq!(stamp.len(), "2006-01-02 15:04:05".len());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// Plain date and time: `2025-01-08 10:30:45`
    #[default]
    DateTime,

    /// ISO 8601 with milliseconds and offset: `2025-01-08T10:30:45.123+08:00`
    Iso8601,

    /// RFC 3339 format: `2025-01-08T10:30:45.123456789+08:00`
    Rfc3339,

    /// Unix timestamp in seconds: `1736332245`
    Unix,

    /// Unix timestamp in milliseconds: `1736332245123`
    UnixMillis,

    /// Custom strftime format
    ///
    /// An invalid specifier is reported as a render error instead of panicking.
    Custom(String),
}

impl TimestampFormat {
    /// Format a local timestamp according to this format
    ///
    /// # Errors
    ///
    /// Returns a render error if a `Custom` format string is not a valid
    /// strftime specification.
    pub fn format(&self, datetime: &DateTime<Local>) -> Result<String> {
        match self {
            TimestampFormat::DateTime => Self::strftime(datetime, "%Y-%m-%d %H:%M:%S"),
            TimestampFormat::Iso8601 => Self::strftime(datetime, "%Y-%m-%dT%H:%M:%S%.3f%:z"),
            TimestampFormat::Rfc3339 => Ok(datetime.to_rfc3339()),
            TimestampFormat::Unix => Ok(datetime.timestamp().to_string()),
            TimestampFormat::UnixMillis => Ok(datetime.timestamp_millis().to_string()),
            TimestampFormat::Custom(format_str) => Self::strftime(datetime, format_str),
        }
    }

    fn strftime(datetime: &DateTime<Local>, pattern: &str) -> Result<String> {
        let mut out = String::new();
        write!(out, "{}", datetime.format(pattern)).map_err(|_| {
            LoggerError::render("timestamp", format!("invalid strftime format '{}'", pattern))
        })?;
        Ok(out)
    }

    /// Check if this is a Unix-based numeric format
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        matches!(self, TimestampFormat::Unix | TimestampFormat::UnixMillis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_datetime() -> DateTime<Local> {
        Local
            .with_ymd_and_hms(2025, 1, 8, 10, 30, 45)
            .single()
            .expect("valid datetime")
            + chrono::Duration::milliseconds(123)
    }

    #[test]
    fn test_datetime_format() {
        let result = TimestampFormat::DateTime.format(&fixed_datetime()).unwrap();
        assert_eq!(result, "2025-01-08 10:30:45");
    }

    #[test]
    fn test_iso8601_format() {
        let result = TimestampFormat::Iso8601.format(&fixed_datetime()).unwrap();
        assert!(result.starts_with("2025-01-08T10:30:45.123"));
    }

    #[test]
    fn test_unix_millis_format() {
        let secs: i64 = TimestampFormat::Unix
            .format(&fixed_datetime())
            .unwrap()
            .parse()
            .unwrap();
        let millis: i64 = TimestampFormat::UnixMillis
            .format(&fixed_datetime())
            .unwrap()
            .parse()
            .unwrap();
        assert_eq!(millis, secs * 1000 + 123);
    }

    #[test]
    fn test_custom_format() {
        let format = TimestampFormat::Custom("%Y/%m/%d %H:%M".to_string());
        assert_eq!(format.format(&fixed_datetime()).unwrap(), "2025/01/08 10:30");
    }

    #[test]
    fn test_invalid_custom_format_is_render_error() {
        let format = TimestampFormat::Custom("%Q broken".to_string());
        let err = format.format(&fixed_datetime()).unwrap_err();
        assert!(err.is_render_error());
    }

    #[test]
    fn test_is_numeric() {
        assert!(!TimestampFormat::DateTime.is_numeric());
        assert!(TimestampFormat::Unix.is_numeric());
        assert!(TimestampFormat::UnixMillis.is_numeric());
        assert!(!TimestampFormat::Custom("%s".to_string()).is_numeric());
    }

    #[test]
    fn test_deserialization() {
        let format: TimestampFormat =
            serde_json::from_str("\"Iso8601\"").expect("deserialize Iso8601");
        assert_eq!(format, TimestampFormat::Iso8601);

        let format: TimestampFormat =
            serde_json::from_str(r#"{"Custom":"%Y-%m-%d"}"#).expect("deserialize Custom");
        assert_eq!(format, TimestampFormat::Custom("%Y-%m-%d".to_string()));
    }
}
