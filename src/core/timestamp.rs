//! Timestamp formatting utilities
//!
//! Writers render an entry's timestamp through one of these formats. The
//! wall-clock format is the default because console output is read by people.

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

/// Timestamp format options
///
/// # Examples
///
/// ```
/// use logora::core::TimestampFormat;
/// use chrono::Utc;
///
/// let format = TimestampFormat::Iso8601;
/// let timestamp = format.format(&Utc::now());
/// assert!(timestamp.ends_with('Z'));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// Local wall-clock time: `10:30:45`
    #[default]
    Clock,

    /// ISO 8601 with milliseconds: `2025-01-08T10:30:45.123Z`
    Iso8601,

    /// RFC 3339 format: `2025-01-08T10:30:45.123456+00:00`
    Rfc3339,

    /// Unix timestamp in milliseconds: `1736332245123`
    UnixMillis,

    /// Custom strftime format, applied to UTC time
    ///
    /// ```
    /// use logora::core::TimestampFormat;
    ///
    /// let format = TimestampFormat::Custom("%d/%b/%Y:%H:%M:%S %z".to_string());
    /// ```
    Custom(String),
}

impl TimestampFormat {
    /// Format a `DateTime<Utc>` according to this format
    #[must_use]
    pub fn format(&self, datetime: &DateTime<Utc>) -> String {
        match self {
            TimestampFormat::Clock => datetime.with_timezone(&Local).format("%H:%M:%S").to_string(),
            TimestampFormat::Iso8601 => datetime.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
            TimestampFormat::Rfc3339 => datetime.to_rfc3339(),
            TimestampFormat::UnixMillis => datetime.timestamp_millis().to_string(),
            TimestampFormat::Custom(format_str) => datetime.format(format_str).to_string(),
        }
    }

    /// Check if this is a numeric format
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        matches!(self, TimestampFormat::UnixMillis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_datetime() -> DateTime<Utc> {
        // 2025-01-08 10:30:45.123456 UTC
        Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45)
            .single()
            .expect("valid datetime")
            + chrono::Duration::microseconds(123456)
    }

    #[test]
    fn test_clock_format() {
        let result = TimestampFormat::Clock.format(&fixed_datetime());
        assert_eq!(result.len(), 8);
        assert_eq!(result.matches(':').count(), 2);
        assert!(result.ends_with(":45"));
    }

    #[test]
    fn test_iso8601_format() {
        let result = TimestampFormat::Iso8601.format(&fixed_datetime());
        assert_eq!(result, "2025-01-08T10:30:45.123Z");
    }

    #[test]
    fn test_rfc3339_format() {
        let result = TimestampFormat::Rfc3339.format(&fixed_datetime());
        assert!(result.starts_with("2025-01-08T10:30:45"));
        assert!(result.contains("+00:00") || result.ends_with('Z'));
    }

    #[test]
    fn test_unix_millis_format() {
        let result = TimestampFormat::UnixMillis.format(&fixed_datetime());
        assert_eq!(result, "1736332245123");
        assert!(TimestampFormat::UnixMillis.is_numeric());
        assert!(!TimestampFormat::Clock.is_numeric());
    }

    #[test]
    fn test_custom_format() {
        let format = TimestampFormat::Custom("%Y/%m/%d %H:%M".to_string());
        assert_eq!(format.format(&fixed_datetime()), "2025/01/08 10:30");
    }

    #[test]
    fn test_default_is_clock() {
        assert_eq!(TimestampFormat::default(), TimestampFormat::Clock);
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
