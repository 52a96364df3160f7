//! Output transports: a named writer plus its own filtering options

use super::log_level::LogLevel;
use super::timestamp::TimestampFormat;
use super::writer::LogWriter;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Per-output settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputOptions {
    /// Minimum level for this output. Falls back to the logger's level when unset.
    pub level: Option<LogLevel>,
    /// Timestamp rendering pushed to the writer. Unset keeps the writer's own.
    pub timestamp_format: Option<TimestampFormat>,
}

impl OutputOptions {
    #[must_use]
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = Some(level);
        self
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = Some(format);
        self
    }
}

/// A registered destination.
///
/// # Example
///
/// ```
/// use logora::{LogLevel, Output};
/// use logora::writers::MemoryWriter;
///
/// let output = Output::new("memory", MemoryWriter::new()).with_level(LogLevel::Warning);
/// assert_eq!(output.name(), "memory");
/// assert_eq!(output.options().level, Some(LogLevel::Warning));
/// ```
pub struct Output {
    name: String,
    options: OutputOptions,
    writer: Mutex<Box<dyn LogWriter>>,
}

impl Output {
    pub fn new<W: LogWriter + 'static>(name: impl Into<String>, writer: W) -> Self {
        Self::from_boxed(name, Box::new(writer))
    }

    pub fn from_boxed(name: impl Into<String>, writer: Box<dyn LogWriter>) -> Self {
        Self {
            name: name.into(),
            options: OutputOptions::default(),
            writer: Mutex::new(writer),
        }
    }

    #[must_use]
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.options.level = Some(level);
        self
    }

    /// Replace the options, applying any timestamp format to the writer
    #[must_use]
    pub fn with_options(mut self, options: OutputOptions) -> Self {
        if let Some(ref format) = options.timestamp_format {
            self.writer.get_mut().set_timestamp_format(format.clone());
        }
        self.options = options;
        self
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.writer.get_mut().set_timestamp_format(format.clone());
        self.options.timestamp_format = Some(format);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn options(&self) -> &OutputOptions {
        &self.options
    }

    /// Level this output filters at, given the logger-wide default
    #[inline]
    pub fn effective_level(&self, default: LogLevel) -> LogLevel {
        self.options.level.unwrap_or(default)
    }

    /// Whether an entry of `severity` reaches this output
    #[inline]
    pub fn accepts(&self, severity: LogLevel, default: LogLevel) -> bool {
        self.effective_level(default).permits(severity)
    }

    pub(crate) fn writer(&self) -> &Mutex<Box<dyn LogWriter>> {
        &self.writer
    }
}

impl fmt::Debug for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Output")
            .field("name", &self.name)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{LogEntry, LogType};
    use crate::writers::{JsonWriter, MemoryWriter, SharedBuffer};

    #[test]
    fn test_effective_level_falls_back_to_default() {
        let output = Output::new("mem", MemoryWriter::new());
        assert_eq!(output.effective_level(LogLevel::Debug), LogLevel::Debug);

        let output = output.with_level(LogLevel::Error);
        assert_eq!(output.effective_level(LogLevel::Debug), LogLevel::Error);
    }

    #[test]
    fn test_accepts() {
        let output = Output::new("mem", MemoryWriter::new()).with_level(LogLevel::Warning);
        assert!(output.accepts(LogLevel::Error, LogLevel::Info));
        assert!(output.accepts(LogLevel::Warning, LogLevel::Info));
        assert!(!output.accepts(LogLevel::Success, LogLevel::Info));
        assert!(!output.accepts(LogLevel::Debug, LogLevel::Info));
    }

    #[test]
    fn test_timestamp_format_reaches_writer() {
        let buffer = SharedBuffer::new();
        let writer = JsonWriter::from_writer(buffer.clone());
        let output = Output::new("json", writer).with_options(
            OutputOptions::default().with_timestamp_format(TimestampFormat::UnixMillis),
        );
        assert_eq!(
            output.options().timestamp_format,
            Some(TimestampFormat::UnixMillis)
        );

        let entry = LogEntry::new(LogType::Info, "x", Vec::new());
        output.writer().lock().log(&entry).unwrap();

        let value: serde_json::Value = serde_json::from_str(&buffer.lines()[0]).unwrap();
        assert_eq!(value["timestamp"], entry.timestamp.timestamp_millis());
    }

    #[test]
    fn test_unset_timestamp_format_keeps_writer_default() {
        let buffer = SharedBuffer::new();
        let output = Output::new("json", JsonWriter::from_writer(buffer.clone()))
            .with_options(OutputOptions::default().with_level(LogLevel::Debug));
        assert_eq!(output.options().timestamp_format, None);

        output
            .writer()
            .lock()
            .log(&LogEntry::new(LogType::Info, "x", Vec::new()))
            .unwrap();

        let value: serde_json::Value = serde_json::from_str(&buffer.lines()[0]).unwrap();
        assert!(value["timestamp"].is_string());
    }
}
