//! JSON writer for structured logging

use crate::core::{template, LogArg, LogEntry, LogWriter, LoggerError, Result, TimestampFormat};
use serde_json::{json, Map, Value};
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::Path;

/// JSON-lines writer
///
/// Writes each entry as a single-line JSON object (JSONL format) carrying the
/// raw template, its arguments and the rendered message. Compatible with log
/// aggregation tools like ELK, Loki, etc.
pub struct JsonWriter {
    writer: Box<dyn Write + Send>,
    timestamp_format: TimestampFormat,
    pretty: bool,
}

impl JsonWriter {
    /// Create a JSON writer appending to `path`
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| {
                LoggerError::io_operation("opening JSON log file", path.display().to_string(), e)
            })?;

        Ok(Self::from_writer(BufWriter::new(file)))
    }

    /// Create a JSON writer on any sink
    pub fn from_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Box::new(writer),
            timestamp_format: TimestampFormat::Iso8601,
            pretty: false,
        }
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    /// Pretty-print each object across several lines
    #[must_use]
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    fn timestamp_value(&self, entry: &LogEntry) -> Value {
        if self.timestamp_format.is_numeric() {
            json!(entry.timestamp.timestamp_millis())
        } else {
            json!(self.timestamp_format.format(&entry.timestamp))
        }
    }

    /// Structured form of an entry
    pub fn to_value(&self, entry: &LogEntry) -> Value {
        let mut object = Map::new();
        object.insert("timestamp".into(), self.timestamp_value(entry));
        object.insert("type".into(), json!(entry.log_type));
        if let Some(ref scope) = entry.scope {
            object.insert("scope".into(), json!(scope));
        }
        object.insert("template".into(), json!(entry.message));
        if !entry.args.is_empty() {
            let args = entry.args.iter().map(LogArg::to_json_value).collect();
            object.insert("args".into(), Value::Array(args));
        }
        object.insert("message".into(), json!(entry.render()));
        Value::Object(object)
    }

    fn write_value(&mut self, value: &Value) -> Result<()> {
        let line = if self.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        writeln!(self.writer, "{}", line)?;
        Ok(())
    }
}

impl LogWriter for JsonWriter {
    fn log(&mut self, entry: &LogEntry) -> Result<()> {
        let value = self.to_value(entry);
        self.write_value(&value)
    }

    fn title(&mut self, title: &str) -> Result<()> {
        self.write_value(&json!({ "type": "title", "message": title }))
    }

    // Blank lines and screen clearing have no meaning in a JSON stream
    fn empty(&mut self, _count: usize) -> Result<()> {
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        Ok(())
    }

    fn print(&mut self, message: &str, args: &[LogArg]) -> Result<()> {
        self.write_value(&json!({ "type": "raw", "message": template::format(message, args) }))
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    fn set_timestamp_format(&mut self, format: TimestampFormat) {
        self.timestamp_format = format;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LogType;
    use crate::writers::SharedBuffer;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_json_writer() -> Result<()> {
        let dir = tempdir()?;
        let log_path = dir.path().join("test.jsonl");

        let mut writer = JsonWriter::new(&log_path)?;

        let entry = LogEntry::new(
            LogType::Info,
            "User {0} logged in",
            vec![LogArg::from(123), LogArg::from("login")],
        )
        .with_scope(Some("Auth".to_string()));

        writer.log(&entry)?;
        writer.flush()?;

        let content = fs::read_to_string(&log_path)?;
        let parsed: Value = serde_json::from_str(content.trim())?;
        assert_eq!(parsed["type"], "info");
        assert_eq!(parsed["scope"], "Auth");
        assert_eq!(parsed["template"], "User {0} logged in");
        assert_eq!(parsed["args"], json!([123, "login"]));
        assert_eq!(parsed["message"], "User 123 logged in");
        Ok(())
    }

    #[test]
    fn test_json_writer_multiple_entries() -> Result<()> {
        let buffer = SharedBuffer::new();
        let mut writer = JsonWriter::from_writer(buffer.clone());

        for i in 0..5 {
            let entry = LogEntry::new(LogType::Debug, "Iteration {0}", vec![LogArg::from(i)]);
            writer.log(&entry)?;
        }
        writer.empty(3)?;
        writer.clear()?;

        let lines = buffer.lines();
        assert_eq!(lines.len(), 5);

        // Each line should be valid JSON
        for line in lines {
            let parsed: Value = serde_json::from_str(&line)?;
            assert!(parsed["message"].is_string());
            assert!(parsed["type"].is_string());
            assert!(parsed.get("scope").is_none());
        }
        Ok(())
    }

    #[test]
    fn test_numeric_timestamp() {
        let writer = JsonWriter::from_writer(SharedBuffer::new())
            .with_timestamp_format(TimestampFormat::UnixMillis);
        let value = writer.to_value(&LogEntry::new(LogType::Success, "ok", Vec::new()));
        assert!(value["timestamp"].is_i64());
    }
}
