//! File writer implementation

use crate::core::{template, LogArg, LogEntry, LogWriter, LoggerError, Result, TimestampFormat};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Appends plain-text lines to a file.
///
/// Control characters in messages are escaped so a single entry always
/// occupies a single line.
pub struct FileWriter {
    path: PathBuf,
    writer: BufWriter<File>,
    timestamp_format: TimestampFormat,
}

impl FileWriter {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| {
                LoggerError::io_operation("opening log file", path.display().to_string(), e)
            })?;

        Ok(Self {
            path,
            writer: BufWriter::new(file),
            timestamp_format: TimestampFormat::Iso8601,
        })
    }

    /// Set the timestamp format for this writer
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use logora::writers::FileWriter;
    /// use logora::TimestampFormat;
    ///
    /// let writer = FileWriter::new("/var/log/app.log")
    ///     .unwrap()
    ///     .with_timestamp_format(TimestampFormat::Rfc3339);
    /// ```
    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_line(&mut self, line: &str) -> Result<()> {
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }
}

/// Escape characters that would let a message forge extra log lines
fn sanitize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out
}

impl LogWriter for FileWriter {
    fn log(&mut self, entry: &LogEntry) -> Result<()> {
        let timestamp = self.timestamp_format.format(&entry.timestamp);

        let mut line = format!("[{}] [{}]", timestamp, entry.log_type.label());
        if let Some(ref scope) = entry.scope {
            line.push_str(&format!(" [{}]", sanitize(scope)));
        }
        line.push(' ');
        line.push_str(&sanitize(&entry.render()));

        self.write_line(&line)
    }

    fn title(&mut self, title: &str) -> Result<()> {
        self.write_line(&format!("=== {} ===", sanitize(title)))
    }

    fn empty(&mut self, count: usize) -> Result<()> {
        for _ in 0..count {
            self.write_line("")?;
        }
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.write_line("--- cleared ---")
    }

    fn print(&mut self, message: &str, args: &[LogArg]) -> Result<()> {
        self.write_line(&sanitize(&template::format(message, args)))
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    fn set_timestamp_format(&mut self, format: TimestampFormat) {
        self.timestamp_format = format;
    }
}

impl Drop for FileWriter {
    fn drop(&mut self) {
        // Ensure all buffered data is flushed to disk
        let _ = self.writer.flush();
    }
}
